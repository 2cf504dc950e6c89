//! Validate configuration command.

use anyhow::{bail, Result};
use std::path::Path;
use swing_config::{load_config, AppConfig};

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = if config_path.is_file() {
        match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                println!("Configuration error: {}", e);
                return Err(e.into());
            }
        }
    } else {
        println!("File not found, checking built-in defaults");
        AppConfig::default()
    };

    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Capital: {}", config.risk.capital);
    println!("Risk per trade: {}", config.risk.risk_fraction);
    println!("Style: {}", config.risk.style);
    println!("Data directory: {}", config.scan.data_dir.display());
    println!("Universe file: {}", config.scan.universe_file.display());
    match config.scan.top_n {
        Some(n) => println!("Top N: {}", n),
        None => println!("Top N: all"),
    }
    println!();

    let errors = config.validate();
    if errors.is_empty() {
        println!("Configuration is valid!");
        return Ok(());
    }

    println!("CONFIGURATION ERROR");
    for error in &errors {
        println!("- {}", error);
    }
    bail!("{} configuration error(s)", errors.len())
}
