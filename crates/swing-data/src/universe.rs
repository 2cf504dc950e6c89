//! Stock universe list.

use csv::ReaderBuilder;
use std::path::Path;
use swing_core::error::DataError;

/// Read the `symbol` column of a universe CSV, stripping `.NS` suffixes.
///
/// Blank entries are ignored; order is preserved.
pub fn load_universe(path: impl AsRef<Path>) -> Result<Vec<String>, DataError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DataError::FileNotFound(path.display().to_string()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| DataError::Csv(e.to_string()))?;

    let column = reader
        .headers()
        .map_err(|e| DataError::Csv(e.to_string()))?
        .iter()
        .position(|h| h.trim() == "symbol")
        .ok_or_else(|| DataError::MissingColumn("symbol".to_string()))?;

    let mut symbols = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| DataError::Csv(e.to_string()))?;
        let Some(raw) = record.get(column) else {
            continue;
        };
        let symbol = raw.trim().replace(".NS", "");
        if !symbol.is_empty() {
            symbols.push(symbol);
        }
    }

    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_universe() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stocks_list.csv");
        fs::write(&path, "symbol,name\nINFY.NS,Infosys\nTCS.NS,TCS\n,blank\nITC,ITC\n").unwrap();

        let symbols = load_universe(&path).unwrap();

        assert_eq!(symbols, vec!["INFY", "TCS", "ITC"]);
    }

    #[test]
    fn test_universe_errors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_universe(dir.path().join("stocks_list.csv")),
            Err(DataError::FileNotFound(_))
        ));

        let path = dir.path().join("bad.csv");
        fs::write(&path, "ticker\nINFY\n").unwrap();
        assert!(matches!(
            load_universe(&path),
            Err(DataError::MissingColumn(_))
        ));
    }
}
