//! CLI command implementations.

pub mod backtest;
pub mod last_scan;
pub mod rank;
pub mod scan;
pub mod styles;
pub mod validate;
