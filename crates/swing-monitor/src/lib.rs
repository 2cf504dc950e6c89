//! Logging setup and per-scan audit logs.

mod logging;
mod scan_log;

pub use logging::setup_logging;
pub use scan_log::{read_scan, DecisionRecord, ScanFile, ScanLog, ScanMeta};
