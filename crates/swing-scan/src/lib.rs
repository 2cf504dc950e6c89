//! Live scan orchestration.
//!
//! For each instrument: indicators, latest complete snapshot, rule
//! engine, and for accepted trades a risk plan.

mod report;
mod scanner;

pub use report::{ScanReport, VerdictCounts};
pub use scanner::{latest_snapshots, ScanOutcome, Scanner, ScannerConfig};
