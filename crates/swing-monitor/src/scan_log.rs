//! Per-scan JSONL audit log.
//!
//! Each scan writes `scan_<YYYY-mm-dd_HH-MM-SS>.jsonl`: one `SCAN_META`
//! line first, then one `DECISION` line per instrument.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use swing_core::types::{Decision, Style, TraceEntry, TradePlan, Verdict};
use tracing::{debug, warn};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const ID_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Scan-level metadata, always the first line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanMeta {
    pub scan_time: String,
    pub style: Style,
    pub total_symbols: usize,
    pub scan_id: String,
}

impl ScanMeta {
    pub fn new(style: Style, total_symbols: usize, now: NaiveDateTime) -> Self {
        Self {
            scan_time: now.format(TIME_FORMAT).to_string(),
            style,
            total_symbols,
            scan_id: now.format(ID_FORMAT).to_string(),
        }
    }
}

/// One instrument's decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub timestamp: String,
    pub symbol: String,
    pub decision: Verdict,
    pub reason: Vec<String>,
    pub trace: Vec<TraceEntry>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub entry: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub stop: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub target: Option<Decimal>,
    pub qty: Option<u64>,
    pub holding: Option<String>,
    pub style: Style,
}

impl DecisionRecord {
    pub fn new(
        symbol: impl Into<String>,
        decision: &Decision,
        plan: Option<&TradePlan>,
        holding: Option<String>,
        style: Style,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            timestamp: now.format(TIME_FORMAT).to_string(),
            symbol: symbol.into(),
            decision: decision.verdict,
            reason: decision.reasons.clone(),
            trace: decision.trace.clone(),
            entry: plan.map(|p| p.entry),
            stop: plan.map(|p| p.stop),
            target: plan.map(|p| p.target),
            qty: plan.map(|p| p.quantity),
            holding,
            style,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
enum ScanLine {
    #[serde(rename = "SCAN_META")]
    Meta(ScanMeta),
    #[serde(rename = "DECISION")]
    Decision(DecisionRecord),
}

/// Parsed contents of a scan log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanFile {
    pub meta: Option<ScanMeta>,
    pub decisions: Vec<DecisionRecord>,
}

/// Writer for one scan's log file.
pub struct ScanLog {
    path: PathBuf,
    writer: BufWriter<File>,
    records: usize,
}

impl ScanLog {
    /// Create the log file in `dir` and write the metadata line.
    ///
    /// An existing file with the same scan id is overwritten.
    pub fn create(dir: &Path, meta: &ScanMeta) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("scan_{}.jsonl", meta.scan_id));
        let writer = BufWriter::new(File::create(&path)?);

        let mut log = Self {
            path,
            writer,
            records: 0,
        };
        log.write_line(&ScanLine::Meta(meta.clone()))?;
        debug!(path = %log.path.display(), "Scan log created");
        Ok(log)
    }

    /// Append one decision line.
    pub fn record(&mut self, record: &DecisionRecord) -> io::Result<()> {
        self.write_line(&ScanLine::Decision(record.clone()))?;
        self.records += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and return the file path.
    pub fn finish(mut self) -> io::Result<PathBuf> {
        self.writer.flush()?;
        debug!(path = %self.path.display(), records = self.records, "Scan log closed");
        Ok(self.path)
    }

    /// Newest scan log in `dir`, if any.
    pub fn latest(dir: &Path) -> io::Result<Option<PathBuf>> {
        if !dir.is_dir() {
            return Ok(None);
        }

        let mut names: Vec<String> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with("scan_") && name.ends_with(".jsonl"))
            .collect();

        // scan ids sort chronologically
        names.sort();
        Ok(names.pop().map(|name| dir.join(name)))
    }

    fn write_line(&mut self, line: &ScanLine) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, line)?;
        self.writer.write_all(b"\n")
    }
}

/// Read a scan log back, skipping lines that do not parse.
pub fn read_scan(path: &Path) -> io::Result<ScanFile> {
    let reader = BufReader::new(File::open(path)?);
    let mut scan = ScanFile::default();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<ScanLine>(&line) {
            Ok(ScanLine::Meta(meta)) => scan.meta = Some(meta),
            Ok(ScanLine::Decision(record)) => scan.decisions.push(record),
            Err(e) => warn!(
                path = %path.display(),
                line = number + 1,
                error = %e,
                "Skipping malformed scan log line"
            ),
        }
    }

    Ok(scan)
}
