//! CSV price source.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use std::path::{Path, PathBuf};
use swing_core::error::DataError;
use swing_core::traits::PriceSource;
use swing_core::types::{PriceBar, PriceSeries};
use tracing::{debug, warn};

/// Header names accepted for the date column, in priority order.
///
/// `Price` is the legacy export layout whose first rows hold ticker
/// metadata instead of dates; those rows fail date parsing and are skipped.
const DATE_HEADERS: [&[&str]; 3] = [&["Date", "date", "Datetime"], &["Price"], &["Unnamed: 0"]];

const PRICE_COLUMNS: [&str; 5] = ["Open", "High", "Low", "Close", "Volume"];

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, DataError> {
        let date = DATE_HEADERS
            .iter()
            .find_map(|names| {
                headers
                    .iter()
                    .position(|h| names.contains(&h.trim()))
            })
            .ok_or(DataError::NoDateColumn)?;

        let mut positions = [0usize; 5];
        for (slot, name) in positions.iter_mut().zip(PRICE_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))?;
        }

        Ok(Self {
            date,
            open: positions[0],
            high: positions[1],
            low: positions[2],
            close: positions[3],
            volume: positions[4],
        })
    }

    fn parse(&self, record: &StringRecord) -> Option<PriceBar> {
        let date = parse_date(record.get(self.date)?)?;
        let number = |idx: usize| -> Option<f64> {
            let value: f64 = record.get(idx)?.trim().parse().ok()?;
            value.is_finite().then_some(value)
        };

        Some(PriceBar::new(
            date,
            number(self.open)?,
            number(self.high)?,
            number(self.low)?,
            number(self.close)?,
            number(self.volume)?.max(0.0) as u64,
        ))
    }
}

/// Parse the date formats seen in daily exports.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }

    // Exports with an exchange offset, e.g. "2024-01-02 00:00:00+05:30"
    DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.date_naive())
}

/// Daily OHLCV history stored in a single CSV file.
pub struct CsvPriceSource {
    path: PathBuf,
}

impl CsvPriceSource {
    /// Create a source for an existing file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DataError::FileNotFound(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and clean the file into a series for `symbol`.
    ///
    /// Unparseable rows are skipped, rows with non-positive prices are
    /// dropped, and for duplicate dates the last row in the file wins.
    pub fn load(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| DataError::Csv(e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| DataError::Csv(e.to_string()))?
            .clone();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(DataError::Empty);
        }
        let columns = Columns::resolve(&headers)?;

        let mut rows = 0usize;
        let mut skipped = 0usize;
        let mut bars = Vec::new();

        for result in reader.records() {
            let record = result.map_err(|e| DataError::Csv(e.to_string()))?;
            rows += 1;

            let Some(bar) = columns.parse(&record) else {
                skipped += 1;
                continue;
            };

            if !bar.has_valid_prices() {
                warn!(symbol, date = %bar.date, "Dropping row with non-positive price");
                skipped += 1;
                continue;
            }

            bars.push(bar);
        }

        if rows == 0 {
            return Err(DataError::Empty);
        }

        // stable: for equal dates, file order is preserved
        bars.sort_by_key(|b| b.date);
        let mut cleaned: Vec<PriceBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match cleaned.last_mut() {
                Some(prev) if prev.date == bar.date => *prev = bar,
                _ => cleaned.push(bar),
            }
        }

        debug!(
            symbol,
            path = %self.path.display(),
            rows,
            skipped,
            bars = cleaned.len(),
            "Loaded price history"
        );

        PriceSeries::new(symbol, cleaned)
    }
}

/// Find the CSV for `symbol` in `dir`.
///
/// Tries `{SYM}_NS.csv`, `{SYM}.csv`, `{sym}.csv` and `{SYM}_daily.csv`.
pub fn resolve_data_file(dir: impl AsRef<Path>, symbol: &str) -> Option<PathBuf> {
    let dir = dir.as_ref();
    let upper = symbol.to_uppercase();
    let lower = symbol.to_lowercase();

    [
        format!("{}_NS.csv", upper),
        format!("{}.csv", upper),
        format!("{}.csv", lower),
        format!("{}_daily.csv", upper),
    ]
    .into_iter()
    .map(|name| dir.join(name))
    .find(|path| path.is_file())
}

/// Loads symbols from per-symbol CSV files in one directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PriceSource for DirectorySource {
    fn load(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        let path = resolve_data_file(&self.dir, symbol).ok_or_else(|| {
            DataError::FileNotFound(
                self.dir
                    .join(format!("{}_NS.csv", symbol.to_uppercase()))
                    .display()
                    .to_string(),
            )
        })?;
        CsvPriceSource::new(path)?.load(symbol)
    }
}
