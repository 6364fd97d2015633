//! CSV price files.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, warn};

use tailrisk_core::{PricePoint, PriceSeries, PriceSource, SourceError};

/// Header names accepted for the date column.
const DATE_COLUMNS: &[&str] = &["date"];

/// Header names accepted for the price column, in order of preference.
const PRICE_COLUMNS: &[&str] = &["adj_close", "adjclose", "close"];

/// Cell values treated as a missing observation.
const MISSING: &[&str] = &["", "null", "nan", "na"];

// =============================================================================
// CSV PARSING
// =============================================================================

/// Lower-cases a header and maps spaces to underscores ("Adj Close" -> "adj_close").
fn normalize_header(header: &str) -> String {
    header.trim().to_ascii_lowercase().replace(' ', "_")
}

fn find_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
    candidates
        .iter()
        .find_map(|name| normalized.iter().position(|h| h == name))
}

/// Reads a price history from CSV.
///
/// The header must contain a `date` column (`YYYY-MM-DD`) and a price
/// column named `adj_close`, `Adj Close` or `close`; when several are
/// present the adjusted close wins. Rows with a missing price (empty,
/// `null`, `NaN`) are skipped. Rows are sorted by date.
///
/// # Errors
///
/// Returns `SourceError::ParseError` for a missing column or an unparseable
/// cell, and `SourceError::InvalidSeries` when the rows do not form a valid
/// series (non-positive price, duplicate date).
pub fn read_price_csv<R: Read>(reader: R, ticker: &str) -> Result<Option<PriceSeries>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| SourceError::ParseError(format!("{ticker}: {e}")))?
        .clone();

    let date_col = find_column(&headers, DATE_COLUMNS)
        .ok_or_else(|| SourceError::ParseError(format!("{ticker}: missing 'date' column")))?;
    let price_col = find_column(&headers, PRICE_COLUMNS).ok_or_else(|| {
        SourceError::ParseError(format!("{ticker}: missing 'adj_close' or 'close' column"))
    })?;

    let mut points = Vec::new();
    let mut skipped = 0usize;

    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| SourceError::ParseError(format!("{ticker}: {e}")))?;
        // header is line 1
        let line = row + 2;

        let date_cell = record.get(date_col).unwrap_or_default();
        let price_cell = record.get(price_col).unwrap_or_default();

        if MISSING.contains(&price_cell.to_ascii_lowercase().as_str()) {
            skipped += 1;
            continue;
        }

        let date = NaiveDate::parse_from_str(date_cell, "%Y-%m-%d").map_err(|e| {
            SourceError::ParseError(format!("{ticker} line {line}: bad date '{date_cell}': {e}"))
        })?;
        let price: f64 = price_cell.parse().map_err(|e| {
            SourceError::ParseError(format!("{ticker} line {line}: bad price '{price_cell}': {e}"))
        })?;

        points.push(PricePoint::new(date, price));
    }

    if skipped > 0 {
        warn!(ticker, skipped, "Skipped rows without a price");
    }

    if points.is_empty() {
        return Ok(None);
    }

    points.sort_by_key(|p| p.date);
    PriceSeries::new(points)
        .map(Some)
        .map_err(|source| SourceError::InvalidSeries {
            ticker: ticker.to_string(),
            source,
        })
}

fn validate_ticker(ticker: &str) -> Result<(), SourceError> {
    let valid = !ticker.is_empty()
        && ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '^' | '='))
        && !ticker.contains("..");
    if valid {
        Ok(())
    } else {
        Err(SourceError::ParseError(format!("invalid ticker '{ticker}'")))
    }
}

// =============================================================================
// CSV PRICE SOURCE
// =============================================================================

#[derive(Debug, Clone)]
enum Location {
    Directory(PathBuf),
    File(PathBuf),
}

/// CSV-backed price source.
///
/// In directory mode each ticker is read from `<dir>/<TICKER>.csv` (the
/// ticker as given, then upper-cased). In single-file mode every ticker is
/// served from the same file.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    location: Location,
}

impl CsvPriceSource {
    /// Create a source reading one file per ticker from `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            location: Location::Directory(dir.as_ref().to_path_buf()),
        }
    }

    /// Create a source serving every ticker from a single file.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            location: Location::File(path.as_ref().to_path_buf()),
        }
    }

    /// Path the given ticker is read from, if it exists.
    pub fn path_for(&self, ticker: &str) -> Result<Option<PathBuf>, SourceError> {
        match &self.location {
            Location::File(path) => Ok(path.exists().then(|| path.clone())),
            Location::Directory(dir) => {
                validate_ticker(ticker)?;
                let exact = dir.join(format!("{ticker}.csv"));
                if exact.exists() {
                    return Ok(Some(exact));
                }
                let upper = dir.join(format!("{}.csv", ticker.to_ascii_uppercase()));
                Ok(upper.exists().then_some(upper))
            }
        }
    }
}

impl PriceSource for CsvPriceSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<PriceSeries>, SourceError> {
        let Some(path) = self.path_for(ticker)? else {
            debug!(ticker, "No price file found");
            return Ok(None);
        };

        debug!(ticker, path = %path.display(), "Reading price file");
        let file = std::fs::File::open(&path)?;
        let Some(series) = read_price_csv(file, ticker)? else {
            return Ok(None);
        };

        let total = series.len();
        let window = series.between(start, end);
        debug!(
            ticker,
            total,
            in_range = window.as_ref().map_or(0, PriceSeries::len),
            %start,
            %end,
            "Loaded price history"
        );
        Ok(window)
    }
}
