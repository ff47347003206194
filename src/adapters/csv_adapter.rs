//! CSV file price data adapter.
//!
//! Accepts any table with a date column and a close/price column. Headers are
//! matched by substring, rows that fail to parse are dropped, and the result is
//! sorted by date with one row per date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::path::PathBuf;

use crate::domain::error::LabError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::ports::data_port::DataPort;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%m/%d/%Y", "%d-%b-%Y", "%Y%m%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DataPort for CsvAdapter {
    fn load_prices(&self) -> Result<PriceSeries, LabError> {
        let file = std::fs::File::open(&self.path).map_err(|e| LabError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let points = read_price_points(file)?;
        if points.is_empty() {
            return Err(LabError::NoData {
                source_name: self.path.display().to_string(),
            });
        }
        tracing::info!(
            path = %self.path.display(),
            observations = points.len(),
            "price data loaded"
        );
        PriceSeries::new(points)
    }
}

/// Parses rows from any CSV reader, dropping rows whose date or price does not parse.
pub fn read_price_points<R: std::io::Read>(reader: R) -> Result<Vec<PricePoint>, LabError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let (date_col, price_col) = detect_columns(&headers)?;

    let mut points = Vec::new();
    let mut dropped = 0usize;

    for result in rdr.records() {
        let record = result?;
        let date = record.get(date_col).and_then(parse_date);
        let price = record
            .get(price_col)
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|p| p.is_finite());

        match (date, price) {
            (Some(date), Some(price)) => points.push(PricePoint { date, price }),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::warn!(dropped, kept = points.len(), "dropped unparseable rows");
    }

    points.sort_by_key(|p| p.date);
    Ok(dedup_dates(points))
}

/// Collapses repeated dates to the last row read for each date. Expects
/// `points` stably sorted by date.
fn dedup_dates(points: Vec<PricePoint>) -> Vec<PricePoint> {
    let total = points.len();
    let mut out: Vec<PricePoint> = Vec::with_capacity(total);
    for point in points {
        match out.last_mut() {
            Some(last) if last.date == point.date => *last = point,
            _ => out.push(point),
        }
    }
    if out.len() < total {
        tracing::warn!(duplicates = total - out.len(), "collapsed duplicate dates");
    }
    out
}

/// First header containing "date"; last header containing "close" or "price".
pub fn detect_columns(headers: &[String]) -> Result<(usize, usize), LabError> {
    let lower: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

    let date_col = lower
        .iter()
        .position(|h| h.contains("date"))
        .ok_or_else(|| LabError::MissingColumn {
            kind: "date".into(),
        })?;
    let price_col = lower
        .iter()
        .rposition(|h| h.contains("close") || h.contains("price"))
        .ok_or_else(|| LabError::MissingColumn {
            kind: "close/price".into(),
        })?;

    Ok((date_col, price_col))
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
