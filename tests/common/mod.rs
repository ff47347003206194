#![allow(dead_code)]

use chrono::NaiveDate;
use strategy_lab::domain::error::LabError;
use strategy_lab::domain::indicator::{IndicatorParams, IndicatorSet};
use strategy_lab::domain::price_series::{PricePoint, PriceSeries};
use strategy_lab::ports::data_port::DataPort;

pub struct MockDataPort {
    pub points: Vec<PricePoint>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            error: None,
        }
    }

    pub fn with_prices(mut self, start: &str, prices: &[f64]) -> Self {
        self.points = make_points(start, prices);
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn load_prices(&self) -> Result<PriceSeries, LabError> {
        if let Some(reason) = &self.error {
            return Err(LabError::Data {
                reason: reason.clone(),
            });
        }
        if self.points.is_empty() {
            return Err(LabError::NoData {
                source_name: "mock".into(),
            });
        }
        PriceSeries::new(self.points.clone())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Consecutive calendar days starting at `start`.
pub fn make_points(start: &str, prices: &[f64]) -> Vec<PricePoint> {
    let start = parse_date(start);
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| PricePoint {
            date: start + chrono::Duration::days(i as i64),
            price,
        })
        .collect()
}

pub fn make_series(prices: &[f64]) -> PriceSeries {
    PriceSeries::new(make_points("2024-01-01", prices)).unwrap()
}

/// Deterministic zig-zag around an upward drift; long enough for every window.
pub fn generate_prices(count: usize, start_price: f64) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let drift = i as f64 * 0.15;
            let wave = ((i % 11) as f64 - 5.0) * 0.8;
            start_price + drift + wave
        })
        .collect()
}

pub fn small_params() -> IndicatorParams {
    IndicatorParams {
        ma_short_window: 5,
        ma_long_window: 20,
        rsi_period: 5,
    }
}

pub fn compute_indicators(series: &PriceSeries, params: &IndicatorParams) -> IndicatorSet {
    IndicatorSet::compute(series, params)
}

pub fn csv_text(start: &str, prices: &[f64]) -> String {
    let mut out = String::from("Date,Open,High,Low,Close,Volume\n");
    for p in make_points(start, prices) {
        out.push_str(&format!(
            "{},{:.2},{:.2},{:.2},{},1000\n",
            p.date,
            p.price,
            p.price,
            p.price,
            p.price
        ));
    }
    out
}
