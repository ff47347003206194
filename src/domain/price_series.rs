//! Daily price series representation.

use chrono::NaiveDate;

use crate::domain::error::LabError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// A validated, date-ordered sequence of daily prices. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Sorts by date (stable, so duplicate dates keep their input order) and
    /// rejects empty input or non-finite prices.
    pub fn new(mut points: Vec<PricePoint>) -> Result<Self, LabError> {
        if points.is_empty() {
            return Err(LabError::EmptySeries);
        }
        if let Some(index) = points.iter().position(|p| !p.price.is_finite()) {
            return Err(LabError::NonFinitePrice { index });
        }
        points.sort_by_key(|p| p.date);
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed series; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn price(&self, index: usize) -> f64 {
        self.points[index].price
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.points[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.points[self.points.len() - 1].date
    }

    /// `price[i] / price[i-1] - 1`; undefined at index 0.
    pub fn daily_returns(&self) -> Vec<Option<f64>> {
        let mut returns = Vec::with_capacity(self.points.len());
        returns.push(None);
        for w in self.points.windows(2) {
            let prev = w[0].price;
            let curr = w[1].price;
            let r = curr / prev - 1.0;
            returns.push(if r.is_finite() { Some(r) } else { None });
        }
        returns
    }
}
