//! Position series: fraction of capital invested at each date's close.

/// Per-date exposure in `[0, 1]`, aligned to a price series.
///
/// Finite values outside the range are clamped on construction, so equity can
/// never fall below zero. Non-finite values are "undefined": they contribute
/// nothing to returns and count as flat for edge detection.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSeries {
    values: Vec<f64>,
}

impl PositionSeries {
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| if v.is_finite() { v.clamp(0.0, 1.0) } else { f64::NAN })
            .collect();
        Self { values }
    }

    /// Constant exposure over `len` dates.
    pub fn constant(value: f64, len: usize) -> Self {
        Self::new(vec![value; len])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Position at `index`, `None` when undefined or out of range.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().filter(|v| v.is_finite())
    }

    pub fn has_defined_values(&self) -> bool {
        self.values.iter().any(|v| v.is_finite())
    }

    /// Indices where exposure rises from flat (≤ 0) to invested. The position
    /// before the first date is taken as 0, so a series invested from day one
    /// has an entry at index 0.
    pub fn entries(&self) -> Vec<usize> {
        let mut prev = 0.0;
        let mut out = Vec::new();
        for (i, &v) in self.values.iter().enumerate() {
            let curr = flat_if_undefined(v);
            if curr > 0.0 && prev <= 0.0 {
                out.push(i);
            }
            prev = curr;
        }
        out
    }

    /// Indices where exposure drops from invested back to flat.
    pub fn exits(&self) -> Vec<usize> {
        let mut prev = 0.0;
        let mut out = Vec::new();
        for (i, &v) in self.values.iter().enumerate() {
            let curr = flat_if_undefined(v);
            if curr <= 0.0 && prev > 0.0 {
                out.push(i);
            }
            prev = curr;
        }
        out
    }

    pub fn trade_count(&self) -> usize {
        self.entries().len()
    }
}

fn flat_if_undefined(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
