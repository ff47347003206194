//! Core domain types and logic.

pub mod price_series;
pub mod indicator;
pub mod strategy;
pub mod signal;
pub mod position;
pub mod backtest;
pub mod metrics;
pub mod comparison;
pub mod lab_config;
pub mod config_validation;
pub mod pipeline;
pub mod error;
