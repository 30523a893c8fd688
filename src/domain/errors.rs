use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised while analyzing a market data series
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Insufficient data: need at least {need} samples, got {got}")]
    InsufficientData { need: usize, got: usize },

    #[error("Invalid record at {timestamp}: {reason}")]
    InvalidRecord {
        timestamp: DateTime<Utc>,
        reason: String,
    },

    #[error("Series failed validation: {invalid} invalid sample(s)")]
    CorruptSeries { invalid: usize },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}
