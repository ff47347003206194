//! Domain error types.

/// Top-level error type for strategy-lab.
#[derive(Debug, thiserror::Error)]
pub enum LabError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown strategy: {name}")]
    UnknownStrategy { name: String },

    #[error("no {kind} column found in header")]
    MissingColumn { kind: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no usable price rows in {source_name}")]
    NoData { source_name: String },

    #[error("price series is empty")]
    EmptySeries,

    #[error("non-finite price at row {index}")]
    NonFinitePrice { index: usize },

    #[error("position series length {positions} does not match price series length {prices}")]
    LengthMismatch { prices: usize, positions: usize },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&LabError> for std::process::ExitCode {
    fn from(err: &LabError) -> Self {
        let code: u8 = match err {
            LabError::Io(_) | LabError::Csv(_) => 1,
            LabError::ConfigParse { .. }
            | LabError::ConfigMissing { .. }
            | LabError::ConfigInvalid { .. }
            | LabError::UnknownStrategy { .. } => 2,
            LabError::MissingColumn { .. } | LabError::Data { .. } | LabError::NoData { .. } => 3,
            LabError::EmptySeries | LabError::NonFinitePrice { .. } => 4,
            LabError::LengthMismatch { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
