//! Domain error types.

/// Top-level error type for chartmill.
#[derive(Debug, thiserror::Error)]
pub enum ChartmillError {
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

    #[error("no data for symbol {symbol}")]
    DataUnavailable { symbol: String },

    #[error("algorithm '{name}' not found")]
    AlgorithmNotFound { name: String },

    #[error("invalid range: {reason}")]
    InvalidRange { reason: String },

    #[error("computation error in {stage}: {reason}")]
    Computation { stage: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ChartmillError> for std::process::ExitCode {
    fn from(err: &ChartmillError) -> Self {
        let code: u8 = match err {
            ChartmillError::Io(_) => 1,
            ChartmillError::ConfigParse { .. }
            | ChartmillError::ConfigMissing { .. }
            | ChartmillError::ConfigInvalid { .. } => 2,
            ChartmillError::Computation { .. } => 3,
            ChartmillError::InvalidRange { .. } => 4,
            ChartmillError::DataUnavailable { .. } | ChartmillError::AlgorithmNotFound { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
