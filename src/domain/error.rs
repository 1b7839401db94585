//! Domain error types and exit-code mapping.

/// Top-level error type for soltrader.
#[derive(Debug, thiserror::Error)]
pub enum TraderError {
    #[error("invalid price for {symbol}: {value}")]
    InvalidPrice { symbol: String, value: f64 },

    #[error("price feed unavailable: {reason}")]
    FeedUnavailable { reason: String },

    #[error("no swap quote available: {reason}")]
    QuoteUnavailable { reason: String },

    #[error("trade execution failed: {reason}")]
    ExecutionFailed { reason: String },

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

    #[error("price data error: {reason}")]
    PriceData { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TraderError> for std::process::ExitCode {
    fn from(err: &TraderError) -> Self {
        let code: u8 = match err {
            TraderError::Io(_) => 1,
            TraderError::ConfigParse { .. }
            | TraderError::ConfigMissing { .. }
            | TraderError::ConfigInvalid { .. } => 2,
            TraderError::PriceData { .. } | TraderError::InvalidPrice { .. } => 3,
            TraderError::FeedUnavailable { .. } => 4,
            TraderError::QuoteUnavailable { .. } | TraderError::ExecutionFailed { .. } => 5,
            TraderError::Report { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
