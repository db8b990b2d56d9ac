use thiserror::Error;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised when parsing user-supplied values into domain types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown history period: {0} (expected one of 1d, 5d, 1mo, 6mo, 1y, max)")]
    UnknownPeriod(String),

    #[error("ticker symbol must be non-empty")]
    EmptySymbol,
}
