// src/domain/errors.rs
use thiserror::Error;

/// Failures while retrieving a single quote.
///
/// The `Display` output is the reason carried by `QuoteResult::Error`, so it is
/// what the HTTP caller eventually sees after the `ERR: ` prefix.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("{0}")]
    Transport(String),

    #[error("timeout")]
    Timeout,

    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("HTTP 429")]
    RateLimited,

    #[error("{0}")]
    Parse(String),

    #[error("price not found")]
    PriceNotFound,
}

impl From<hyper::Error> for FetchError {
    fn from(error: hyper::Error) -> Self {
        FetchError::Transport(error.to_string())
    }
}

impl From<hyper::http::Error> for FetchError {
    fn from(error: hyper::http::Error) -> Self {
        FetchError::Transport(error.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::Parse(error.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("Incomplete data: {0}")]
    IncompleteData(String),

    #[error("Invalid price: {0:?}")]
    InvalidPrice(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(#[from] hyper::Error),
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
pub type FetchResult<T> = Result<T, FetchError>;
pub type EvaluationResult<T> = Result<T, EvaluationError>;
