// src/domain/mod.rs
pub mod errors;
pub mod model;
pub mod repository;
pub mod service;

// Re-export common types for convenience
pub use errors::{AppError, AppResult, EvaluationError, FetchError};
pub use model::{
    AlertMessage, CycleSummary, DeliveryOutcome, Instrument, QuoteResult, RatioOutcome, Signal,
    Thresholds,
};
