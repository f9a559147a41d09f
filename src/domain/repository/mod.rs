// src/domain/repository/mod.rs
// Ports implemented by the infrastructure layer

use async_trait::async_trait;

use crate::domain::model::{AlertMessage, DeliveryOutcome, Instrument, QuoteResult};

/// Source of latest prices.
///
/// Implementations never fail: every problem is folded into `QuoteResult::Error`.
#[async_trait]
pub trait QuoteRepository {
    async fn fetch_quote(&self, instrument: &Instrument) -> QuoteResult;
}

/// Best-effort alert delivery.
#[async_trait]
pub trait NotificationRepository {
    async fn send(&self, message: &AlertMessage) -> DeliveryOutcome;
}
