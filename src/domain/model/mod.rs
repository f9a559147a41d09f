// src/domain/model/mod.rs
// Core domain models

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::errors::FetchError;

pub const GOLD_SYMBOL: &str = "GOLDBEES";
pub const SILVER_SYMBOL: &str = "SILVERBEES";

/// A tracked exchange symbol. Only built from the fixed symbols, so never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Instrument(String);

impl Instrument {
    pub fn gold() -> Self {
        Self(GOLD_SYMBOL.to_string())
    }

    pub fn silver() -> Self {
        Self(SILVER_SYMBOL.to_string())
    }

    pub fn symbol(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of one quote fetch: the upstream price text, or why there is none.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteResult {
    Price(String),
    Error(String),
}

impl QuoteResult {
    /// Caller-facing text: prices verbatim, errors prefixed with `ERR: `.
    pub fn display(&self) -> String {
        match self {
            QuoteResult::Price(price) => price.clone(),
            QuoteResult::Error(reason) => format!("ERR: {}", reason),
        }
    }
}

impl From<Result<String, FetchError>> for QuoteResult {
    fn from(result: Result<String, FetchError>) -> Self {
        match result {
            Ok(price) => QuoteResult::Price(price),
            Err(e) => QuoteResult::Error(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    None,
    BuyGold,
    BuySilver,
}

impl Signal {
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Signal::None)
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Signal::None => write!(f, "HOLD"),
            Signal::BuyGold => write!(f, "BUY GOLD"),
            Signal::BuySilver => write!(f, "BUY SILVER"),
        }
    }
}

/// Ratio alert thresholds. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub buy_gold_at: Decimal,
    pub buy_silver_at: Decimal,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            buy_gold_at: Decimal::new(7, 1),
            buy_silver_at: Decimal::new(8, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatioOutcome {
    pub gold_price: Decimal,
    pub silver_price: Decimal,
    /// `None` when the silver price is zero.
    pub ratio: Option<Decimal>,
    pub signal: Signal,
}

impl RatioOutcome {
    pub fn ratio_display(&self) -> Option<String> {
        self.ratio.map(format_ratio)
    }
}

/// Rounds half away from zero to three places, padding with zeros.
pub fn format_ratio(ratio: Decimal) -> String {
    let rounded = ratio.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.3}", rounded)
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertMessage {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed,
    /// No credentials configured; nothing was sent.
    Disabled,
}

impl DeliveryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }
}

/// What a cycle reports back to its trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleSummary {
    pub au: String,
    pub ag: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ratio: Option<String>,
}
