// src/domain/service/mod.rs
// Gold/silver ratio evaluation

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::errors::{EvaluationError, EvaluationResult};
use crate::domain::model::{QuoteResult, RatioOutcome, Signal, Thresholds};

/// Parse a quoted price, ignoring everything but digits and the decimal point
/// (currency symbols, thousands separators, whitespace).
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Classify a ratio against the thresholds. Comparisons are inclusive.
pub fn classify(ratio: Decimal, thresholds: &Thresholds) -> Signal {
    if ratio <= thresholds.buy_gold_at {
        Signal::BuyGold
    } else if ratio >= thresholds.buy_silver_at {
        Signal::BuySilver
    } else {
        Signal::None
    }
}

/// Derive the ratio outcome for one cycle.
///
/// Fails when either quote is missing or unparseable. A zero silver price is
/// not a failure: it yields an outcome without ratio and without signal.
pub fn evaluate(
    gold: &QuoteResult,
    silver: &QuoteResult,
    thresholds: &Thresholds,
) -> EvaluationResult<RatioOutcome> {
    let (gold_raw, silver_raw) = match (gold, silver) {
        (QuoteResult::Price(g), QuoteResult::Price(s)) => (g, s),
        _ => {
            return Err(EvaluationError::IncompleteData(format!(
                "gold={}, silver={}",
                gold.display(),
                silver.display()
            )))
        }
    };

    let gold_price =
        parse_price(gold_raw).ok_or_else(|| EvaluationError::InvalidPrice(gold_raw.clone()))?;
    let silver_price =
        parse_price(silver_raw).ok_or_else(|| EvaluationError::InvalidPrice(silver_raw.clone()))?;

    let ratio = gold_price.checked_div(silver_price);
    let signal = ratio
        .map(|r| classify(r, thresholds))
        .unwrap_or(Signal::None);

    Ok(RatioOutcome {
        gold_price,
        silver_price,
        ratio,
        signal,
    })
}
