// src/application/dto/parser.rs
// Price extraction from chart payloads

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use super::{ChartResponse, ChartResult};
use crate::domain::errors::{FetchError, FetchResult};

/// Parse a chart response body into its price text.
pub fn parse_chart_price(body: &[u8]) -> FetchResult<String> {
    let response: ChartResponse = serde_json::from_slice(body)?;

    if let Some(error) = &response.chart.error {
        if !error.is_null() {
            log::debug!("Chart payload carries error: {}", error);
        }
    }

    response
        .chart
        .result
        .as_ref()
        .and_then(|results| results.first())
        .and_then(extract_price)
        .ok_or(FetchError::PriceNotFound)
}

/// Current market price first, otherwise the last non-null historical close.
pub fn extract_price(result: &ChartResult) -> Option<String> {
    let market_price = result
        .meta
        .as_ref()
        .and_then(|meta| meta.regular_market_price.as_ref())
        .and_then(value_text);

    market_price.or_else(|| {
        result
            .indicators
            .as_ref()
            .and_then(|indicators| indicators.quote.first())
            .and_then(|quote| {
                quote
                    .close
                    .iter()
                    .rev()
                    .find_map(|close| close.as_ref().and_then(value_text))
            })
    })
}

// Numbers keep their source text (arbitrary_precision), so "3105.50" stays "3105.50".
// Exponent forms are expanded to plain decimal text.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => number_text(&n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn number_text(raw: &str) -> Option<String> {
    if raw.contains(['e', 'E']) {
        return Decimal::from_scientific(raw).ok().map(|d| d.to_string());
    }
    Decimal::from_str(raw).ok().map(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_price_takes_priority() {
        let body = br#"{"chart":{"result":[{
            "meta":{"regularMarketPrice":3105.50},
            "indicators":{"quote":[{"close":[3000.1,3001.2]}]}
        }],"error":null}}"#;
        assert_eq!(parse_chart_price(body).unwrap(), "3105.50");
    }

    #[test]
    fn falls_back_to_last_non_null_close() {
        let body = br#"{"chart":{"result":[{
            "meta":{},
            "indicators":{"quote":[{"close":[4430.25,4436.00,null,null]}]}
        }],"error":null}}"#;
        assert_eq!(parse_chart_price(body).unwrap(), "4436.00");
    }

    #[test]
    fn null_market_price_uses_close() {
        let body = br#"{"chart":{"result":[{
            "meta":{"regularMarketPrice":null},
            "indicators":{"quote":[{"close":[null,88.4]}]}
        }]}}"#;
        assert_eq!(parse_chart_price(body).unwrap(), "88.4");
    }

    #[test]
    fn exponent_prices_are_expanded() {
        let body = br#"{"chart":{"result":[{"meta":{"regularMarketPrice":3.1055e3}}]}}"#;
        assert_eq!(parse_chart_price(body).unwrap(), "3105.5");

        let close = br#"{"chart":{"result":[{
            "meta":{},
            "indicators":{"quote":[{"close":[4.436E+3,null]}]}
        }]}}"#;
        assert_eq!(parse_chart_price(close).unwrap(), "4436");
    }

    #[test]
    fn missing_price_is_reported() {
        let body = br#"{"chart":{"result":[{
            "meta":{},
            "indicators":{"quote":[{"close":[null,null]}]}
        }],"error":null}}"#;
        assert_eq!(parse_chart_price(body).unwrap_err(), FetchError::PriceNotFound);

        let empty = br#"{"chart":{"result":null,"error":{"code":"Not Found"}}}"#;
        assert_eq!(parse_chart_price(empty).unwrap_err(), FetchError::PriceNotFound);
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        let err = parse_chart_price(b"<html>blocked</html>").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}
