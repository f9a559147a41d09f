// src/application/dto/mod.rs
// Wire formats for the market data and messaging providers

pub mod parser;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Chart endpoint payload. Only the fields used for pricing are modelled.
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: Option<ChartMeta>,
    #[serde(default)]
    pub indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
pub struct ChartMeta {
    /// Current market price
    #[serde(rename = "regularMarketPrice", default)]
    pub regular_market_price: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteIndicator>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteIndicator {
    /// Historical closes, `null` for intervals without trades
    #[serde(default)]
    pub close: Vec<Option<Value>>,
}

/// Telegram `sendMessage` request body.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    pub parse_mode: &'a str,
}

impl<'a> SendMessageRequest<'a> {
    pub fn html(chat_id: &'a str, text: &'a str) -> Self {
        Self {
            chat_id,
            text,
            parse_mode: "HTML",
        }
    }
}
