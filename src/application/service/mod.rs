// src/application/service/mod.rs
// Alert message rendering

use chrono::{DateTime, FixedOffset, Utc};

use crate::domain::model::{format_ratio, AlertMessage, Instrument, RatioOutcome, Signal};

/// Alert timestamps use the operator's wall clock, `dd/mm/YYYY, HH:MM:SS`.
pub fn local_timestamp(now: DateTime<Utc>, offset: FixedOffset) -> String {
    now.with_timezone(&offset)
        .format("%d/%m/%Y, %H:%M:%S")
        .to_string()
}

/// Build the HTML alert for an actionable outcome. Returns `None` when there is
/// nothing to alert on.
pub fn render_alert(
    outcome: &RatioOutcome,
    gold: &Instrument,
    silver: &Instrument,
    timestamp: &str,
) -> Option<AlertMessage> {
    let ratio = outcome.ratio?;
    let action = match outcome.signal {
        Signal::BuyGold => "Gold is cheap relative to silver",
        Signal::BuySilver => "Silver is cheap relative to gold",
        Signal::None => return None,
    };

    let text = format!(
        "<b>🚨 Gold/Silver Ratio Alert</b>\n\n\
         🟡 <b>{gold}</b>: ₹{gold_price}\n\
         ⚪ <b>{silver}</b>: ₹{silver_price}\n\
         📊 <b>Ratio</b>: {ratio}\n\n\
         👉 <b>{signal}</b> ({action})\n\
         🕒 {timestamp}",
        gold = gold,
        gold_price = outcome.gold_price,
        silver = silver,
        silver_price = outcome.silver_price,
        ratio = format_ratio(ratio),
        signal = outcome.signal,
        action = action,
        timestamp = timestamp,
    );

    Some(AlertMessage { text })
}
