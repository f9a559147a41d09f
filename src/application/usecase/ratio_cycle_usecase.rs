// src/application/usecase/ratio_cycle_usecase.rs
// One fetch -> fetch -> evaluate -> (notify) cycle

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{FixedOffset, Offset, Utc};

use crate::application::service::{local_timestamp, render_alert};
use crate::domain::model::{CycleSummary, Instrument, QuoteResult, Thresholds};
use crate::domain::repository::{NotificationRepository, QuoteRepository};
use crate::domain::service::evaluate;

/// How the two quotes of a cycle are retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// One after the other with a pause in between, to stay under upstream rate limits.
    Sequential { pacing: Duration },
    /// Both at once; waits for both before evaluating.
    Concurrent,
}

impl Default for FetchStrategy {
    fn default() -> Self {
        FetchStrategy::Sequential {
            pacing: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CycleSettings {
    pub gold: Instrument,
    pub silver: Instrument,
    pub thresholds: Thresholds,
    pub strategy: FetchStrategy,
    /// Offset of the operator's wall clock, used in alert timestamps.
    pub utc_offset_minutes: i32,
}

impl CycleSettings {
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            gold: Instrument::gold(),
            silver: Instrument::silver(),
            thresholds: Thresholds::default(),
            strategy: FetchStrategy::default(),
            // IST
            utc_offset_minutes: 330,
        }
    }
}

/// Ratio monitoring use case
#[async_trait]
pub trait RatioCycleUseCase {
    async fn run_cycle(&self) -> CycleSummary;
}

pub struct RatioCycle {
    quotes: Arc<dyn QuoteRepository + Send + Sync>,
    notifier: Arc<dyn NotificationRepository + Send + Sync>,
    settings: CycleSettings,
}

impl RatioCycle {
    pub fn new(
        quotes: Arc<dyn QuoteRepository + Send + Sync>,
        notifier: Arc<dyn NotificationRepository + Send + Sync>,
        settings: CycleSettings,
    ) -> Self {
        Self {
            quotes,
            notifier,
            settings,
        }
    }

    async fn fetch_pair(&self) -> (QuoteResult, QuoteResult) {
        let gold = &self.settings.gold;
        let silver = &self.settings.silver;

        match self.settings.strategy {
            FetchStrategy::Sequential { pacing } => {
                let gold_quote = self.quotes.fetch_quote(gold).await;
                if !pacing.is_zero() {
                    tokio::time::sleep(pacing).await;
                }
                let silver_quote = self.quotes.fetch_quote(silver).await;
                (gold_quote, silver_quote)
            }
            FetchStrategy::Concurrent => {
                tokio::join!(self.quotes.fetch_quote(gold), self.quotes.fetch_quote(silver))
            }
        }
    }
}

#[async_trait]
impl RatioCycleUseCase for RatioCycle {
    async fn run_cycle(&self) -> CycleSummary {
        log::info!("Getting values");
        let (gold_quote, silver_quote) = self.fetch_pair().await;
        log::info!(
            "Got values - {}: {}, {}: {}",
            self.settings.gold,
            gold_quote.display(),
            self.settings.silver,
            silver_quote.display()
        );

        let mut summary = CycleSummary {
            au: gold_quote.display(),
            ag: silver_quote.display(),
            ratio: None,
        };

        let outcome = match evaluate(&gold_quote, &silver_quote, &self.settings.thresholds) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("Skipping ratio evaluation: {}", e);
                return summary;
            }
        };

        summary.ratio = outcome.ratio_display();

        if !outcome.signal.is_actionable() {
            log::info!(
                "Ratio {} within threshold, no alert",
                summary.ratio.as_deref().unwrap_or("n/a")
            );
            return summary;
        }

        let timestamp = local_timestamp(Utc::now(), self.settings.utc_offset());
        if let Some(message) =
            render_alert(&outcome, &self.settings.gold, &self.settings.silver, &timestamp)
        {
            log::info!(
                "{} signal at ratio {}, sending alert",
                outcome.signal,
                summary.ratio.as_deref().unwrap_or("n/a")
            );
            let delivery = self.notifier.send(&message).await;
            log::info!("Alert delivery: {:?}", delivery);
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AlertMessage, DeliveryOutcome};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct StubQuotes {
        quotes: HashMap<String, QuoteResult>,
        calls: Mutex<Vec<String>>,
    }

    impl StubQuotes {
        fn new(gold: QuoteResult, silver: QuoteResult) -> Self {
            let mut quotes = HashMap::new();
            quotes.insert("GOLDBEES".to_string(), gold);
            quotes.insert("SILVERBEES".to_string(), silver);
            Self {
                quotes,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl QuoteRepository for StubQuotes {
        async fn fetch_quote(&self, instrument: &Instrument) -> QuoteResult {
            self.calls.lock().unwrap().push(instrument.symbol().to_string());
            self.quotes
                .get(instrument.symbol())
                .cloned()
                .unwrap_or_else(|| QuoteResult::Error("unknown symbol".into()))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<AlertMessage>>,
    }

    #[async_trait]
    impl NotificationRepository for RecordingNotifier {
        async fn send(&self, message: &AlertMessage) -> DeliveryOutcome {
            self.sent.lock().unwrap().push(message.clone());
            DeliveryOutcome::Failed
        }
    }

    fn cycle(
        gold: QuoteResult,
        silver: QuoteResult,
        strategy: FetchStrategy,
    ) -> (RatioCycle, Arc<StubQuotes>, Arc<RecordingNotifier>) {
        let quotes = Arc::new(StubQuotes::new(gold, silver));
        let notifier = Arc::new(RecordingNotifier::default());
        let settings = CycleSettings {
            strategy,
            ..CycleSettings::default()
        };
        (
            RatioCycle::new(quotes.clone(), notifier.clone(), settings),
            quotes,
            notifier,
        )
    }

    fn price(s: &str) -> QuoteResult {
        QuoteResult::Price(s.to_string())
    }

    #[tokio::test]
    async fn alerting_cycle_notifies_and_reports_ratio() {
        let (cycle, _, notifier) = cycle(
            price("3105.20"),
            price("4436.00"),
            FetchStrategy::Concurrent,
        );

        let summary = cycle.run_cycle().await;

        assert_eq!(
            summary,
            CycleSummary {
                au: "3105.20".into(),
                ag: "4436.00".into(),
                ratio: Some("0.700".into()),
            }
        );
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].text.contains("BUY GOLD"));
    }

    #[tokio::test]
    async fn failed_delivery_does_not_change_summary() {
        let (cycle, _, notifier) =
            cycle(price("90"), price("100"), FetchStrategy::Concurrent);

        let summary = cycle.run_cycle().await;

        assert_eq!(summary.ratio.as_deref(), Some("0.900"));
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn ratio_just_above_threshold_does_not_alert() {
        let (cycle, _, notifier) = cycle(
            price("3105.50"),
            price("4436.00"),
            FetchStrategy::Concurrent,
        );

        let summary = cycle.run_cycle().await;

        assert_eq!(summary.ratio.as_deref(), Some("0.700"));
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_error_skips_ratio_and_alert() {
        let (cycle, _, notifier) = cycle(
            QuoteResult::Error("HTTP 500".into()),
            price("4436.00"),
            FetchStrategy::Concurrent,
        );

        let summary = cycle.run_cycle().await;

        assert_eq!(summary.au, "ERR: HTTP 500");
        assert_eq!(summary.ag, "4436.00");
        assert_eq!(summary.ratio, None);
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn sequential_strategy_paces_fetches() {
        let pacing = Duration::from_secs(1);
        let (cycle, quotes, _) = cycle(
            price("75"),
            price("100"),
            FetchStrategy::Sequential { pacing },
        );

        let started = tokio::time::Instant::now();
        let summary = cycle.run_cycle().await;

        assert!(started.elapsed() >= pacing);
        assert_eq!(summary.ratio.as_deref(), Some("0.750"));
        assert_eq!(
            *quotes.calls.lock().unwrap(),
            vec!["GOLDBEES".to_string(), "SILVERBEES".to_string()]
        );
    }
}
