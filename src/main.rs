// src/main.rs
use std::sync::Arc;

use ratio_alert::adapter::http_server::{self, SharedCycle};
use ratio_alert::adapter::scheduler::spawn_schedule;
use ratio_alert::application::usecase::RatioCycle;
use ratio_alert::config::Config;
use ratio_alert::domain::errors::AppResult;
use ratio_alert::infrastructure::https_client;
use ratio_alert::infrastructure::market::YahooQuoteRepository;
use ratio_alert::infrastructure::notifier::TelegramNotifier;

use tokio::signal::ctrl_c;

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    config.init_logging()?;

    log::info!("Starting ratio_alert v{}", env!("CARGO_PKG_VERSION"));
    log::info!(
        "Tracking {} / {}, strategy {:?}",
        config.cycle.gold,
        config.cycle.silver,
        config.cycle.strategy
    );
    if !config.alerting_enabled() {
        log::warn!("TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID missing, alerts are disabled");
    }

    // Outbound adapters share one connection pool
    let client = https_client();
    let quotes = Arc::new(YahooQuoteRepository::new(client.clone(), config.market.clone()));
    let notifier = Arc::new(TelegramNotifier::new(client, config.telegram.clone()));

    let cycle: SharedCycle = Arc::new(RatioCycle::new(quotes, notifier, config.cycle.clone()));

    let schedule = config.schedule_interval.map(|period| {
        log::info!("Scheduled trigger every {}s", period.as_secs());
        spawn_schedule(cycle.clone(), period)
    });

    let shutdown = async {
        if let Err(e) = ctrl_c().await {
            log::error!("Failed to listen for control-c event: {}", e);
            std::future::pending::<()>().await;
        }
        log::info!("Shutting down...");
    };

    http_server::serve(config.server.bind_addr, cycle, shutdown).await?;

    if let Some(handle) = schedule {
        handle.abort();
    }

    log::info!("Shutdown complete. Goodbye!");
    Ok(())
}
