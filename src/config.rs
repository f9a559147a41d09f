// src/config.rs
use crate::application::usecase::{CycleSettings, FetchStrategy};
use crate::domain::errors::{AppError, AppResult};
use dotenv::dotenv;
use std::env;
use std::fs::File;
use std::net::SocketAddr;
use std::time::Duration;

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Inbound HTTP server
    pub server: ServerConfig,

    /// Market data provider
    pub market: MarketConfig,

    /// Telegram delivery
    pub telegram: TelegramConfig,

    /// Cycle policy: instruments, thresholds, fetch strategy
    pub cycle: CycleSettings,

    /// Optional fixed-interval trigger
    pub schedule_interval: Option<Duration>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

/// Market data endpoint configuration
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Chart endpoint, the symbol is appended as a path segment
    pub base_url: String,

    /// Exchange suffix appended to every symbol
    pub exchange_suffix: String,

    /// Browser-like identification, upstream blocks bare clients
    pub user_agent: String,

    /// Hard limit for one request including the body
    pub request_timeout: Duration,

    /// Retries allowed after a 429
    pub max_rate_limit_retries: u32,

    /// First retry delay, grows linearly
    pub retry_base_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub api_base: String,

    /// Bot token; `None` disables alerting
    pub bot_token: Option<String>,

    /// Destination chat; `None` disables alerting
    pub chat_id: Option<String>,

    pub request_timeout: Duration,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "warn", "error")
    pub level: String,

    /// Log to file
    pub to_file: bool,

    /// Log file path
    pub file_path: Option<String>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com/v8/finance/chart".to_string(),
            exchange_suffix: ".NS".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
            request_timeout: Duration::from_secs(12),
            max_rate_limit_retries: 3,
            retry_base_delay: Duration::from_secs(2),
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.telegram.org".to_string(),
            bot_token: None,
            chat_id: None,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_addr: SocketAddr::from(([0, 0, 0, 0], 8787)),
            },
            market: MarketConfig::default(),
            telegram: TelegramConfig::default(),
            cycle: CycleSettings::default(),
            schedule_interval: None,
            logging: LoggingConfig {
                level: "info".to_string(),
                to_file: false,
                file_path: None,
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup, starting from the defaults.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(addr) = var("BIND_ADDR") {
            config.server.bind_addr = addr.trim().parse().map_err(|e| {
                AppError::Config(format!("Invalid BIND_ADDR {:?}: {}", addr, e))
            })?;
        }

        if let Some(url) = var("MARKET_DATA_URL") {
            config.market.base_url = url;
        }
        let request_timeout = var("MARKET_REQUEST_TIMEOUT_SECS");
        if let Some(secs) = parse_secs(request_timeout, "MARKET_REQUEST_TIMEOUT_SECS")? {
            config.market.request_timeout = secs;
        }

        if let Some(url) = var("TELEGRAM_API_URL") {
            config.telegram.api_base = url;
        }
        config.telegram.bot_token = var("TELEGRAM_BOT_TOKEN");
        config.telegram.chat_id = var("TELEGRAM_CHAT_ID");

        if let Some(strategy) = var("FETCH_STRATEGY") {
            config.cycle.strategy = match strategy.trim().to_lowercase().as_str() {
                "sequential" => FetchStrategy::default(),
                "concurrent" => FetchStrategy::Concurrent,
                other => {
                    return Err(AppError::Config(format!(
                        "Unsupported FETCH_STRATEGY: {}",
                        other
                    )))
                }
            };
        }

        let schedule_interval = var("SCHEDULE_INTERVAL_SECS");
        config.schedule_interval = parse_secs(schedule_interval, "SCHEDULE_INTERVAL_SECS")?;

        if let Some(offset) = var("ALERT_UTC_OFFSET_MINUTES") {
            let minutes: i32 = offset.trim().parse().map_err(|_| {
                AppError::Config(format!("Invalid ALERT_UTC_OFFSET_MINUTES: {}", offset))
            })?;
            if minutes.abs() >= 24 * 60 {
                return Err(AppError::Config(format!(
                    "ALERT_UTC_OFFSET_MINUTES out of range: {}",
                    minutes
                )));
            }
            config.cycle.utc_offset_minutes = minutes;
        }

        if let Some(level) = var("LOG_LEVEL") {
            config.logging.level = level;
        }
        config.logging.to_file = var("LOG_TO_FILE")
            .map(|v| v.trim().parse().unwrap_or(false))
            .unwrap_or(false);
        config.logging.file_path = var("LOG_FILE_PATH");

        Ok(config)
    }

    /// Whether alerts can be delivered at all.
    pub fn alerting_enabled(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().map_or(false, |s| !s.trim().is_empty());
        present(&self.telegram.bot_token) && present(&self.telegram.chat_id)
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> AppResult<()> {
        let mut builder = env_logger::Builder::new();

        // Set log level
        let log_level = match self.logging.level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        };

        builder.filter_level(log_level);

        // hyper is chatty at debug
        builder.filter_module("hyper", log::LevelFilter::Info);

        // Configure output
        if self.logging.to_file {
            if let Some(file_path) = &self.logging.file_path {
                let file = File::create(file_path).map_err(|e| {
                    AppError::Config(format!("Failed to create log file: {}", e))
                })?;

                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
        }

        builder.try_init().map_err(|e| {
            AppError::Config(format!("Failed to initialize logger: {}", e))
        })?;

        Ok(())
    }
}

fn parse_secs(value: Option<String>, key: &str) -> AppResult<Option<Duration>> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid {}: {}", key, raw)))?;
            if secs == 0 {
                return Err(AppError::Config(format!("{} must be positive", key)));
            }
            Ok(Some(Duration::from_secs(secs)))
        }
    }
}
