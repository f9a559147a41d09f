// src/infrastructure/market/mod.rs
// Chart-API quote repository

use std::time::Duration;

use async_trait::async_trait;
use hyper::body::Bytes;
use hyper::header::{ACCEPT, USER_AGENT};
use hyper::{Body, Method, Request, StatusCode};

use crate::application::dto::parser::parse_chart_price;
use crate::config::MarketConfig;
use crate::domain::errors::{FetchError, FetchResult};
use crate::domain::model::{Instrument, QuoteResult};
use crate::domain::repository::QuoteRepository;
use crate::infrastructure::HttpsClient;

/// Linear backoff: the n-th retry (0-based) waits `base * (n + 1)`.
pub fn retry_delay(base: Duration, attempt: u32) -> Duration {
    base * (attempt + 1)
}

pub struct YahooQuoteRepository {
    client: HttpsClient,
    config: MarketConfig,
}

impl YahooQuoteRepository {
    pub fn new(client: HttpsClient, config: MarketConfig) -> Self {
        Self { client, config }
    }

    fn quote_url(&self, instrument: &Instrument) -> String {
        format!(
            "{}/{}{}?interval=1m&range=1d",
            self.config.base_url.trim_end_matches('/'),
            instrument.symbol(),
            self.config.exchange_suffix
        )
    }

    /// One request/response exchange under the hard timeout.
    async fn send_once(&self, url: &str) -> FetchResult<(StatusCode, Bytes)> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(url)
            .header(USER_AGENT, self.config.user_agent.as_str())
            .header(ACCEPT, "application/json")
            .body(Body::empty())?;

        let exchange = async {
            let response = self.client.request(request).await?;
            let status = response.status();
            let body = hyper::body::to_bytes(response.into_body()).await?;
            Ok::<_, FetchError>((status, body))
        };

        match tokio::time::timeout(self.config.request_timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout),
        }
    }

    pub async fn get_price(&self, instrument: &Instrument) -> FetchResult<String> {
        let url = self.quote_url(instrument);
        let mut attempt: u32 = 0;

        loop {
            log::debug!("GET {} (attempt {})", url, attempt + 1);
            let (status, body) = self.send_once(&url).await?;

            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempt < self.config.max_rate_limit_retries {
                    let wait = retry_delay(self.config.retry_base_delay, attempt);
                    log::warn!(
                        "{} rate limited; retrying in {}ms",
                        instrument,
                        wait.as_millis()
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                    continue;
                }
                log::error!("{} still rate limited after {} retries", instrument, attempt);
                return Err(FetchError::RateLimited);
            }

            if !status.is_success() {
                return Err(FetchError::HttpStatus(status.as_u16()));
            }

            return parse_chart_price(&body);
        }
    }
}

#[async_trait]
impl QuoteRepository for YahooQuoteRepository {
    async fn fetch_quote(&self, instrument: &Instrument) -> QuoteResult {
        let result = self.get_price(instrument).await;
        if let Err(e) = &result {
            log::error!("Failed to fetch {}: {}", instrument, e);
        }
        QuoteResult::from(result)
    }
}
