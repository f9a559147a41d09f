// src/infrastructure/notifier/mod.rs
// Telegram bot notifier

use async_trait::async_trait;
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Method, Request};

use crate::application::dto::SendMessageRequest;
use crate::config::TelegramConfig;
use crate::domain::model::{AlertMessage, DeliveryOutcome};
use crate::domain::repository::NotificationRepository;
use crate::infrastructure::HttpsClient;

pub struct TelegramNotifier {
    client: HttpsClient,
    config: TelegramConfig,
}

impl TelegramNotifier {
    pub fn new(client: HttpsClient, config: TelegramConfig) -> Self {
        Self { client, config }
    }

    /// Token and chat id, when both are present and non-blank.
    fn credentials(&self) -> Option<(&str, &str)> {
        let token = self.config.bot_token.as_deref().map(str::trim)?;
        let chat_id = self.config.chat_id.as_deref().map(str::trim)?;
        if token.is_empty() || chat_id.is_empty() {
            return None;
        }
        Some((token, chat_id))
    }

    async fn post_message(&self, token: &str, chat_id: &str, text: &str) -> Result<(), String> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            token
        );
        let payload = serde_json::to_vec(&SendMessageRequest::html(chat_id, text))
            .map_err(|e| e.to_string())?;

        let request = Request::builder()
            .method(Method::POST)
            .uri(url)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(payload))
            .map_err(|e| e.to_string())?;

        let exchange = async {
            let response = self.client.request(request).await.map_err(|e| e.to_string())?;
            let status = response.status();
            let body = hyper::body::to_bytes(response.into_body())
                .await
                .map_err(|e| e.to_string())?;
            if status.is_success() {
                Ok(())
            } else {
                Err(format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    String::from_utf8_lossy(&body)
                ))
            }
        };

        match tokio::time::timeout(self.config.request_timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err("timeout".to_string()),
        }
    }
}

#[async_trait]
impl NotificationRepository for TelegramNotifier {
    async fn send(&self, message: &AlertMessage) -> DeliveryOutcome {
        let (token, chat_id) = match self.credentials() {
            Some(credentials) => credentials,
            None => {
                log::info!("Telegram credentials not configured, alert not sent");
                return DeliveryOutcome::Disabled;
            }
        };

        match self.post_message(token, chat_id, &message.text).await {
            Ok(()) => {
                log::info!("Telegram alert delivered");
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                log::error!("Telegram alert failed: {}", e);
                DeliveryOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{https_client, test_server};
    use hyper::{Response, StatusCode};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn notifier(api_base: String, token: Option<&str>, chat_id: Option<&str>) -> TelegramNotifier {
        let config = TelegramConfig {
            api_base,
            bot_token: token.map(String::from),
            chat_id: chat_id.map(String::from),
            request_timeout: Duration::from_millis(500),
        };
        TelegramNotifier::new(https_client(), config)
    }

    fn alert() -> AlertMessage {
        AlertMessage {
            text: "<b>ratio</b> 0.700".into(),
        }
    }

    #[tokio::test]
    async fn missing_credentials_disable_delivery() {
        // Unreachable address: any network call would fail rather than succeed.
        let base = "http://127.0.0.1:1".to_string();

        assert_eq!(
            notifier(base.clone(), None, Some("42")).send(&alert()).await,
            DeliveryOutcome::Disabled
        );
        assert_eq!(
            notifier(base.clone(), Some("token"), Some("  ")).send(&alert()).await,
            DeliveryOutcome::Disabled
        );
        assert_eq!(
            notifier(base, Some(""), None).send(&alert()).await,
            DeliveryOutcome::Disabled
        );
    }

    #[tokio::test]
    async fn posts_html_message_to_bot_endpoint() {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();
        let addr = test_server::spawn(move |req: Request<Body>| {
            let sink = sink.clone();
            async move {
                let path = req.uri().path().to_string();
                let body = hyper::body::to_bytes(req.into_body()).await.unwrap();
                let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
                sink.lock().unwrap().push((path, json));
                Response::new(Body::from(r#"{"ok":true}"#))
            }
        })
        .await;

        let outcome = notifier(format!("http://{}", addr), Some("123:abc"), Some("42"))
            .send(&alert())
            .await;

        assert_eq!(outcome, DeliveryOutcome::Delivered);
        assert!(outcome.is_success());
        let captured = captured.lock().unwrap();
        assert_eq!(captured.len(), 1);
        let (path, json) = &captured[0];
        assert_eq!(path, "/bot123:abc/sendMessage");
        assert_eq!(json["chat_id"], "42");
        assert_eq!(json["text"], "<b>ratio</b> 0.700");
        assert_eq!(json["parse_mode"], "HTML");
    }

    #[tokio::test]
    async fn rejected_message_is_reported_not_raised() {
        let addr = test_server::spawn(|_req| async {
            Response::builder()
                .status(StatusCode::BAD_REQUEST)
                .body(Body::from(r#"{"ok":false,"description":"chat not found"}"#))
                .unwrap()
        })
        .await;

        let outcome = notifier(format!("http://{}", addr), Some("t"), Some("42"))
            .send(&alert())
            .await;

        assert_eq!(outcome, DeliveryOutcome::Failed);
        assert!(!outcome.is_success());
    }
}
