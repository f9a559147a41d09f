// src/infrastructure/mod.rs
pub mod market;
pub mod notifier;

use hyper::client::HttpConnector;
use hyper::Client;
use hyper_tls::HttpsConnector;

/// HTTP(S) client shared by the outbound adapters.
pub type HttpsClient = Client<HttpsConnector<HttpConnector>>;

/// Build a pooled client that speaks both `http://` and `https://`.
pub fn https_client() -> HttpsClient {
    Client::builder().build::<_, hyper::Body>(HttpsConnector::new())
}
