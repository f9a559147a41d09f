// src/adapter/http_server.rs
// Inbound HTTP trigger

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server, StatusCode};

use crate::application::usecase::RatioCycleUseCase;
use crate::domain::errors::AppResult;

pub type SharedCycle = Arc<dyn RatioCycleUseCase + Send + Sync>;

pub const CRON_ACK: &str = "Cron job executed";

/// Route one request. `/` answers with the cycle summary, `/mycron` only
/// acknowledges, everything else is 404. Cycle failures still answer 200.
pub async fn handle(req: Request<Body>, cycle: SharedCycle) -> Result<Response<Body>, Infallible> {
    let response = match req.uri().path() {
        "/" => {
            let summary = cycle.run_cycle().await;
            match serde_json::to_string(&summary) {
                Ok(json) => Response::builder()
                    .status(StatusCode::OK)
                    .header(CONTENT_TYPE, "application/json")
                    .header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
                    .body(Body::from(json)),
                Err(e) => {
                    log::error!("Failed to serialize cycle summary: {}", e);
                    Response::builder()
                        .status(StatusCode::INTERNAL_SERVER_ERROR)
                        .body(Body::empty())
                }
            }
        }
        "/mycron" => {
            let summary = cycle.run_cycle().await;
            log::debug!("Cron cycle finished: {:?}", summary);
            Response::builder()
                .status(StatusCode::OK)
                .header(CONTENT_TYPE, "text/plain")
                .body(Body::from(CRON_ACK))
        }
        path => {
            log::debug!("No route for {} {}", req.method(), path);
            Response::builder()
                .status(StatusCode::NOT_FOUND)
                .header(CONTENT_TYPE, "text/plain")
                .body(Body::from("Not Found"))
        }
    };

    Ok(response.unwrap_or_else(|e| {
        log::error!("Failed to build response: {}", e);
        let mut fallback = Response::new(Body::empty());
        *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        fallback
    }))
}

/// Serve until `shutdown` resolves.
pub async fn serve<S>(addr: SocketAddr, cycle: SharedCycle, shutdown: S) -> AppResult<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let make_svc = make_service_fn(move |_conn| {
        let cycle = cycle.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| handle(req, cycle.clone())))
        }
    });

    let server = Server::try_bind(&addr)?.serve(make_svc);
    log::info!("Listening on http://{}", server.local_addr());

    server.with_graceful_shutdown(shutdown).await?;
    Ok(())
}
