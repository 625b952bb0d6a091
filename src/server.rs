//! HTTP endpoint for conversions.
use crate::core::cache::RateCache;
use crate::core::request::{Envelope, RawRequest, respond};
use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use tracing::{debug, info};

/// `GET /currency_converter?amount=..&input_currency=..&output_currency=..`
///
/// Every outcome, including malformed query strings, is reported in the
/// envelope with status 200. A repeated parameter keeps its first value.
async fn currency_converter(
    State(cache): State<RateCache>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<Envelope> {
    let raw = match query {
        Ok(Query(pairs)) => RawRequest::from_pairs(pairs),
        Err(e) => {
            debug!(error = %e, "Unreadable query string");
            RawRequest::default()
        }
    };
    debug!(?raw, "Conversion request");

    if let Err(envelope) = raw.required() {
        return Json(envelope);
    }

    let rates = cache.get_rates().await;
    Json(respond(&raw, &rates))
}

async fn health() -> &'static str {
    "OK"
}

pub fn app_router(cache: RateCache) -> Router {
    Router::new()
        .route("/currency_converter", get(currency_converter))
        .route("/health", get(health))
        .with_state(cache)
}

/// Loads the first table and serves until the process is stopped.
pub async fn serve(cache: RateCache, listen_addr: &str) -> Result<()> {
    cache.refresh().await;

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("Failed to bind {listen_addr}"))?;
    info!("Listening on {}", listen_addr);

    axum::serve(listener, app_router(cache))
        .await
        .context("HTTP server stopped unexpectedly")
}
