//! HTTP entry point.
//!
//! `GET /?amount=..&input_currency=..&output_currency=..` answers with the same
//! JSON document the command line prints. Errors come back as
//! `{"error": {"code", "message"}}` with a matching status.

use crate::core::{ConvertError, RateProvider, RawParams, SymbolTable};
use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct ServerState {
    pub symbols: SymbolTable,
    pub provider: Arc<dyn RateProvider>,
}

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        let status = match &self {
            ConvertError::InvalidAmount { .. } => StatusCode::BAD_REQUEST,
            ConvertError::ProviderError { .. }
            | ConvertError::TransportError { .. }
            | ConvertError::MalformedResponse { .. } => StatusCode::BAD_GATEWAY,
        };
        (status, Json(self.to_json())).into_response()
    }
}

async fn convert_handler(
    State(state): State<ServerState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ConvertError> {
    let params = RawParams::from_pairs(pairs);
    debug!(?params, "Conversion requested");

    let result = crate::convert(&params, &state.symbols, state.provider.as_ref())
        .await
        .inspect_err(|e| warn!(error = %e, code = e.code(), "Conversion failed"))?;

    match result.to_json_pretty() {
        Ok(body) => Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response()),
        Err(e) => Ok((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()),
    }
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(convert_handler))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves on an already bound listener until the process is interrupted.
pub async fn serve(listener: TcpListener, state: ServerState) -> Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

pub async fn run(host: &str, port: u16, state: ServerState) -> Result<()> {
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))?;
    let addr = listener.local_addr()?;
    info!(%addr, "Listening");
    println!("Started HTTP server on {addr}");

    serve(listener, state).await?;
    println!("Shutting down the HTTP server");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
