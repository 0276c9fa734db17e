//! HTTP surface of the confirmation service.

use crate::application::service::{ConfirmationService, ThankYouRequest};
use crate::error::{DonationError, Result};
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

pub const THANK_YOU_PATH: &str = "/api/sendThankYouEmail";
pub const CONFIGURATION_FAULT: &str = "Server configuration error.";
pub const PROCESSING_FAULT: &str =
    "An error occurred while processing your donation's thank you message.";

/// Shared handler state.
///
/// Holds either a ready service or the configuration fault that prevented
/// building one. A fault is reported on every request rather than at startup.
pub struct AppState {
    service: Result<ConfirmationService>,
}

impl AppState {
    pub fn new(service: Result<ConfirmationService>) -> Self {
        Self { service }
    }
}

#[derive(Debug, Serialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

fn error_response(status: StatusCode, error: &str) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            THANK_YOU_PATH,
            post(send_thank_you).fallback(method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal(tokio::signal::ctrl_c()))
        .await?;

    Ok(())
}

/// Resolves once `signal` fires. If the listener cannot be installed the
/// server keeps running instead of shutting down straight away.
async fn shutdown_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!(error = %e, "failed to listen for shutdown signal; graceful shutdown disabled");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_waits_on_signal() {
        let fired = timeout(Duration::from_secs(1), shutdown_signal(async { Ok(()) })).await;
        assert!(fired.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_signal_listener_keeps_serving() {
        let failing = async { Err(std::io::Error::other("signal handler unavailable")) };
        let fired = timeout(Duration::from_secs(3600), shutdown_signal(failing)).await;
        assert!(fired.is_err());
    }
}

async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

async fn send_thank_you(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let service = match &state.service {
        Ok(service) => service,
        Err(e) => {
            error!(error = %e, "confirmation service is not configured");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, CONFIGURATION_FAULT);
        }
    };

    let request: ThankYouRequest = serde_json::from_slice(&body).unwrap_or_else(|e| {
        debug!(error = %e, "unreadable request body");
        ThankYouRequest::default()
    });

    match service.send_thank_you(request).await {
        Ok(message) => (StatusCode::OK, Json(MessageBody { message })).into_response(),
        Err(DonationError::ValidationError(reason)) => {
            error_response(StatusCode::BAD_REQUEST, &reason)
        }
        Err(e) => {
            error!(error = %e, "failed to send thank-you email");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, PROCESSING_FAULT)
        }
    }
}
