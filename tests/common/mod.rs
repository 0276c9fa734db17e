#![allow(dead_code)]

use axum::Router;
use hopefund::application::service::ConfirmationService;
use hopefund::domain::donation::{Amount, DonationDetails};
use hopefund::infrastructure::in_memory::{OutboxSender, TemplateGenerator};
use hopefund::interfaces::http::{AppState, THANK_YOU_PATH, router};
use rust_decimal_macros::dec;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Serves `app` on an ephemeral local port for the lifetime of the test runtime.
pub async fn spawn_router(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Starts the confirmation endpoint backed by the offline adapters.
pub async fn spawn_offline_endpoint(outbox: OutboxSender) -> SocketAddr {
    let service = ConfirmationService::new(
        Box::new(TemplateGenerator),
        Box::new(outbox),
        "donations@hope.org",
    );
    spawn_router(router(AppState::new(Ok(service)))).await
}

pub fn endpoint_url(addr: SocketAddr) -> String {
    format!("http://{}{}", addr, THANK_YOU_PATH)
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn asha() -> DonationDetails {
    DonationDetails::new("Asha", "asha@example.com", Amount::new(dec!(500)).unwrap()).unwrap()
}
