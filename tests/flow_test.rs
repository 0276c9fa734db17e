mod common;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::post;
use common::{asha, closed_addr, spawn_offline_endpoint, spawn_router};
use hopefund::application::flow::FlowController;
use hopefund::domain::flow::{DELAYED_NOTICE, FlowState, Outcome};
use hopefund::infrastructure::http_client::HttpConfirmationClient;
use hopefund::infrastructure::in_memory::OutboxSender;
use hopefund::interfaces::http::THANK_YOU_PATH;
use hopefund::interfaces::modal::ModalView;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

fn controller_for(addr: SocketAddr, deadline: Duration) -> FlowController {
    let client = HttpConfirmationClient::new(&format!("http://{}", addr));
    FlowController::new(Arc::new(client)).with_deadline(deadline)
}

async fn settle(controller: &FlowController) -> FlowState {
    controller.submit(asha()).await.unwrap().await.unwrap();
    controller.snapshot().await
}

#[tokio::test]
async fn test_success_shows_thank_you_modal() {
    let addr = spawn_offline_endpoint(OutboxSender::new()).await;
    let controller = controller_for(addr, Duration::from_secs(10));

    let state = settle(&controller).await;
    assert!(!state.is_loading);
    assert!(!state.is_error);

    let view = ModalView::from_state(&state).unwrap();
    assert_eq!(view.title, "Thank You, Asha!");
    assert!(view.paragraphs[0].starts_with("Thank you so much, Asha"));
    assert!(view.footer.is_some());
}

#[tokio::test]
async fn test_slow_endpoint_is_soft_failure() {
    let app = Router::new().route(
        THANK_YOU_PATH,
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"message": "too late"}))
        }),
    );
    let addr = spawn_router(app).await;
    let controller = controller_for(addr, Duration::from_millis(200));

    let state = settle(&controller).await;
    assert_eq!(state.outcome, Some(Outcome::Delayed));
    assert!(!state.is_error);
    assert_eq!(state.result_message, DELAYED_NOTICE);
    assert_eq!(ModalView::from_state(&state).unwrap().title, "Thank You, Asha!");
}

#[tokio::test]
async fn test_error_body_is_reported() {
    let app = Router::new().route(
        THANK_YOU_PATH,
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Y"})),
            )
        }),
    );
    let addr = spawn_router(app).await;
    let controller = controller_for(addr, Duration::from_secs(10));

    let state = settle(&controller).await;
    assert!(state.is_error);
    assert!(state.result_message.contains("due to an error: Y."));
    assert_eq!(ModalView::from_state(&state).unwrap().title, "An Error Occurred");
}

#[tokio::test]
async fn test_error_without_body_uses_generic_description() {
    let app = Router::new().route(THANK_YOU_PATH, post(|| async { StatusCode::BAD_GATEWAY }));
    let addr = spawn_router(app).await;
    let controller = controller_for(addr, Duration::from_secs(10));

    let state = settle(&controller).await;
    assert!(state.is_error);
    assert!(state.result_message.contains("API call failed"));
}

#[tokio::test]
async fn test_malformed_success_body_is_hard_failure() {
    let app = Router::new().route(THANK_YOU_PATH, post(|| async { "not json" }));
    let addr = spawn_router(app).await;
    let controller = controller_for(addr, Duration::from_secs(10));

    let state = settle(&controller).await;
    assert!(state.is_error);
    assert!(state.result_message.contains("malformed response"));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_hard_failure() {
    let addr = closed_addr().await;
    let controller = controller_for(addr, Duration::from_secs(10));

    let state = settle(&controller).await;
    assert!(state.is_error);
    assert!(!state.is_loading);
    assert!(state.modal_visible);

    controller.dismiss().await;
    assert_eq!(controller.snapshot().await, FlowState::default());
}
