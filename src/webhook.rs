use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use tracing::{debug, warn};

use crate::dispatch::Dispatcher;
use crate::update;

/// Shared state for the webhook route.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// Single-route webhook app: POST drives dispatch, every other method is
/// acknowledged with an empty 200 (health checks, browser visits).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(receive_update).fallback(acknowledge))
        .with_state(state)
}

/// POST entry point. Always terminates with 200: unparseable bodies are
/// dropped and dispatch failures are absorbed by the fault boundary, so the
/// delivery platform never retries a business-level failure.
async fn receive_update(State(state): State<AppState>, body: Bytes) -> StatusCode {
    match update::parse_update(&body) {
        Ok(update) => {
            let outcome = state.dispatcher.dispatch_guarded(&update).await;
            debug!("Update {} handled: {}", update.update_id, outcome.describe());
        }
        Err(e) => warn!("Discarding unparseable webhook body: {:#}", e),
    }
    StatusCode::OK
}

async fn acknowledge() -> StatusCode {
    StatusCode::OK
}
