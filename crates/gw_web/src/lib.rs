use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

pub mod auth;
pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let state = Arc::new(state);
    let cors = CorsLayer::permissive();

    let protected = Router::new()
        .route("/api/news/:source/headline", get(handlers::headline))
        .route("/api/news/:source/headlines", get(handlers::headlines))
        .route("/api/news/:source/article", get(handlers::article))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Router::new()
        .route("/api/login", post(handlers::login))
        .route("/health", get(handlers::health))
        .merge(protected)
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Last-resort handler: internal detail is logged server-side and never
/// leaks into the response body.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(detail = %detail, "request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Something went wrong!" })),
    )
        .into_response()
}

pub mod prelude {
    pub use crate::AppState;
    pub use gw_core::{ArticleDetail, Error, Headline, Result};
}
