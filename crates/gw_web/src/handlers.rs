use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::auth;
use crate::AppState;

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Response {
    info!(username = %body.username, "POST /api/login");
    let config = &state.config;

    if body.username != config.admin_username || body.password != config.admin_password {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid credentials" })),
        )
            .into_response();
    }

    match auth::issue_token(&body.username, &config.jwt_secret, config.token_ttl_secs) {
        Ok(token) => Json(json!({ "token": token })).into_response(),
        Err(e) => {
            error!(error = %e, "token signing failed");
            internal_error()
        }
    }
}

pub async fn headline(
    State(state): State<Arc<AppState>>,
    Path(source): Path<String>,
) -> Response {
    info!(source = %source, "GET headline");
    if state.service.by_route(&source).is_none() {
        return unknown_source(&source);
    }
    let headline = state.service.headline(&source).await;
    Json(json!({ "headline": headline })).into_response()
}

pub async fn headlines(
    State(state): State<Arc<AppState>>,
    Path(source): Path<String>,
) -> Response {
    info!(source = %source, "GET headlines");
    if state.service.by_route(&source).is_none() {
        return unknown_source(&source);
    }
    let headlines = state.service.headlines(&source).await;
    Json(json!({ "headlines": headlines })).into_response()
}

#[derive(Debug, Deserialize)]
pub struct ArticleQuery {
    pub url: Option<String>,
}

pub async fn article(
    State(state): State<Arc<AppState>>,
    Path(source): Path<String>,
    Query(query): Query<ArticleQuery>,
) -> Response {
    info!(source = %source, url = ?query.url, "GET article");
    if state.service.by_route(&source).is_none() {
        return unknown_source(&source);
    }
    let Some(url) = query.url else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "URL parameter is required" })),
        )
            .into_response();
    };
    let article = state.service.article(&source, &url).await;
    Json(article).into_response()
}

fn unknown_source(source: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("Unknown news source: {}", source) })),
    )
        .into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Something went wrong!" })),
    )
        .into_response()
}
