use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use gw_core::{Error, Result};

use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn issue_token(username: &str, secret: &str, ttl_secs: u64) -> Result<String> {
    let exp = (Utc::now() + Duration::seconds(ttl_secs as i64)).timestamp() as usize;
    let claims = Claims {
        sub: username.to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Auth(format!("failed to sign token: {}", e)))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| Error::Auth(e.to_string()))
}

/// Bearer-token gate for the news routes. Missing header is 401,
/// invalid or expired token is 403; the token carries identity and
/// expiry only, there is no session state behind it.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(token) = token else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Authentication token required" })),
        )
            .into_response();
    };

    match verify_token(token, &state.config.jwt_secret) {
        Ok(_claims) => next.run(req).await,
        Err(e) => {
            debug!(error = %e, "rejected bearer token");
            (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Invalid or expired token" })),
            )
                .into_response()
        }
    }
}
