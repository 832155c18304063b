//! Session API handlers.
//!
//! Upstream credentials are handed to us here and live only in the session.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use tradeshelf_core::UpstreamCredentials;
use uuid::Uuid;

use super::error::{error_response, ApiError};
use super::middleware::{session_key, AuthTrader, SessionKey};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    /// Send back as `X-Session-Id` on later requests.
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetUpstreamRequest {
    pub access_token: String,
    #[serde(default)]
    pub api_key: String,
}

/// POST /api/v1/session
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    AuthTrader(trader_id): AuthTrader,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = Uuid::new_v4().to_string();
    state
        .sessions()
        .update(&session_key(&trader_id, &session_id), |_| ());

    (
        StatusCode::CREATED,
        Json(CreateSessionResponse { session_id }),
    )
}

/// DELETE /api/v1/session
pub async fn end_session(
    State(state): State<Arc<AppState>>,
    SessionKey(key): SessionKey,
) -> StatusCode {
    state.sessions().remove(&key);
    StatusCode::NO_CONTENT
}

/// PUT /api/v1/session/upstream
pub async fn set_upstream(
    State(state): State<Arc<AppState>>,
    AuthTrader(trader_id): AuthTrader,
    SessionKey(key): SessionKey,
    Json(request): Json<SetUpstreamRequest>,
) -> Result<StatusCode, ApiError> {
    if request.access_token.trim().is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "accessToken must not be empty",
        ));
    }

    let credentials = UpstreamCredentials {
        access_token: request.access_token,
        api_key: request.api_key,
    };
    state
        .sessions()
        .update(&key, |s| s.upstream = Some(credentials));
    info!("Upstream credentials set for trader {}", trader_id);

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/session/upstream
pub async fn clear_upstream(
    State(state): State<Arc<AppState>>,
    SessionKey(key): SessionKey,
) -> StatusCode {
    state.sessions().update(&key, |s| s.upstream = None);
    StatusCode::NO_CONTENT
}
