use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::{error, info};

use studydesk_core::directory::filter;
use studydesk_types::api::{
    BroadcastResponse, Claims, SendBroadcastRequest, SetUserStatusRequest, UserResponse,
};

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /admin/users?q= — the directory, newest first, filtered by name or email.
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.directory.list_users().await?;
    let body: Vec<UserResponse> = filter(&users, &query.q)
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(Json(body))
}

/// PUT /admin/users/{uid}/status — sets the disabled flag and answers with
/// the directory as re-read after the write, or an empty list when that
/// re-read fails.
pub async fn set_user_status(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SetUserStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.directory.list_users().await?;
    if !users.iter().any(|u| u.uid == uid) {
        return Err(ApiError::NotFound);
    }

    state.moderation.set_disabled(&uid, req.disabled).await?;
    info!("{} set disabled={} on {}", claims.sub, req.disabled, uid);

    // The write already landed; a failed re-read must not report it as failed
    let refreshed = state.directory.list_users().await.unwrap_or_else(|e| {
        error!("Re-reading users after status change on {} failed: {}", uid, e);
        Vec::new()
    });
    let body: Vec<UserResponse> = refreshed.iter().map(UserResponse::from).collect();
    Ok(Json(body))
}

/// POST /admin/broadcasts — appends a broadcast signed with the caller's name.
pub async fn send_broadcast(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SendBroadcastRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state
        .broadcasts
        .send_broadcast(&req.message, &claims.name)
        .await?;

    Ok((StatusCode::CREATED, Json(BroadcastResponse { id })))
}
