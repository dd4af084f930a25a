use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::debug;

use studydesk_types::api::{Claims, NotificationResponse};

use crate::AppState;
use crate::error::ApiError;

/// GET /notifications — the caller's notifications, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let notifications = state.reconciler.fetch(&claims.sub).await?;
    let body: Vec<NotificationResponse> = notifications
        .iter()
        .map(NotificationResponse::from)
        .collect();
    Ok(Json(body))
}

/// POST /notifications/read — marks everything currently unread as read.
/// A failed batch is logged by the reconciler and still answers 204.
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let notifications = state.reconciler.fetch(&claims.sub).await?;
    let outcome = state.reconciler.reconcile(&claims.sub, &notifications).await;
    debug!("Reconciled notifications for {}: {:?}", claims.sub, outcome);
    Ok(StatusCode::NO_CONTENT)
}
