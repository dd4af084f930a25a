use axum::{
    Extension,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use tracing::{debug, error};

use studydesk_types::api::Claims;

use crate::AppState;
use crate::error::ApiError;

/// Extract and validate the JWT from the Authorization header, then refuse
/// accounts that an administrator has disabled.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        debug!("Rejected token: {}", e);
        ApiError::Unauthorized
    })?
    .claims;

    let collection = state.backend.paths.users();
    let uid = claims.sub.clone();
    let profile = state
        .backend
        .run(move |store| store.get(&collection, &uid))
        .await
        .map_err(|e| {
            error!("Profile lookup failed for {}: {:#}", claims.sub, e);
            ApiError::Internal
        })?;

    // Accounts without a profile document yet are let through
    let disabled = profile
        .and_then(|doc| doc.data.get("disabled").and_then(|v| v.as_bool()))
        .unwrap_or(false);
    if disabled {
        return Err(ApiError::AccountDisabled);
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Must run after [`require_auth`].
pub async fn require_admin(
    Extension(claims): Extension<Claims>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !claims.admin {
        return Err(ApiError::Forbidden);
    }
    Ok(next.run(req).await)
}
