use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AppUser, Notification, NotificationIcon, NotificationType};

// -- JWT Claims --

/// Claims carried by bearer tokens. Tokens are minted by the identity
/// provider; this workspace only verifies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    #[serde(default)]
    pub admin: bool,
    pub exp: usize,
}

// -- Admin --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub uid: String,
    pub user_name: String,
    pub email: String,
    pub education_level: String,
    pub is_admin: bool,
    pub disabled: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_date: Option<DateTime<Utc>>,
}

impl From<&AppUser> for UserResponse {
    fn from(user: &AppUser) -> Self {
        Self {
            uid: user.uid.clone(),
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            education_level: user.education_level.clone(),
            is_admin: user.is_admin,
            disabled: user.disabled,
            created_at: user.created_at,
            last_login_date: user.last_login_date,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetUserStatusRequest {
    pub disabled: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SendBroadcastRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BroadcastResponse {
    pub id: String,
}

// -- Notifications --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub icon: NotificationIcon,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub broadcast_id: Option<String>,
}

impl From<&Notification> for NotificationResponse {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.clone(),
            text: n.text.clone(),
            kind: n.kind,
            icon: n.kind.icon(),
            read: n.read,
            created_at: n.created_at,
            broadcast_id: n.broadcast_id.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
