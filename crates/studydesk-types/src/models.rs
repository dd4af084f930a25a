use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Nl,
    #[default]
    En,
}

impl Language {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "nl" => Some(Self::Nl),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

/// A registered student or administrator, as stored in the users collection.
///
/// The document id is not part of the stored body; readers fill `uid` from it.
/// Every field has a default so partially populated documents still load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppUser {
    #[serde(skip)]
    pub uid: String,
    pub email: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub school_name: String,
    pub class_name: String,
    pub education_level: String,
    pub language_preference: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
    pub is_admin: bool,
    pub disabled: bool,
}

/// Notification categories. Anything unrecognised in a stored document is
/// treated as a system notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    #[default]
    System,
    Admin,
    Streak,
}

impl NotificationType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "admin" => Self::Admin,
            "streak" => Self::Streak,
            _ => Self::System,
        }
    }

    pub fn icon(self) -> NotificationIcon {
        match self {
            Self::Admin => NotificationIcon::UserCog,
            Self::Streak => NotificationIcon::Flame,
            Self::System => NotificationIcon::Bell,
        }
    }
}

impl<'de> Deserialize<'de> for NotificationType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse).unwrap_or_default())
    }
}

/// Glyph shown next to a notification in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationIcon {
    UserCog,
    Flame,
    Bell,
}

impl NotificationIcon {
    pub fn accent(self) -> &'static str {
        match self {
            Self::UserCog => "purple",
            Self::Flame => "orange",
            Self::Bell => "blue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationType,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadcast_id: Option<String>,
}

/// Admin-authored message appended to the shared broadcasts collection.
/// Fan-out into per-user notifications happens elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Broadcast {
    pub message: String,
    pub sender: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_loads_from_partial_document() {
        let user: AppUser = serde_json::from_value(json!({
            "email": "ann@example.com",
            "userName": "Ann",
            "createdAt": "2024-09-01T08:00:00Z",
            "somethingElse": [1, 2, 3]
        }))
        .unwrap();

        assert_eq!(user.user_name, "Ann");
        assert!(!user.disabled);
        assert!(!user.is_admin);
        assert_eq!(user.language_preference, Language::En);
        assert!(user.last_login_date.is_none());
    }

    #[test]
    fn user_body_omits_uid() {
        let user = AppUser {
            uid: "u1".into(),
            email: "a@x.com".into(),
            ..Default::default()
        };
        let body = serde_json::to_value(&user).unwrap();
        assert!(body.get("uid").is_none());
        assert_eq!(body["email"], "a@x.com");
        assert_eq!(body["disabled"], false);
    }

    #[test]
    fn notification_type_falls_back_to_system() {
        let n: Notification = serde_json::from_value(json!({
            "text": "hello",
            "type": "mystery",
            "read": false,
            "createdAt": "2024-09-01T08:00:00Z"
        }))
        .unwrap();
        assert_eq!(n.kind, NotificationType::System);
        assert!(n.broadcast_id.is_none());
    }

    #[test]
    fn notification_tolerates_null_type_and_missing_text() {
        let n: Notification = serde_json::from_value(json!({
            "type": null,
            "createdAt": "2024-09-01T08:00:00Z"
        }))
        .unwrap();
        assert_eq!(n.kind, NotificationType::System);
        assert_eq!(n.text, "");
        assert!(!n.read);
    }

    #[test]
    fn icon_by_type() {
        assert_eq!(NotificationType::Admin.icon(), NotificationIcon::UserCog);
        assert_eq!(NotificationType::Streak.icon(), NotificationIcon::Flame);
        assert_eq!(NotificationType::System.icon(), NotificationIcon::Bell);
        assert_eq!(NotificationIcon::Flame.accent(), "orange");
    }
}
