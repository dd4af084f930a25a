use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};
use tracing::info;

use studydesk_core::DEFAULT_ADMIN_EMAIL;
use studydesk_types::models::Language;

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &["change-me-to-a-random-string", "dev-secret-change-me"];

pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub app_id: String,
    pub jwt_secret: String,
    pub admin_email: String,
    pub language: Language,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("STUDYDESK_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("STUDYDESK_JWT_SECRET is unset or still a placeholder; it must match the identity provider's signing secret");
        }

        let port = var_or("STUDYDESK_PORT", "3000").parse()?;
        let language_raw = var_or("STUDYDESK_LANG", "en");
        let Some(language) = Language::parse(&language_raw) else {
            bail!("STUDYDESK_LANG must be 'en' or 'nl', got '{}'", language_raw);
        };

        Ok(Self {
            host: var_or("STUDYDESK_HOST", "0.0.0.0"),
            port,
            db_path: var_or("STUDYDESK_DB_PATH", "studydesk.db").into(),
            app_id: var_or("STUDYDESK_APP_ID", "default-app-id"),
            jwt_secret,
            admin_email: var_or("STUDYDESK_ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL),
            language,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
