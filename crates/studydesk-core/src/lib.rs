//! Admin and notification workflows for StudyDesk.
//!
//! Every operation reads and writes through a [`DocumentStore`]; nothing here
//! keeps a local copy of store state beyond the explicit snapshots owned by
//! [`directory::Directory`] and [`reconciler::NotificationsPanel`].

pub mod broadcast;
pub mod console;
pub mod directory;
pub mod error;
pub mod i18n;
pub mod moderation;
pub mod prompt;
pub mod reconciler;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::anyhow;
use studydesk_db::{DocumentStore, Paths};

pub use error::AdminError;

/// Email of the built-in administrative account hidden from the directory.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin1069@gmail.com";

/// Store handle plus the conventions every service needs.
#[derive(Clone)]
pub struct Backend {
    pub store: Arc<dyn DocumentStore>,
    pub paths: Paths,
    pub reserved_admin_email: String,
}

impl Backend {
    pub fn new(store: Arc<dyn DocumentStore>, paths: Paths) -> Self {
        Self {
            store,
            paths,
            reserved_admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
        }
    }

    pub fn with_reserved_admin_email(mut self, email: impl Into<String>) -> Self {
        self.reserved_admin_email = email.into();
        self
    }

    /// Run a store call off the async runtime.
    pub async fn run<F, T>(&self, f: F) -> anyhow::Result<T>
    where
        F: FnOnce(&dyn DocumentStore) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| anyhow!("spawn_blocking join error: {}", e))?
    }
}
