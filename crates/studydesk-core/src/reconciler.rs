use std::collections::HashSet;

use serde_json::json;
use studydesk_db::{BatchUpdate, Direction};
use studydesk_types::models::{Notification, NotificationIcon};
use tracing::{debug, error, warn};

use crate::error::AdminError;
use crate::prompt::Ui;
use crate::Backend;

/// Ids of unread notifications, first occurrence only, in input order.
pub fn unread_ids(notifications: &[Notification]) -> Vec<String> {
    let mut seen = HashSet::new();
    notifications
        .iter()
        .filter(|n| !n.read)
        .filter(|n| seen.insert(n.id.as_str()))
        .map(|n| n.id.clone())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Nothing unread, no write issued
    NothingUnread,
    /// Same unread set as the previous receipt, no write issued
    AlreadyReconciled,
    /// One batch marked this many notifications read
    Marked(usize),
    /// The batch failed; the failure was logged
    Failed,
}

/// Marks a user's unread notifications read in one atomic batch.
#[derive(Clone)]
pub struct NotificationReconciler {
    backend: Backend,
}

impl NotificationReconciler {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// The user's notifications, newest first.
    pub async fn fetch(&self, uid: &str) -> Result<Vec<Notification>, AdminError> {
        let collection = self.backend.paths.notifications(uid);
        let docs = self
            .backend
            .run(move |store| store.list(&collection, "createdAt", Direction::Descending))
            .await
            .map_err(AdminError::Fetch)?;

        // One bad document must not hide the rest of the list
        Ok(docs
            .iter()
            .filter_map(|doc| match doc.decode::<Notification>() {
                Ok(mut notification) => {
                    notification.id = doc.id.clone();
                    Some(notification)
                }
                Err(e) => {
                    warn!("Skipping notification for {}: {:#}", uid, e);
                    None
                }
            })
            .collect())
    }

    /// Never fails from the caller's point of view: store errors are logged and
    /// reported as [`ReconcileOutcome::Failed`].
    pub async fn reconcile(&self, uid: &str, notifications: &[Notification]) -> ReconcileOutcome {
        let ids = unread_ids(notifications);
        if ids.is_empty() {
            return ReconcileOutcome::NothingUnread;
        }

        let collection = self.backend.paths.notifications(uid);
        let updates: Vec<BatchUpdate> = ids
            .iter()
            .map(|id| BatchUpdate {
                collection: collection.clone(),
                id: id.clone(),
                fields: json!({ "read": true }),
            })
            .collect();
        let count = updates.len();

        match self.backend.run(move |store| store.batch_update(&updates)).await {
            Ok(()) => {
                debug!("Marked {} notifications read for {}", count, uid);
                ReconcileOutcome::Marked(count)
            }
            Err(e) => {
                error!("Failed to mark notifications as read for {}: {:#}", uid, e);
                ReconcileOutcome::Failed
            }
        }
    }
}

/// One row of the notifications panel.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationItem {
    pub id: String,
    pub text: String,
    pub icon: NotificationIcon,
    pub unread: bool,
    pub timestamp: String,
}

/// A mounted notifications panel. Reconciles once per received list rather
/// than once per render; a new panel starts over.
pub struct NotificationsPanel {
    reconciler: NotificationReconciler,
    uid: String,
    notifications: Vec<Notification>,
    last_unread: Option<Vec<String>>,
}

impl NotificationsPanel {
    pub fn mount(reconciler: NotificationReconciler, uid: impl Into<String>) -> Self {
        Self {
            reconciler,
            uid: uid.into(),
            notifications: Vec::new(),
            last_unread: None,
        }
    }

    pub async fn receive(&mut self, notifications: Vec<Notification>) -> ReconcileOutcome {
        let mut unread = unread_ids(&notifications);
        unread.sort();
        self.notifications = notifications;

        if self.last_unread.as_ref() == Some(&unread) {
            return ReconcileOutcome::AlreadyReconciled;
        }

        let outcome = self.reconciler.reconcile(&self.uid, &self.notifications).await;
        // A failed batch leaves the set eligible for the next delivery
        if outcome != ReconcileOutcome::Failed {
            self.last_unread = Some(unread);
        }
        outcome
    }

    /// Rows as last received; read state reflects the list, not the pending
    /// write, so freshly marked items still show as unread until the next list.
    pub fn items(&self) -> Vec<NotificationItem> {
        self.notifications
            .iter()
            .map(|n| NotificationItem {
                id: n.id.clone(),
                text: n.text.clone(),
                icon: n.kind.icon(),
                unread: !n.read,
                timestamp: n.created_at.format("%Y-%m-%d %H:%M").to_string(),
            })
            .collect()
    }

    /// Text shown instead of the list when there is nothing to show.
    pub fn empty_state(&self, ui: &Ui) -> Option<String> {
        self.notifications
            .is_empty()
            .then(|| ui.t("no_notifications", &[]))
    }
}
