use chrono::Utc;
use studydesk_types::models::Broadcast;
use tracing::{error, info};

use crate::error::AdminError;
use crate::prompt::Ui;
use crate::Backend;

/// Appends admin messages to the shared broadcasts collection.
#[derive(Clone)]
pub struct BroadcastSender {
    backend: Backend,
}

impl BroadcastSender {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Store one broadcast and return its id. Blank messages are rejected
    /// before the store is touched. The message is stored as typed.
    pub async fn send_broadcast(&self, message: &str, sender_name: &str) -> Result<String, AdminError> {
        if message.trim().is_empty() {
            return Err(AdminError::Validation("broadcast message is empty"));
        }

        let record = Broadcast {
            message: message.to_string(),
            sender: sender_name.to_string(),
            created_at: Utc::now(),
        };
        let body = serde_json::to_value(&record).map_err(|e| AdminError::Write(e.into()))?;

        let collection = self.backend.paths.broadcasts();
        let id = self
            .backend
            .run(move |store| store.add(&collection, body))
            .await
            .map_err(AdminError::Write)?;

        info!("Broadcast {} sent by {}", id, sender_name);
        Ok(id)
    }
}

/// The broadcast input box: a draft plus the in-flight flag.
pub struct BroadcastComposer {
    sender: BroadcastSender,
    ui: Ui,
    draft: String,
    sending: bool,
}

impl BroadcastComposer {
    pub fn new(sender: BroadcastSender, ui: Ui) -> Self {
        Self {
            sender,
            ui,
            draft: String::new(),
            sending: false,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Send the draft. It is cleared only when the write succeeds, so a failed
    /// send can be retried as is.
    pub async fn send(&mut self, sender_name: &str) -> Result<String, AdminError> {
        self.sending = true;
        let result = self.sender.send_broadcast(&self.draft, sender_name).await;
        self.sending = false;

        match &result {
            Ok(_) => {
                self.ui.notify("broadcast_success");
                self.draft.clear();
            }
            Err(AdminError::Validation(reason)) => {
                info!("Broadcast rejected: {}", reason);
                self.ui.notify("error_broadcast_empty");
            }
            Err(e) => {
                error!("Error sending broadcast: {:#}", e);
                self.ui.notify("error_broadcast_failed");
            }
        }
        result
    }
}
