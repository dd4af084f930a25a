//! Confirmation and notice prompts.
//!
//! A [`Prompt`] is a plain value. Notices carry only text; confirmations also
//! carry a [`Reply`] whose `confirm`/`cancel` continuations resolve the
//! [`Pending`] decision held by whoever asked. Prompts reach the user through a
//! single [`Surface`].

use std::sync::Arc;

use tokio::sync::oneshot;

use crate::i18n::Translate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Cancelled,
}

#[derive(Debug)]
pub struct Prompt {
    text: String,
    reply: Option<Reply>,
}

impl Prompt {
    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reply: None,
        }
    }

    pub fn confirmation(text: impl Into<String>) -> (Self, Pending) {
        let (tx, rx) = oneshot::channel();
        let prompt = Self {
            text: text.into(),
            reply: Some(Reply { tx }),
        };
        (prompt, Pending { rx })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_confirmation(&self) -> bool {
        self.reply.is_some()
    }

    pub fn into_reply(self) -> Option<Reply> {
        self.reply
    }
}

/// Continuation handles for a confirmation prompt. Using one consumes both.
#[derive(Debug)]
pub struct Reply {
    tx: oneshot::Sender<Decision>,
}

impl Reply {
    pub fn confirm(self) {
        let _ = self.tx.send(Decision::Confirmed);
    }

    pub fn cancel(self) {
        let _ = self.tx.send(Decision::Cancelled);
    }
}

/// The asking side of a confirmation prompt.
#[derive(Debug)]
pub struct Pending {
    rx: oneshot::Receiver<Decision>,
}

impl Pending {
    /// A reply dropped without an answer counts as a cancel.
    pub async fn decision(self) -> Decision {
        self.rx.await.unwrap_or(Decision::Cancelled)
    }
}

/// Where prompts are shown.
pub trait Surface: Send + Sync {
    fn present(&self, prompt: Prompt);
}

/// The surface and the translations, bundled for the workflows.
#[derive(Clone)]
pub struct Ui {
    surface: Arc<dyn Surface>,
    i18n: Arc<dyn Translate>,
}

impl Ui {
    pub fn new(surface: Arc<dyn Surface>, i18n: Arc<dyn Translate>) -> Self {
        Self { surface, i18n }
    }

    pub fn t(&self, key: &str, replacements: &[(&str, &str)]) -> String {
        self.i18n.t(key, replacements)
    }

    /// Show a translated notice.
    pub fn notify(&self, key: &str) {
        self.surface.present(Prompt::notice(self.t(key, &[])));
    }

    pub async fn confirm(&self, text: String) -> Decision {
        let (prompt, pending) = Prompt::confirmation(text);
        self.surface.present(prompt);
        pending.decision().await
    }
}
