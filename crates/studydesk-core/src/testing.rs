//! Test doubles: a call-recording store with switchable failures and a surface
//! that answers confirmations automatically.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use studydesk_db::{BatchUpdate, Database, Direction, Document, DocumentStore, Paths};
use studydesk_types::models::{AppUser, Language, Notification, NotificationType};

use crate::Backend;
use crate::i18n::Catalog;
use crate::prompt::{Decision, Prompt, Surface, Ui};

pub const APP_ID: &str = "test-app";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(String),
    Get(String, String),
    Set(String, String),
    Merge { collection: String, id: String, fields: Value },
    Batch(Vec<BatchUpdate>),
    Add { collection: String, data: Value },
}

impl Call {
    pub fn is_write(&self) -> bool {
        !matches!(self, Call::List(_) | Call::Get(..))
    }
}

pub struct RecordingStore {
    inner: Database,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    calls: Mutex<Vec<Call>>,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Database::open_in_memory().unwrap(),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Write straight to the underlying database without recording a call.
    pub fn seed(&self, collection: &str, id: &str, data: Value) {
        self.inner.set(collection, id, data).unwrap();
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_write).collect()
    }

    pub fn list_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::List(_)))
            .count()
    }

    pub fn raw(&self, collection: &str, id: &str) -> Option<Document> {
        self.inner.get(collection, id).unwrap()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_read(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            bail!("network unreachable");
        }
        Ok(())
    }

    fn check_write(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("network unreachable");
        }
        Ok(())
    }
}

impl DocumentStore for RecordingStore {
    fn list(&self, collection: &str, order_by: &str, direction: Direction) -> Result<Vec<Document>> {
        self.record(Call::List(collection.to_string()));
        self.check_read()?;
        self.inner.list(collection, order_by, direction)
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.record(Call::Get(collection.to_string(), id.to_string()));
        self.check_read()?;
        self.inner.get(collection, id)
    }

    fn set(&self, collection: &str, id: &str, data: Value) -> Result<()> {
        self.record(Call::Set(collection.to_string(), id.to_string()));
        self.check_write()?;
        self.inner.set(collection, id, data)
    }

    fn merge(&self, collection: &str, id: &str, fields: Value) -> Result<()> {
        self.record(Call::Merge {
            collection: collection.to_string(),
            id: id.to_string(),
            fields: fields.clone(),
        });
        self.check_write()?;
        self.inner.merge(collection, id, fields)
    }

    fn batch_update(&self, updates: &[BatchUpdate]) -> Result<()> {
        self.record(Call::Batch(updates.to_vec()));
        self.check_write()?;
        self.inner.batch_update(updates)
    }

    fn add(&self, collection: &str, data: Value) -> Result<String> {
        self.record(Call::Add {
            collection: collection.to_string(),
            data: data.clone(),
        });
        self.check_write()?;
        self.inner.add(collection, data)
    }
}

/// Records what was shown and answers every confirmation with `answer`.
pub struct RecordingSurface {
    answer: Decision,
    notices: Mutex<Vec<String>>,
    confirmations: Mutex<Vec<String>>,
}

impl RecordingSurface {
    pub fn answering(answer: Decision) -> Arc<Self> {
        Arc::new(Self {
            answer,
            notices: Mutex::new(Vec::new()),
            confirmations: Mutex::new(Vec::new()),
        })
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations.lock().unwrap().clone()
    }
}

impl Surface for RecordingSurface {
    fn present(&self, prompt: Prompt) {
        if !prompt.is_confirmation() {
            self.notices.lock().unwrap().push(prompt.text().to_string());
            return;
        }
        self.confirmations.lock().unwrap().push(prompt.text().to_string());
        if let Some(reply) = prompt.into_reply() {
            match self.answer {
                Decision::Confirmed => reply.confirm(),
                Decision::Cancelled => reply.cancel(),
            }
        }
    }
}

pub fn backend(store: &Arc<RecordingStore>) -> Backend {
    Backend::new(store.clone(), Paths::new(APP_ID))
}

pub fn ui(surface: &Arc<RecordingSurface>) -> Ui {
    Ui::new(surface.clone(), Arc::new(Catalog::new(Language::En)))
}

pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, d, 8, 0, 0).unwrap()
}

pub fn user(uid: &str, name: &str, email: &str, created: u32) -> AppUser {
    AppUser {
        uid: uid.to_string(),
        user_name: name.to_string(),
        email: email.to_string(),
        created_at: day(created),
        education_level: "havo".to_string(),
        ..Default::default()
    }
}

pub fn seed_user(store: &RecordingStore, user: &AppUser) {
    let paths = Paths::new(APP_ID);
    store.seed(&paths.users(), &user.uid, serde_json::to_value(user).unwrap());
}

pub fn notification(id: &str, read: bool, created: u32) -> Notification {
    Notification {
        id: id.to_string(),
        text: format!("notification {id}"),
        kind: NotificationType::System,
        read,
        created_at: day(created),
        broadcast_id: None,
    }
}

pub fn seed_notification(store: &RecordingStore, uid: &str, n: &Notification) {
    let paths = Paths::new(APP_ID);
    store.seed(&paths.notifications(uid), &n.id, serde_json::to_value(n).unwrap());
}
