pub mod migrations;
pub mod models;
pub mod paths;
pub mod queries;

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

pub use models::{BatchUpdate, Direction, Document};
pub use paths::Paths;

/// The document store contract the rest of the workspace is written against.
///
/// Collections are addressed by slash-separated paths (see [`Paths`]) and
/// documents by an id unique within their collection. Bodies are JSON objects.
pub trait DocumentStore: Send + Sync {
    /// All documents in `collection` that carry `order_by`, sorted on it.
    /// Documents without the field are left out.
    fn list(&self, collection: &str, order_by: &str, direction: Direction) -> Result<Vec<Document>>;

    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Replace (or create) a document wholesale.
    fn set(&self, collection: &str, id: &str, data: serde_json::Value) -> Result<()>;

    /// Write only the given fields, leaving the rest of the document as it was.
    /// Creates the document when it does not exist yet.
    fn merge(&self, collection: &str, id: &str, fields: serde_json::Value) -> Result<()>;

    /// Apply every update or none. Each target must already exist and may
    /// appear only once in the batch.
    fn batch_update(&self, updates: &[BatchUpdate]) -> Result<()>;

    /// Append a new document under a generated id and return that id.
    fn add(&self, collection: &str, data: serde_json::Value) -> Result<String>;
}

/// SQLite-backed document store.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&conn)
    }

    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock().map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&mut conn)
    }
}
