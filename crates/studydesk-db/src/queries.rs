use std::cmp::Ordering;
use std::collections::HashSet;

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::models::{BatchUpdate, Direction, Document};
use crate::{Database, DocumentStore};

impl DocumentStore for Database {
    fn list(&self, collection: &str, order_by: &str, direction: Direction) -> Result<Vec<Document>> {
        let mut docs = self.with_conn(|conn| query_collection(conn, collection))?;

        docs.retain(|doc| doc.data.get(order_by).is_some());
        docs.sort_by(|a, b| {
            let ord = compare_values(&a.data[order_by], &b.data[order_by])
                .then_with(|| a.id.cmp(&b.id));
            match direction {
                Direction::Ascending => ord,
                Direction::Descending => ord.reverse(),
            }
        });

        Ok(docs)
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.with_conn(|conn| query_document(conn, collection, id))
    }

    fn set(&self, collection: &str, id: &str, data: Value) -> Result<()> {
        ensure_object(&data)?;
        self.with_conn(|conn| upsert(conn, collection, id, &data))
    }

    fn merge(&self, collection: &str, id: &str, fields: Value) -> Result<()> {
        ensure_object(&fields)?;
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let mut current = query_document(&tx, collection, id)?
                .map(|doc| doc.data)
                .unwrap_or_else(|| Value::Object(Map::new()));
            merge_into(&mut current, fields);
            upsert(&tx, collection, id, &current)?;
            tx.commit()?;
            Ok(())
        })
    }

    fn batch_update(&self, updates: &[BatchUpdate]) -> Result<()> {
        let mut seen = HashSet::new();
        for update in updates {
            ensure_object(&update.fields)?;
            if !seen.insert((update.collection.as_str(), update.id.as_str())) {
                bail!(
                    "Batch targets {}/{} more than once",
                    update.collection,
                    update.id
                );
            }
        }

        self.with_conn_mut(|conn| {
            // Dropping the transaction on an early return rolls everything back
            let tx = conn.transaction()?;
            for update in updates {
                let mut current = query_document(&tx, &update.collection, &update.id)?
                    .ok_or_else(|| anyhow!("No document to update: {}/{}", update.collection, update.id))?
                    .data;
                merge_into(&mut current, update.fields.clone());
                upsert(&tx, &update.collection, &update.id, &current)?;
            }
            tx.commit()?;
            debug!("Committed batch of {} updates", updates.len());
            Ok(())
        })
    }

    fn add(&self, collection: &str, data: Value) -> Result<String> {
        ensure_object(&data)?;
        let id = Uuid::new_v4().simple().to_string();
        self.with_conn(|conn| upsert(conn, collection, &id, &data))?;
        Ok(id)
    }
}

fn ensure_object(data: &Value) -> Result<()> {
    if data.is_object() {
        Ok(())
    } else {
        Err(anyhow!("Document body must be a JSON object"))
    }
}

fn upsert(conn: &Connection, collection: &str, id: &str, data: &Value) -> Result<()> {
    conn.execute(
        "INSERT INTO documents (collection, id, data) VALUES (?1, ?2, ?3)
         ON CONFLICT(collection, id) DO UPDATE
            SET data = excluded.data, updated_at = datetime('now')",
        (collection, id, data.to_string()),
    )?;
    Ok(())
}

fn query_document(conn: &Connection, collection: &str, id: &str) -> Result<Option<Document>> {
    let mut stmt = conn.prepare("SELECT id, data FROM documents WHERE collection = ?1 AND id = ?2")?;

    let row = stmt
        .query_row((collection, id), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .optional()?;

    row.map(|(id, raw)| to_document(id, &raw)).transpose()
}

fn query_collection(conn: &Connection, collection: &str) -> Result<Vec<Document>> {
    let mut stmt = conn.prepare("SELECT id, data FROM documents WHERE collection = ?1")?;

    let rows = stmt
        .query_map([collection], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(id, raw)| to_document(id, &raw))
        .collect()
}

fn to_document(id: String, raw: &str) -> Result<Document> {
    let data = serde_json::from_str(raw)
        .map_err(|e| anyhow!("Corrupt document body for '{}': {}", id, e))?;
    Ok(Document { id, data })
}

/// Nested objects are merged key by key; every other value is replaced.
fn merge_into(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(current), Value::Object(fields)) => {
            for (key, value) in fields {
                match current.get_mut(&key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        merge_into(existing, value)
                    }
                    _ => {
                        current.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}

/// Everything compares by type rank then value. Stored timestamps are expected
/// to be RFC 3339; those compare chronologically whatever their offset or
/// precision, and sort before any string that does not parse as one. Strings
/// that do not parse compare lexically among themselves.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => {
            match (x.parse::<DateTime<Utc>>(), y.parse::<DateTime<Utc>>()) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                (Ok(_), Err(_)) => Ordering::Less,
                (Err(_), Ok(_)) => Ordering::Greater,
                (Err(_), Err(_)) => x.cmp(y),
            }
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
