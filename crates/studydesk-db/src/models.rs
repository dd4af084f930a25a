use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A stored document: its id within the collection plus the JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.data.clone())
            .with_context(|| format!("Malformed document '{}'", self.id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// One field-level update inside an atomic batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchUpdate {
    pub collection: String,
    pub id: String,
    pub fields: Value,
}
