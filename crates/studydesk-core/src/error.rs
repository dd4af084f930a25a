use thiserror::Error;

/// Failures of the admin and notification operations.
///
/// Each is caught at the operation boundary and turned into a notice or a
/// log line; none of them is meant to reach a global handler.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Listing users (or notifications) from the store failed
    #[error("Fetch failed: {0}")]
    Fetch(#[source] anyhow::Error),

    /// A merge, batch or append write failed
    #[error("Write failed: {0}")]
    Write(#[source] anyhow::Error),

    /// Input rejected before the store was contacted
    #[error("Invalid input: {0}")]
    Validation(&'static str),
}

impl AdminError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
