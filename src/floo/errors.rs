use thiserror::Error;

/// Errors that can arise while coordinating fireplaces through the world
/// gateway.
#[derive(Debug, Error)]
pub enum FlooError {
    /// The gateway rejected or failed a query, mutation, or teleport call.
    #[error("gateway error: {0}")]
    Gateway(String),

    /// Wrapper around serde_json errors from object-state blobs and seeds.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Wrapper around IO errors (world seed loading, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when fetching a record that is not present.
    #[error("record not found: {0}")]
    NotFound(String),
}
