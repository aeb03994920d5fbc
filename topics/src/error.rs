use thiserror::Error;

/// Failures of the durable topic pool store.
///
/// These always propagate to the caller: silently dropping a used-flag
/// update would eventually repeat topics or exhaust the pool early.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("topic store unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    #[error("topic pool document is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
