//! JsonFileStore
//! --------------------
//! This module provides the **JSON-file implementation** of the `TopicStore`
//! trait used by the topics::manager subsystem. It is responsible for durable
//! persistence of the topic pool so that:
//!
//!  - used-flags survive restarts (no topic repeats after a redeploy)
//!  - pool resets are durable before any selection proceeds
//!  - manual edits to the pool file are picked up on next start
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::TopicStore;
use crate::error::StoreError;
use crate::model::Topic;

/// On-disk document shape: `{ "topics": [ ... ] }`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PoolDocument {
    topics: Vec<Topic>,
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TopicStore for JsonFileStore {
    /// A missing file is an empty pool, not an error.
    async fn load(&self) -> Result<Vec<Topic>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let doc: PoolDocument = serde_json::from_slice(&bytes)?;
                Ok(doc.topics)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Unavailable(e)),
        }
    }

    /// Full-document rewrite via temp file + rename, so a crash mid-write
    /// never leaves a truncated pool behind.
    async fn save(&self, topics: &[Topic]) -> Result<(), StoreError> {
        let doc = PoolDocument {
            topics: topics.to_vec(),
        };
        let bytes = serde_json::to_vec_pretty(&doc)?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        Ok(())
    }
}
