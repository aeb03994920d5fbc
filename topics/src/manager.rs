use std::sync::Arc;

use rand::seq::SliceRandom;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::model::{Topic, TopicId};
use crate::store::TopicStore;

/// Owns the in-memory copy of the topic pool and persists every mutation
/// back to the store as a full document.
///
/// Selection and marking are deliberately separate steps: a topic is only
/// marked used once the caller has confirmed the downstream post succeeded,
/// so a failed post leaves the topic eligible for the next run.
pub struct TopicManager<S: TopicStore> {
    topics: Arc<Mutex<Vec<Topic>>>,
    store: Arc<S>,
}

impl<S: TopicStore> TopicManager<S> {
    /// Initialize from the store. An empty (or absent) pool is a valid state.
    pub async fn new(store: Arc<S>) -> Result<Self, StoreError> {
        let topics = store.load().await?;
        Ok(Self {
            topics: Arc::new(Mutex::new(topics)),
            store,
        })
    }

    /// Pick a random not-yet-used topic.
    ///
    /// If every topic has been used, the whole pool is reset (flags cleared
    /// and persisted) before selection, so a non-empty pool always yields a
    /// topic. Returns `Ok(None)` only when the pool has no topics at all.
    pub async fn get_unused_topic(&self) -> Result<Option<Topic>, StoreError> {
        let mut guard = self.topics.lock().await;

        if guard.is_empty() {
            return Ok(None);
        }

        if guard.iter().all(|t| t.used) {
            tracing::info!(pool_size = guard.len(), "topic pool exhausted, resetting");
            for topic in guard.iter_mut() {
                topic.used = false;
            }
            self.store.save(&guard).await?;
        }

        let unused: Vec<&Topic> = guard.iter().filter(|t| !t.used).collect();
        let picked = unused.choose(&mut rand::thread_rng()).map(|t| (*t).clone());

        Ok(picked)
    }

    /// Mark a topic used and persist immediately.
    ///
    /// Idempotent; an unknown id is a no-op so stale references from an
    /// earlier selection are tolerated.
    pub async fn mark_topic_used(&self, id: TopicId) -> Result<(), StoreError> {
        let mut guard = self.topics.lock().await;

        let Some(topic) = guard.iter_mut().find(|t| t.id == id) else {
            tracing::warn!(topic_id = id, "mark_topic_used: unknown topic id");
            return Ok(());
        };

        topic.used = true;
        self.store.save(&guard).await?;

        Ok(())
    }

    /// Read-only snapshot of the pool.
    pub async fn get_all_topics(&self) -> Vec<Topic> {
        self.topics.lock().await.clone()
    }

    /// Clear every used-flag, independent of the exhaustion-triggered reset.
    pub async fn reset_all_topics(&self) -> Result<(), StoreError> {
        let mut guard = self.topics.lock().await;

        for topic in guard.iter_mut() {
            topic.used = false;
        }
        self.store.save(&guard).await?;

        Ok(())
    }

    /// Append a new topic under a freshly minted id (max existing + 1).
    pub async fn add_topic(
        &self,
        category: impl Into<String>,
        title: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Result<Topic, StoreError> {
        let mut guard = self.topics.lock().await;

        let new_id = guard.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let topic = Topic::new(new_id, category, title, prompt);

        guard.push(topic.clone());
        self.store.save(&guard).await?;

        Ok(topic)
    }
}
