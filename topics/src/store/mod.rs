pub mod json_store;

/// Document-granularity persistence for the topic pool.
///
/// The whole pool is one durable document; `save` rewrites it in full.
/// Fine at current pool sizes, revisit with an id-addressed store if the
/// pool ever grows past a few thousand entries.
#[async_trait::async_trait]
pub trait TopicStore: Send + Sync {
    async fn load(&self) -> Result<Vec<crate::model::Topic>, crate::error::StoreError>;
    async fn save(&self, topics: &[crate::model::Topic]) -> Result<(), crate::error::StoreError>;
}
