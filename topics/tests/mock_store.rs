use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use topics::error::StoreError;
use topics::model::Topic;
use topics::store::TopicStore;

#[derive(Default)]
pub struct InMemoryTopicStore {
    pub topics: Arc<Mutex<Vec<Topic>>>,
    pub save_count: Arc<Mutex<usize>>,
}

#[async_trait]
impl TopicStore for InMemoryTopicStore {
    async fn load(&self) -> Result<Vec<Topic>, StoreError> {
        Ok(self.topics.lock().await.clone())
    }

    async fn save(&self, topics: &[Topic]) -> Result<(), StoreError> {
        *self.topics.lock().await = topics.to_vec();
        *self.save_count.lock().await += 1;
        Ok(())
    }
}

/// Loads fine, fails every save. For storage-error propagation tests.
#[derive(Default)]
pub struct BrokenTopicStore {
    pub topics: Vec<Topic>,
}

#[async_trait]
impl TopicStore for BrokenTopicStore {
    async fn load(&self) -> Result<Vec<Topic>, StoreError> {
        Ok(self.topics.clone())
    }

    async fn save(&self, _topics: &[Topic]) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "disk on fire",
        )))
    }
}
