pub mod error;
pub mod format;
pub mod gemini;
pub mod hashtags;
pub mod image;
pub mod special_days;

pub use error::ContentError;
pub use gemini::GeminiEngine;
pub use image::{DisabledImageEngine, ImageEngine, OpenAiImageEngine};

use async_trait::async_trait;

use topics::model::Topic;

/// Content-generation collaborator consumed by the posting pipeline.
#[async_trait]
pub trait ContentEngine: Send + Sync {
    /// LinkedIn-ready post copy for a topic.
    async fn generate_post(&self, topic: &Topic) -> Result<String, ContentError>;

    /// Hashtags (without `#`) tuned to the topic and generated copy.
    async fn hashtags(&self, topic: &Topic, post: &str) -> Result<Vec<String>, ContentError>;

    /// An image-generation prompt for the post, if one can be produced.
    async fn image_prompt(&self, topic: &Topic, post: &str)
    -> Result<Option<String>, ContentError>;
}
