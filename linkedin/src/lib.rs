pub mod client;
pub mod error;
pub mod types;

pub use client::LinkedInClient;
pub use error::LinkedInError;

use std::path::Path;

use async_trait::async_trait;

/// The posting surface the pipeline consumes: create a post given content,
/// a tag list and an optional image, get back the post URN.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(
        &self,
        content: &str,
        hashtags: &[String],
        image: Option<&Path>,
    ) -> Result<String, LinkedInError>;
}
