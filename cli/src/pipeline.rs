//! The create-and-post flow: one run turns one unused topic into one
//! published LinkedIn post.
//!
//! A topic is only marked used after the publish is confirmed, so any
//! failure along the way leaves it eligible for the next run.

use std::sync::Arc;

use tracing::Instrument;

use common::logger::{RunId, child_span, root_span};
use content::{ContentEngine, ImageEngine};
use linkedin::Publisher;
use topics::manager::TopicManager;
use topics::store::TopicStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    Posted { urn: String },
    /// The pool has no topics at all. Routine, not an error.
    NoTopic,
}

pub struct PostPipeline<S: TopicStore, C: ContentEngine, P: Publisher> {
    topics: Arc<TopicManager<S>>,
    content: Arc<C>,
    images: Arc<dyn ImageEngine>,
    publisher: Arc<P>,
}

impl<S, C, P> PostPipeline<S, C, P>
where
    S: TopicStore,
    C: ContentEngine,
    P: Publisher,
{
    pub fn new(
        topics: Arc<TopicManager<S>>,
        content: Arc<C>,
        images: Arc<dyn ImageEngine>,
        publisher: Arc<P>,
    ) -> Self {
        Self {
            topics,
            content,
            images,
            publisher,
        }
    }

    pub async fn create_and_post(&self) -> anyhow::Result<PostOutcome> {
        let run_id = RunId::default();
        let span = root_span("create_and_post", &run_id);
        self.run().instrument(span).await
    }

    async fn run(&self) -> anyhow::Result<PostOutcome> {
        let Some(topic) = self.topics.get_unused_topic().await? else {
            tracing::warn!("no topics available");
            return Ok(PostOutcome::NoTopic);
        };
        tracing::info!(topic_id = topic.id, title = %topic.title, "selected topic");

        let post = self
            .content
            .generate_post(&topic)
            .instrument(child_span("generate_post"))
            .await?;
        tracing::info!(chars = post.len(), "post content generated");

        let hashtags = self.content.hashtags(&topic, &post).await?;
        tracing::info!(count = hashtags.len(), "hashtags ready");

        // Images are best-effort end to end; a prompt failure is not fatal.
        let image = match self.content.image_prompt(&topic, &post).await {
            Ok(Some(prompt)) => {
                self.images
                    .generate(&prompt, &format!("topic_{}", topic.id))
                    .await?
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = ?e, "image prompt failed, posting without image");
                None
            }
        };

        let urn = self
            .publisher
            .publish(&post, &hashtags, image.as_deref())
            .instrument(child_span("publish"))
            .await?;
        tracing::info!(%urn, "posted to linkedin");

        // Only a confirmed publish burns the topic.
        self.topics.mark_topic_used(topic.id).await?;

        Ok(PostOutcome::Posted { urn })
    }
}
