//! Optional illustration generation. Best-effort by contract: a post goes
//! out without an image rather than not at all.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;

#[async_trait]
pub trait ImageEngine: Send + Sync {
    /// Render `prompt` to a local image file named after `file_stem`.
    /// `Ok(None)` signals "no image this time", which callers must treat as
    /// a normal outcome.
    async fn generate(&self, prompt: &str, file_stem: &str)
    -> Result<Option<PathBuf>, ContentError>;
}

/// For deployments without an image API key.
pub struct DisabledImageEngine;

#[async_trait]
impl ImageEngine for DisabledImageEngine {
    async fn generate(
        &self,
        _prompt: &str,
        _file_stem: &str,
    ) -> Result<Option<PathBuf>, ContentError> {
        Ok(None)
    }
}

const OPENAI_IMAGES_URL: &str = "https://api.openai.com/v1/images/generations";
const IMAGE_MODEL: &str = "dall-e-3";

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'static str,
    prompt: &'a str,
    n: u32,
    size: &'static str,
}

#[derive(Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: String,
}

pub struct OpenAiImageEngine {
    http: Client,
    api_key: String,
    out_dir: PathBuf,
}

impl OpenAiImageEngine {
    pub fn new(api_key: String, out_dir: impl Into<PathBuf>) -> Result<Self, ContentError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            http,
            api_key,
            out_dir: out_dir.into(),
        })
    }

    async fn render(&self, prompt: &str, file_stem: &str) -> Result<PathBuf, ContentError> {
        let request = ImageRequest {
            model: IMAGE_MODEL,
            prompt,
            n: 1,
            size: "1024x1024",
        };

        let resp = self
            .http
            .post(OPENAI_IMAGES_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: ImageResponse = resp.json().await?;
        let Some(image) = body.data.into_iter().next() else {
            return Err(ContentError::EmptyResponse);
        };

        let bytes = self
            .http
            .get(&image.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        tokio::fs::create_dir_all(&self.out_dir).await?;
        let path = self.out_dir.join(format!("{file_stem}.png"));
        tokio::fs::write(&path, &bytes).await?;

        Ok(path)
    }
}

#[async_trait]
impl ImageEngine for OpenAiImageEngine {
    async fn generate(
        &self,
        prompt: &str,
        file_stem: &str,
    ) -> Result<Option<PathBuf>, ContentError> {
        match self.render(prompt, file_stem).await {
            Ok(path) => {
                tracing::info!(path = %path.display(), "image generated");
                Ok(Some(path))
            }
            Err(e) => {
                tracing::warn!(error = ?e, "image generation failed, continuing without one");
                Ok(None)
            }
        }
    }
}
