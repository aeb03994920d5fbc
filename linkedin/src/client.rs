//! REST client for creating LinkedIn posts.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tokio::sync::Mutex;
use tracing::instrument;

use crate::Publisher;
use crate::error::LinkedInError;
use crate::types::*;

const BASE_URL: &str = "https://api.linkedin.com/v2";
const RESTLI_VERSION: &str = "2.0.0";
const API_VERSION: &str = "202501";

pub struct LinkedInClient {
    http: Client,
    access_token: String,
    base_url: String,
    /// OpenID `sub`, fetched once and reused for every author URN.
    user_id: Mutex<Option<String>>,
}

impl LinkedInClient {
    pub fn new(access_token: String) -> Result<Self, LinkedInError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            access_token,
            base_url: BASE_URL.to_string(),
            user_id: Mutex::new(None),
        })
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.access_token)
            .header("X-Restli-Protocol-Version", RESTLI_VERSION)
            .header("LinkedIn-Version", API_VERSION)
    }

    async fn check(resp: Response) -> Result<Response, LinkedInError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(LinkedInError::Api { status, body })
    }

    /// Member id of the token's owner, cached after the first call.
    pub async fn user_id(&self) -> Result<String, LinkedInError> {
        let mut cached = self.user_id.lock().await;
        if let Some(id) = cached.as_ref() {
            return Ok(id.clone());
        }

        let url = format!("{}/userinfo", self.base_url);
        let resp = Self::check(self.authed(self.http.get(&url)).send().await?).await?;
        let info: UserInfo = resp.json().await?;

        if info.sub.is_empty() {
            return Err(LinkedInError::MissingUserId);
        }
        tracing::debug!(sub = %info.sub, "fetched linkedin user info");

        *cached = Some(info.sub.clone());
        Ok(info.sub)
    }

    async fn submit_post(&self, post: UgcPost) -> Result<String, LinkedInError> {
        let url = format!("{}/ugcPosts", self.base_url);
        let resp = Self::check(self.authed(self.http.post(&url)).json(&post).send().await?).await?;

        // Rest.li returns the new entity id in a response header.
        let urn = resp
            .headers()
            .get("x-restli-id")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
            .ok_or(LinkedInError::MissingPostUrn)?;

        Ok(urn)
    }

    #[instrument(skip(self, content, hashtags), level = "debug")]
    pub async fn create_text_post(
        &self,
        content: &str,
        hashtags: &[String],
    ) -> Result<String, LinkedInError> {
        let user_id = self.user_id().await?;
        let post = UgcPost {
            author: format!("urn:li:person:{user_id}"),
            lifecycle_state: LIFECYCLE_PUBLISHED,
            specific_content: SpecificContent {
                share_content: ShareContent {
                    share_commentary: Text {
                        text: compose_body(content, hashtags),
                    },
                    share_media_category: MEDIA_CATEGORY_NONE,
                    media: Vec::new(),
                },
            },
            visibility: Visibility {
                member_network: VISIBILITY_PUBLIC,
            },
        };

        let urn = self.submit_post(post).await?;
        tracing::info!(%urn, "text post created");
        Ok(urn)
    }

    /// Two-step asset upload: register, then PUT the bytes to the returned
    /// upload slot.
    #[instrument(skip(self), fields(image = %image_path.display()), level = "debug")]
    pub async fn upload_image(
        &self,
        image_path: &Path,
        user_id: &str,
    ) -> Result<String, LinkedInError> {
        let url = format!("{}/assets?action=registerUpload", self.base_url);
        let request = RegisterUploadRequest {
            register_upload_request: RegisterUpload {
                recipes: vec![FEEDSHARE_RECIPE],
                owner: format!("urn:li:person:{user_id}"),
                service_relationships: vec![ServiceRelationship {
                    relationship_type: "OWNER",
                    identifier: "urn:li:userGeneratedContent",
                }],
            },
        };

        let resp =
            Self::check(self.authed(self.http.post(&url)).json(&request).send().await?).await?;
        let registered: RegisterUploadResponse = resp.json().await?;

        let bytes = tokio::fs::read(image_path).await?;
        let upload_url = registered.value.upload_mechanism.request.upload_url;

        Self::check(
            self.http
                .put(&upload_url)
                .bearer_auth(&self.access_token)
                .body(bytes)
                .send()
                .await?,
        )
        .await?;

        tracing::info!(asset = %registered.value.asset, "image uploaded");
        Ok(registered.value.asset)
    }

    /// Post with an attached image; degrades to a text post when the upload
    /// fails, matching the "image is best-effort" contract.
    #[instrument(skip(self, content, hashtags), fields(image = %image_path.display()), level = "debug")]
    pub async fn create_image_post(
        &self,
        content: &str,
        image_path: &Path,
        hashtags: &[String],
    ) -> Result<String, LinkedInError> {
        let user_id = self.user_id().await?;

        let asset = match self.upload_image(image_path, &user_id).await {
            Ok(asset) => asset,
            Err(e) => {
                tracing::warn!(error = ?e, "image upload failed, posting text only");
                return self.create_text_post(content, hashtags).await;
            }
        };

        let post = UgcPost {
            author: format!("urn:li:person:{user_id}"),
            lifecycle_state: LIFECYCLE_PUBLISHED,
            specific_content: SpecificContent {
                share_content: ShareContent {
                    share_commentary: Text {
                        text: compose_body(content, hashtags),
                    },
                    share_media_category: MEDIA_CATEGORY_IMAGE,
                    media: vec![MediaEntry {
                        status: MEDIA_STATUS_READY,
                        description: Text {
                            text: "Post image".to_string(),
                        },
                        media: asset,
                        title: Text {
                            text: "Post".to_string(),
                        },
                    }],
                },
            },
            visibility: Visibility {
                member_network: VISIBILITY_PUBLIC,
            },
        };

        let urn = self.submit_post(post).await?;
        tracing::info!(%urn, "image post created");
        Ok(urn)
    }
}

/// Post body with the hashtag block appended after a blank line.
fn compose_body(content: &str, hashtags: &[String]) -> String {
    if hashtags.is_empty() {
        return content.to_string();
    }
    let tags = hashtags
        .iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{content}\n\n{tags}")
}

#[async_trait]
impl Publisher for LinkedInClient {
    async fn publish(
        &self,
        content: &str,
        hashtags: &[String],
        image: Option<&Path>,
    ) -> Result<String, LinkedInError> {
        match image {
            Some(path) => self.create_image_post(content, path, hashtags).await,
            None => self.create_text_post(content, hashtags).await,
        }
    }
}
