//! Gemini-backed implementation of the content collaborator.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use topics::model::Topic;

use crate::ContentEngine;
use crate::error::ContentError;
use crate::{format, hashtags, special_days};

const GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Marketing suffixes the topic file accumulated over time; they read badly
/// in a post header.
const TITLE_SUFFIXES: [&str; 7] = [
    ": Production Battle-Tested Insights",
    ": Production Guide",
    ": Battle-Tested Insights",
    ": Production Reality",
    ": Production Performance Reality",
    "Production ",
    "Battle-Tested ",
];

pub fn clean_title(title: &str) -> String {
    let mut title = title.to_string();
    for suffix in TITLE_SUFFIXES {
        title = title.replace(suffix, "");
    }
    title.trim_matches([':', ' ']).to_string()
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

pub struct GeminiEngine {
    http: Client,
    api_key: String,
    base_url: String,
}

impl GeminiEngine {
    pub fn new(api_key: String) -> Result<Self, ContentError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    #[instrument(skip(self, prompt), level = "debug")]
    async fn generate_text(&self, prompt: &str) -> Result<String, ContentError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, GEMINI_MODEL);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: GenerateResponse = resp.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(ContentError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl ContentEngine for GeminiEngine {
    async fn generate_post(&self, topic: &Topic) -> Result<String, ContentError> {
        let title = clean_title(&topic.title);
        let mut prompt = format!(
            "{}\n\nWrite this as a LinkedIn post in plain text. First line: 1-2 fitting \
             emojis and the title \"{title}\" in capitals, then a blank line, then short \
             mobile-friendly paragraphs. Stay under 1300 characters and end with a question \
             to the reader. No markdown, no hashtags.\nCategory: {}\n",
            topic.prompt, topic.category
        );

        let special = special_days::special_day_for(Local::now().date_naive());
        let mention = special
            .as_ref()
            .map(|d| special_days::should_mention(d.kind, &mut rand::thread_rng()))
            .unwrap_or(false);

        if mention {
            if let Some(day) = &special {
                prompt.push_str(&special_days::prompt_enhancement(day));
            }
        }

        let raw = self.generate_text(&prompt).await?;
        let mut post = format::strip_markdown(&raw);

        if mention {
            if let Some(day) = &special {
                if !post.to_lowercase().contains(&day.name.to_lowercase()) {
                    post.push_str(&special_days::post_closing(day, &mut rand::thread_rng()));
                }
            }
        }

        Ok(post)
    }

    async fn hashtags(&self, topic: &Topic, post: &str) -> Result<Vec<String>, ContentError> {
        let prompt = format!(
            "Suggest 10-15 LinkedIn hashtags for this post, mixing broad reach tags with \
             niche developer tags.\nCategory: {}\nTitle: {}\nContent: {:.300}\n\
             Return only a comma-separated list without # symbols.",
            topic.category, topic.title, post
        );

        match self.generate_text(&prompt).await {
            Ok(raw) => {
                let tags = hashtags::parse_tag_list(&raw);
                if tags.is_empty() {
                    Ok(hashtags::fallback_for_category(&topic.category))
                } else {
                    Ok(tags)
                }
            }
            Err(e) => {
                tracing::warn!(error = ?e, "hashtag generation failed, using fallback set");
                Ok(hashtags::fallback_for_category(&topic.category))
            }
        }
    }

    async fn image_prompt(
        &self,
        topic: &Topic,
        post: &str,
    ) -> Result<Option<String>, ContentError> {
        let prompt = format!(
            "Write one concise prompt for a clean, modern, professional illustration for a \
             LinkedIn post about {}. Tech palette, minimalist, no people, no text overlays.\n\
             Post excerpt:\n{:.500}\nReturn only the image prompt.",
            topic.title, post
        );

        match self.generate_text(&prompt).await {
            Ok(text) => Ok(Some(text)),
            Err(ContentError::EmptyResponse) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_title_strips_marketing_suffixes() {
        assert_eq!(clean_title("Async Rust: Production Guide"), "Async Rust");
        assert_eq!(
            clean_title("Database Indexing: Production Battle-Tested Insights"),
            "Database Indexing"
        );
    }

    #[test]
    fn clean_title_leaves_plain_titles_alone() {
        assert_eq!(clean_title("FastAPI vs Flask"), "FastAPI vs Flask");
    }

    #[test]
    fn response_parsing_joins_candidate_parts() {
        let raw = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "Hello " }, { "text": "world" } ] } }
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        let text: String = parsed.candidates[0]
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(text, "Hello world");
    }

    #[test]
    fn empty_candidates_deserialize_cleanly() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }
}
