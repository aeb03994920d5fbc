use serde::{Deserialize, Serialize};

pub type TopicId = u64;

/// One unit of post subject matter.
///
/// `extra` carries opaque passenger fields (problem-source id, slug,
/// difficulty, acceptance metric) that must round-trip through the store
/// untouched; nothing here interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub category: String,
    pub title: String,
    pub prompt: String,
    #[serde(default)]
    pub used: bool,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Topic {
    pub fn new(id: TopicId, category: impl Into<String>, title: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id,
            category: category.into(),
            title: title.into(),
            prompt: prompt.into(),
            used: false,
            extra: serde_json::Map::new(),
        }
    }
}
