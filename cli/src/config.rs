use anyhow::Context;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Bearer token for the LinkedIn REST API.
    pub linkedin_access_token: String,

    /// Gemini API key for content generation.
    pub gemini_api_key: String,

    /// Optional: enables image generation when present.
    pub openai_api_key: Option<String>,

    /// Path of the topic pool document.
    pub topics_file: String,

    // =========================
    // Schedule configuration
    // =========================
    /// Base time for the morning slot, jittered ±30min at registration.
    pub morning_post_time: String,

    /// Base time for the evening slot.
    pub evening_post_time: String,

    /// IANA timezone name all schedule times are interpreted in.
    pub timezone: String,

    /// Where generated images land before upload.
    pub image_dir: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        // A missing .env file is fine; real deployments set the vars directly.
        dotenvy::dotenv().ok();

        Ok(Self {
            linkedin_access_token: std::env::var("LINKEDIN_ACCESS_TOKEN")
                .context("LINKEDIN_ACCESS_TOKEN is required")?,
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .context("GEMINI_API_KEY is required")?,
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),

            topics_file: std::env::var("TOPICS_FILE")
                .unwrap_or_else(|_| "topics.json".to_string()),

            morning_post_time: std::env::var("MORNING_POST_TIME")
                .unwrap_or_else(|_| "09:00".to_string()),
            evening_post_time: std::env::var("EVENING_POST_TIME")
                .unwrap_or_else(|_| "18:00".to_string()),
            timezone: std::env::var("TIMEZONE").unwrap_or_else(|_| "UTC".to_string()),
            image_dir: std::env::var("IMAGE_DIR")
                .unwrap_or_else(|_| "generated_images".to_string()),
        })
    }
}
