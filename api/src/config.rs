use std::env;
use std::time::Duration;

#[derive(Clone)]
pub struct Config {
    /// PostgreSQL URL. When unset, posts live in the in-memory store
    pub database_url: Option<String>,
    /// Base URL of an OpenAI-compatible API (without the trailing endpoint)
    pub ai_api_url: String,
    pub ai_api_key: String,
    pub ai_model: String,
    /// Upper bound for a single moderation classification call
    pub moderation_timeout: Duration,
    /// Upper bound for drafting, tagging, replies and summaries
    pub generation_timeout: Duration,
    /// Load the sample community feed into the in-memory store
    pub seed_sample_posts: bool,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            ai_api_url: env::var("AI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            ai_api_key: env::var("AI_API_KEY").unwrap_or_default(),
            ai_model: env::var("AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            moderation_timeout: Duration::from_secs(env_u64("MODERATION_TIMEOUT_SECS", 5)),
            generation_timeout: Duration::from_secs(env_u64("GENERATION_TIMEOUT_SECS", 30)),
            seed_sample_posts: env::var("SEED_SAMPLE_POSTS")
                .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Check if a language model API key is configured
    pub fn ai_enabled(&self) -> bool {
        !self.ai_api_key.is_empty()
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
