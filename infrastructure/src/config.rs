use dotenvy::dotenv;
use std::env;

pub struct Config {
    /// Credential preset via environment. When absent the CLI collects one
    /// interactively before anything talks to the model.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub db_path: String,
}

impl Config {
    pub fn load() -> Self {
        dotenv().ok();
        Self {
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "models/gemini-2.5-flash-lite-preview-06-17".to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            db_path: env::var("DB_PATH").unwrap_or_else(|_| "globaleconomicdata.db".to_string()),
        }
    }
}
