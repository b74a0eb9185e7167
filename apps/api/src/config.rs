use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every key has a default, so the API starts without any configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub question_bank_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            question_bank_path: std::env::var("QUESTION_BANK_PATH")
                .unwrap_or_else(|_| "data/question_bank.xlsx".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
