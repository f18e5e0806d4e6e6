// src/config.rs

use std::env;
use std::fmt;

use dotenvy::dotenv;
use url::Url;

/// Total points at which a user reaches the gold rank.
pub const GOLD_THRESHOLD: i32 = 200;

/// Total points at which a user reaches the silver rank.
pub const SILVER_THRESHOLD: i32 = 100;

/// Points awarded for every correct quiz answer, regardless of the question's own `points`.
pub const QUIZ_CORRECT_ANSWER_POINTS: i32 = 10;

/// Number of challenges produced by one generation run.
pub const GENERATED_CHALLENGE_COUNT: usize = 5;

/// Number of quiz questions produced by one generation run (and by seeding).
pub const GENERATED_QUESTION_COUNT: usize = 5;

/// Point range accepted for generated challenges.
pub const GENERATED_CHALLENGE_MIN_POINTS: i32 = 5;
pub const GENERATED_CHALLENGE_MAX_POINTS: i32 = 15;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. When absent the in-memory store is used.
    pub database_url: Option<String>,
    pub rust_log: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub seed_on_startup: bool,
    /// Fixed seed for content sampling; random per request when unset.
    pub content_rng_seed: Option<u64>,
    pub log_dir: String,
}

/// Raised when an environment variable is present but cannot be used.
#[derive(Debug)]
pub struct ConfigError {
    pub key: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.key, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError {
                key: "PORT",
                message: e.to_string(),
            })?,
            Err(_) => 3000,
        };

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_list(&raw))
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ]
            });

        let openai_api_key = env::var("OPENAI_API_KEY").ok().filter(|v| !v.trim().is_empty());

        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        Url::parse(&openai_base_url).map_err(|e| ConfigError {
            key: "OPENAI_BASE_URL",
            message: e.to_string(),
        })?;

        let openai_model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());

        let seed_on_startup = match env::var("SEED_ON_STARTUP") {
            Ok(raw) => parse_bool(&raw).ok_or(ConfigError {
                key: "SEED_ON_STARTUP",
                message: format!("expected a boolean, got '{}'", raw),
            })?,
            Err(_) => true,
        };

        let content_rng_seed = match env::var("CONTENT_RNG_SEED") {
            Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|e| ConfigError {
                key: "CONTENT_RNG_SEED",
                message: e.to_string(),
            })?),
            Err(_) => None,
        };

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        Ok(Self {
            database_url,
            rust_log,
            port,
            cors_origins,
            openai_api_key,
            openai_base_url,
            openai_model,
            seed_on_startup,
            content_rng_seed,
            log_dir,
        })
    }
}

/// Defaults with no database, no AI provider and no startup seeding.
impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            rust_log: "info".to_string(),
            port: 3000,
            cors_origins: vec!["http://localhost:3000".to_string()],
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-4o".to_string(),
            seed_on_startup: false,
            content_rng_seed: None,
            log_dir: "logs".to_string(),
        }
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
