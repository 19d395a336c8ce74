use anyhow::{Context, Result};

const DEFAULT_MODEL: &str = "anthropic/claude-3-haiku";
const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    fn parse(raw: &str) -> Self {
        if raw.trim() == "*" {
            return AllowedOrigins::Any;
        }
        AllowedOrigins::List(
            raw.split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
        )
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openrouter_api_key: String,
    pub openrouter_model: String,
    pub openrouter_base_url: String,
    pub openrouter_timeout_secs: u64,
    pub allowed_origins: AllowedOrigins,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            openrouter_api_key: require_var(&lookup, "OPENROUTER_API_KEY")?,
            openrouter_model: optional("OPENROUTER_MODEL", DEFAULT_MODEL),
            openrouter_base_url: optional("OPENROUTER_BASE_URL", DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            openrouter_timeout_secs: optional("OPENROUTER_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("OPENROUTER_TIMEOUT_SECS must be a whole number of seconds")?,
            allowed_origins: AllowedOrigins::parse(&optional("ALLOWED_ORIGINS", "*")),
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            port: optional("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG", "info"),
        })
    }
}

fn require_var<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}
