//! Gateway configuration loaded from environment variables.
//!
//! All configuration is read once at startup via `std::env::var`, after
//! `dotenvy` has merged a local `.env` file when one exists.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Logging level (default: "info,comment_gateway=debug,tower_http=debug")
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 3000)
//! - `COMMENTS_BACKEND`: `rest` or `memory` (default: "rest")
//! - `REMOTE_API_BASE_URL`: REST API root (default: "https://public-api.wordpress.com/rest/v1.1")
//! - `REMOTE_API_TOKEN`: Bearer token sent to the REST API
//! - `REMOTE_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `REMOTE_USER_AGENT`: User agent for REST calls (default: "comment-gateway/<version>")
//! - `COMMENTS_FETCH_LIMIT`: Comments requested per site fetch (default: 100)
//! - `BULK_MODERATION_LIMIT`: Maximum ids per bulk request (default: 200)
//! - `BULK_MODERATION_CONCURRENCY`: Parallel remote calls per bulk request (default: 4)

use serde::Deserialize;
use std::{fmt, str::FromStr};

/// Which [`CommentServiceRemote`](crate::domain::comment::remote::CommentServiceRemote)
/// implementation the gateway talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentsBackend {
    Rest,
    Memory,
}

impl FromStr for CommentsBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rest" => Ok(Self::Rest),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected rest or memory, got '{}'", other)),
        }
    }
}

impl fmt::Display for CommentsBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rest => f.write_str("rest"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    pub backend: CommentsBackend,

    /// Root of the REST API, e.g. `https://public-api.wordpress.com/rest/v1.1`
    pub remote_api_base_url: String,

    /// Bearer token for the REST API; requests go out unauthenticated without it
    pub remote_api_token: Option<String>,

    pub remote_timeout_seconds: u64,

    pub remote_user_agent: String,

    /// Number of comments requested when fetching a site
    pub comments_fetch_limit: u32,

    pub bulk_moderation_limit: usize,

    pub bulk_moderation_concurrency: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 3000)?,
            backend: env_or("COMMENTS_BACKEND", CommentsBackend::Rest)?,
            remote_api_base_url: env_or(
                "REMOTE_API_BASE_URL",
                "https://public-api.wordpress.com/rest/v1.1".to_string(),
            )?,
            remote_api_token: std::env::var("REMOTE_API_TOKEN").ok(),
            remote_timeout_seconds: env_or("REMOTE_TIMEOUT_SECONDS", 30)?,
            remote_user_agent: env_or(
                "REMOTE_USER_AGENT",
                format!("comment-gateway/{}", env!("CARGO_PKG_VERSION")),
            )?,
            comments_fetch_limit: env_or("COMMENTS_FETCH_LIMIT", 100)?,
            bulk_moderation_limit: env_or("BULK_MODERATION_LIMIT", 200)?,
            bulk_moderation_concurrency: env_or("BULK_MODERATION_CONCURRENCY", 4)?,
        })
    }
}

/// Load an environment variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
