//! Configuration loading for rtagsd.
//!
//! Settings are loaded from an optional TOML file with the following
//! resolution order:
//! 1. `--config <path>` (CLI flag; must exist)
//! 2. `~/.rtags/config.toml` (user)
//! 3. `/etc/rtags/config.toml` (system)
//!
//! Without any file, built-in defaults apply.
//!
//! Secrets never live in the file. They come from the environment:
//! - `PERPLEXITY_API_KEY` (required)
//! - `AUTHORIZED_USER_TOKENS` (comma-separated bearer tokens)
//! - `REDIS_URL` (overrides `cache.url`)

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Result, RtagsError};

/// Environment variable holding the completion API key.
pub const API_KEY_ENV: &str = "PERPLEXITY_API_KEY";
/// Environment variable holding the allow-listed bearer tokens.
pub const TOKENS_ENV: &str = "AUTHORIZED_USER_TOKENS";
/// Environment variable overriding the cache store URL.
pub const REDIS_URL_ENV: &str = "REDIS_URL";

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub completion: CompletionSettings,
    #[serde(default)]
    pub translation: TranslationSettings,
}

/// Server network configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8000).
    #[serde(default = "default_address")]
    pub address: String,
    /// Largest accepted request body in bytes (default: 10 MiB).
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_address() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

/// Which cache store to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKind {
    #[default]
    Redis,
    Memory,
}

/// Cache store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default)]
    pub backend: CacheKind,
    /// Redis URL (default: redis://localhost:6379).
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Entry lifetime in seconds (default: 3600).
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Capacity of the in-memory backend (default: 10,000).
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheKind::default(),
            url: default_redis_url(),
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_ttl_secs() -> u64 {
    3600
}

fn default_max_entries() -> u64 {
    10_000
}

/// Completion API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionSettings {
    #[serde(default = "default_completion_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            base_url: default_completion_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_completion_url() -> String {
    crate::providers::completion::DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    crate::providers::completion::DEFAULT_MODEL.to_string()
}

fn default_timeout() -> u64 {
    60
}

/// Which translation backend serves `/translate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslatorKind {
    #[default]
    Google,
    Completion,
}

/// Subtitle translation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationSettings {
    #[serde(default)]
    pub backend: TranslatorKind,
    /// Base URL of the Google endpoint.
    #[serde(default = "default_google_url")]
    pub base_url: String,
    /// Target language when the request names none (default: zh-cn).
    #[serde(default = "default_target_language")]
    pub target_language: String,
    /// Entries per backend call when the request names none (default: 200).
    #[serde(default = "default_split_threshold")]
    pub split_threshold: usize,
    /// Completion budget per batch for the `completion` backend.
    #[serde(default = "default_translation_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            backend: TranslatorKind::default(),
            base_url: default_google_url(),
            target_language: default_target_language(),
            split_threshold: default_split_threshold(),
            max_tokens: default_translation_max_tokens(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_google_url() -> String {
    crate::providers::google::DEFAULT_BASE_URL.to_string()
}

fn default_target_language() -> String {
    crate::subtitle::DEFAULT_TARGET_LANGUAGE.to_string()
}

fn default_split_threshold() -> usize {
    crate::subtitle::DEFAULT_SPLIT_THRESHOLD
}

fn default_translation_max_tokens() -> u32 {
    crate::providers::llm_translate::DEFAULT_MAX_TOKENS
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// An explicit path must exist. Otherwise the first existing file of
    /// `~/.rtags/config.toml` and `/etc/rtags/config.toml` is used, falling
    /// back to defaults when neither exists.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Config::default()),
        }
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            RtagsError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            RtagsError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(RtagsError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".rtags").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        let system_config = PathBuf::from("/etc/rtags/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }
}

/// Secrets and per-deployment values taken from the environment.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub api_key: String,
    pub authorized_tokens: Vec<String>,
    pub redis_url: Option<String>,
}

impl Secrets {
    /// Read secrets from the process environment.
    ///
    /// Fails when the completion API key is missing or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read secrets through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_ENV)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                RtagsError::Configuration(format!("{API_KEY_ENV} environment variable not set"))
            })?;

        let authorized_tokens = lookup(TOKENS_ENV)
            .map(|raw| parse_token_list(&raw))
            .unwrap_or_default();

        Ok(Self {
            api_key,
            authorized_tokens,
            redis_url: lookup(REDIS_URL_ENV).filter(|url| !url.is_empty()),
        })
    }
}

/// Split a comma-separated token list, dropping blanks.
pub fn parse_token_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
