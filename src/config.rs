//! Runtime configuration: defaults first, then environment overrides.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{QuoteError, QuoteResult};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const API_URL_VAR: &str = "QUOTEBOOK_API_URL";
pub const MODEL_VAR: &str = "QUOTEBOOK_MODEL";
pub const ASSETS_DIR_VAR: &str = "QUOTEBOOK_ASSETS_DIR";

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ASSETS_DIR: &str = "assets";

const CATALOG_FILE: &str = "quotes.json";
const TRANSLATIONS_FILE: &str = "quotes_translations.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(800),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when the credential is unset or blank.
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub assets_dir: PathBuf,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Pause after every expansion request.
    pub expand_delay: Duration,
    /// Pause after every translation request.
    pub translate_delay: Duration,
    pub checkpoint_every: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            expand_delay: Duration::from_secs(1),
            translate_delay: Duration::from_millis(400),
            checkpoint_every: 25,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Same as [`Config::from_env`] over an explicit variable map. Nothing is
    /// validated here so offline commands never trip over API settings.
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let mut cfg = Config::default();

        let non_blank = |name: &str| {
            vars.get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        cfg.api_key = non_blank(API_KEY_VAR);

        if let Some(url) = non_blank(API_URL_VAR) {
            cfg.api_url = url;
        }

        if let Some(model) = non_blank(MODEL_VAR) {
            cfg.model = model;
        }

        if let Some(dir) = non_blank(ASSETS_DIR_VAR) {
            cfg.assets_dir = PathBuf::from(dir);
        }

        cfg
    }

    /// Checked when an HTTP client is built.
    pub fn validate_api_url(&self) -> QuoteResult<()> {
        let url = &self.api_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(QuoteError::Config {
                message: format!("{API_URL_VAR} must be an http(s) URL, got '{url}'"),
            });
        }
        Ok(())
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.assets_dir.join(CATALOG_FILE)
    }

    pub fn translations_path(&self) -> PathBuf {
        self.assets_dir.join(TRANSLATIONS_FILE)
    }
}
