//! Runtime configuration read from the environment (and an optional `.env` file)

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_WORD_LIST: &str = "Word List for Webapp.csv";
pub const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Provider credential. `None` means demo mode.
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
    pub word_list_path: PathBuf,
    pub page_size: usize,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            word_list_path: PathBuf::from(DEFAULT_WORD_LIST),
            page_size: DEFAULT_PAGE_SIZE,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            api_key: get("OPENAI_API_KEY"),
            model: get("MODEL_NAME").unwrap_or(defaults.model),
            api_base: get("OPENAI_BASE_URL").unwrap_or(defaults.api_base),
            timeout: get("LLM_TIMEOUT_MS")
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.timeout),
            word_list_path: get("WORD_LIST_PATH").map(PathBuf::from).unwrap_or(defaults.word_list_path),
            page_size: get("PAGE_SIZE")
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.page_size),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    pub fn demo_mode(&self) -> bool {
        self.api_key.is_none()
    }
}
