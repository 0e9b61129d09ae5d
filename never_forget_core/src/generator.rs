//! Example-sentence generation at three difficulty levels

use chrono::{DateTime, Utc};
use regex::RegexBuilder;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::ProviderError;
use crate::provider::{CompletionProvider, OpenAiProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum Level {
    #[default]
    Easy,
    Moderate,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Moderate, Level::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Easy => "Easy",
            Level::Moderate => "Moderate",
            Level::Hard => "Hard",
        }
    }

    /// Inclusive word-count range a sentence at this level should fall in.
    pub fn word_range(&self) -> (usize, usize) {
        match self {
            Level::Easy => (8, 14),
            Level::Moderate => (12, 18),
            Level::Hard => (15, 25),
        }
    }

    /// Constraint text placed in the prompt.
    pub fn band(&self) -> &'static str {
        match self {
            Level::Easy => "CEFR A2–B1, 8–14 words, everyday topics, common vocabulary",
            Level::Moderate => "IELTS 6.0–7.0, 12–18 words, natural collocations and clauses",
            Level::Hard => "GRE/academic tone, 15–25 words, analytical or abstract context",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Level::Easy),
            "moderate" => Ok(Level::Moderate),
            "hard" => Ok(Level::Hard),
            other => Err(format!("Unknown level: {}", other)),
        }
    }
}

/// A sentence shown under the flashcard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedSentence {
    pub text: String,
    pub level: Level,
    pub generated_at: DateTime<Utc>,
}

impl GeneratedSentence {
    pub fn new(text: String, level: Level) -> Self {
        Self {
            text,
            level,
            generated_at: Utc::now(),
        }
    }
}

pub fn build_prompt(word: &str, definition: &str, level: Level) -> String {
    format!(
        "Generate 1 {level} sentence using the word '{word}'. \
         Definition: {definition}. Constraints: {band}. \
         Use the target word exactly once. Output just the sentence.",
        band = level.band()
    )
}

/// True iff `word` occurs exactly once in `text` as a whole word, ignoring case.
pub fn appears_once(word: &str, text: &str) -> bool {
    let word = word.trim();
    if word.is_empty() {
        return false;
    }
    let pattern = format!(r"\b{}\b", regex::escape(word));
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re.find_iter(text).count() == 1,
        Err(_) => false,
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// True iff the whitespace-delimited word count is inside the level's range.
pub fn validate_length(level: Level, text: &str) -> bool {
    let (min, max) = level.word_range();
    (min..=max).contains(&word_count(text))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub appears_once: bool,
    pub length_ok: bool,
    pub word_count: usize,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.appears_once && self.length_ok
    }
}

pub fn validate(word: &str, level: Level, text: &str) -> ValidationReport {
    ValidationReport {
        appears_once: appears_once(word, text),
        length_ok: validate_length(level, text),
        word_count: word_count(text),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    word: String,
    definition: String,
    level: Level,
}

/// Produces example sentences, memoized per (word, definition, level).
///
/// Without a provider every call returns a fixed demo template.
pub struct SentenceGenerator {
    provider: Option<Box<dyn CompletionProvider>>,
    cache: HashMap<CacheKey, String>,
    /// Counts fresh generations; those are never stored in `cache`
    nonce: u64,
}

impl SentenceGenerator {
    pub fn demo() -> Self {
        Self {
            provider: None,
            cache: HashMap::new(),
            nonce: 0,
        }
    }

    pub fn with_provider(provider: Box<dyn CompletionProvider>) -> Self {
        Self {
            provider: Some(provider),
            ..Self::demo()
        }
    }

    /// OpenAI provider when an api key is configured, demo otherwise.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        match OpenAiProvider::from_config(config) {
            Some(provider) => {
                info!(model = %config.model, "sentence generation via provider");
                Ok(Self::with_provider(Box::new(provider?)))
            }
            None => {
                info!("no api key configured; sentence generation in demo mode");
                Ok(Self::demo())
            }
        }
    }

    pub fn is_demo(&self) -> bool {
        self.provider.is_none()
    }

    /// Cached generation: the same inputs return the same text.
    pub fn generate(&mut self, word: &str, definition: &str, level: Level) -> String {
        let key = CacheKey {
            word: word.to_string(),
            definition: definition.to_string(),
            level,
        };
        if let Some(text) = self.cache.get(&key) {
            debug!(word, %level, "sentence cache hit");
            return text.clone();
        }
        debug!(word, %level, "sentence cache miss");

        match self.call_provider(word, definition, level) {
            Ok(text) => {
                self.cache.insert(key, text.clone());
                text
            }
            // Errors are shown but not cached so the next click retries
            Err(text) => text,
        }
    }

    /// Fresh generation that bypasses the cache and leaves it untouched.
    pub fn regenerate(&mut self, word: &str, definition: &str, level: Level) -> String {
        self.nonce += 1;
        debug!(word, %level, nonce = self.nonce, "fresh sentence requested");
        self.call_provider(word, definition, level).unwrap_or_else(|text| text)
    }

    fn call_provider(&self, word: &str, definition: &str, level: Level) -> Result<String, String> {
        let Some(provider) = self.provider.as_ref() else {
            return Ok(demo_sentence(word, level));
        };

        match provider.complete(&build_prompt(word, definition, level)) {
            Ok(raw) => {
                let text = raw.trim().to_string();
                let report = validate(word, level, &text);
                if !report.passed() {
                    warn!(
                        word,
                        %level,
                        word_count = report.word_count,
                        appears_once = report.appears_once,
                        "generated sentence failed validation"
                    );
                }
                Ok(text)
            }
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "sentence generation failed");
                Err(format!("[Provider error] {}", e))
            }
        }
    }
}

pub fn demo_sentence(word: &str, level: Level) -> String {
    format!("(demo) Use {} naturally in a {} sentence.", word, level.as_str().to_lowercase())
}
