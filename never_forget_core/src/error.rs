//! Error types for word-list loading and sentence generation

use thiserror::Error;

/// Errors raised while loading the word list. All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum VocabError {
    #[error("Word list missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Word list has no rows")]
    EmptyWordList,

    #[error("Unsupported file format: .{0}")]
    UnsupportedFormat(String),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read Excel file: {0}")]
    Excel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type VocabResult<T> = Result<T, VocabError>;

/// Failures of the text-completion call. Never propagated past the generator.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("request timed out after {0}ms")]
    Timeout(u64),

    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty response")]
    EmptyChoices,
}
