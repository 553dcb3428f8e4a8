use thiserror::Error;

use crate::services::ai_types::AiError;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid seed dataset: {message}")]
    Seed { message: String },

    #[error("seed dataset has no entries, cannot build {target} records")]
    EmptySeed { target: usize },

    #[error("AI request failed: {0}")]
    Ai(#[from] AiError),

    #[error("configuration error: {message}")]
    Config { message: String },
}

pub type QuoteResult<T> = Result<T, QuoteError>;
