use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl ChatRequest {
    pub fn body(&self) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": self.system },
                { "role": "user", "content": self.user }
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid AI response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExpansionReport {
    pub existing: usize,
    pub generated: usize,
    pub added: usize,
    pub failed_categories: Vec<String>,
    pub by_category: BTreeMap<String, usize>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TranslationReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}
