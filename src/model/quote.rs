use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Quote {
    pub id: u64,

    pub quote: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl Quote {
    pub fn new(id: u64, quote: &str, author: &str, category: &str) -> Self {
        Quote {
            id,
            quote: quote.to_string(),
            author: author.to_string(),
            category: category.to_string(),
            tags: Vec::new(),
        }
    }
}

/// Next free identifier: one past the current maximum, or 0 for an empty catalog.
pub fn next_id(catalog: &[Quote]) -> u64 {
    catalog.iter().map(|q| q.id).max().map_or(0, |max| max + 1)
}
