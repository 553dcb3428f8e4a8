use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SeedQuote {
    pub quote: String,

    #[serde(default)]
    pub author: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SeedEntry {
    pub quote: String,

    #[serde(default)]
    pub author: String,

    pub category: String,
}

/// Seed with one flat list; every entry carries its own category.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct FlatSeed {
    #[serde(default)]
    pub version: u32,

    #[serde(default)]
    pub entries: Vec<SeedEntry>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SeedCategory {
    pub category: String,

    #[serde(default)]
    pub quotes: Vec<SeedQuote>,
}

/// Seed grouped by category. Kept as an array so file order is emission order.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CategorySeed {
    #[serde(default)]
    pub version: u32,

    #[serde(default)]
    pub categories: Vec<SeedCategory>,
}

impl CategorySeed {
    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|c| c.quotes.len()).sum()
    }
}
