use std::fs;
use std::path::Path;

use crate::error::{QuoteError, QuoteResult};
use crate::model::seed::{CategorySeed, FlatSeed};

const FLAT_SEED_JSON: &str = include_str!("../../data/seed_flat.json");
const CATEGORY_SEED_JSON: &str = include_str!("../../data/seed_categories.json");

/// Working vocabulary of categories, in emission order.
pub const CATEGORIES: [&str; 10] = [
    "happiness",
    "inspiration",
    "love",
    "success",
    "truth",
    "poetry",
    "death",
    "romance",
    "science",
    "time",
];

pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

pub fn flat_seed() -> QuoteResult<FlatSeed> {
    parse_flat(FLAT_SEED_JSON)
}

pub fn category_seed() -> QuoteResult<CategorySeed> {
    parse_categories(CATEGORY_SEED_JSON)
}

pub fn load_flat_seed(path: &Path) -> QuoteResult<FlatSeed> {
    let data = fs::read_to_string(path)?;
    parse_flat(&data)
}

pub fn load_category_seed(path: &Path) -> QuoteResult<CategorySeed> {
    let data = fs::read_to_string(path)?;
    parse_categories(&data)
}

fn parse_flat(data: &str) -> QuoteResult<FlatSeed> {
    let seed: FlatSeed = serde_json::from_str(data).map_err(|e| QuoteError::Seed {
        message: format!("flat seed: {e}"),
    })?;

    if let Some(i) = seed.entries.iter().position(|e| e.quote.trim().is_empty()) {
        return Err(QuoteError::Seed {
            message: format!("flat seed entry {i} has an empty quote"),
        });
    }

    Ok(seed)
}

fn parse_categories(data: &str) -> QuoteResult<CategorySeed> {
    let seed: CategorySeed = serde_json::from_str(data).map_err(|e| QuoteError::Seed {
        message: format!("category seed: {e}"),
    })?;

    for c in &seed.categories {
        if c.category.trim().is_empty() {
            return Err(QuoteError::Seed {
                message: "category seed has an unnamed category".into(),
            });
        }
        if c.quotes.iter().any(|q| q.quote.trim().is_empty()) {
            return Err(QuoteError::Seed {
                message: format!("category '{}' has an empty quote", c.category),
            });
        }
    }

    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_flat_seed_uses_known_categories() {
        let seed = flat_seed().unwrap();
        assert_eq!(seed.version, 1);
        assert_eq!(seed.entries.len(), 100);
        assert!(seed.entries.iter().all(|e| is_known_category(&e.category)));
    }

    #[test]
    fn bundled_category_seed_keeps_file_order() {
        let seed = category_seed().unwrap();
        let names: Vec<&str> = seed.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, CATEGORIES.to_vec());
        assert_eq!(seed.entry_count(), 150);
    }

    #[test]
    fn rejects_empty_quote_text() {
        let err = parse_flat(r#"{"version":1,"entries":[{"quote":" ","author":"x","category":"love"}]}"#)
            .unwrap_err();
        assert!(matches!(err, QuoteError::Seed { .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_categories("{ nope").is_err());
    }
}
