use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TranslationRecord {
    pub quote: String,

    /// language code -> translated text. A missing code means the
    /// translation failed or has not been attempted yet.
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

/// Keyed by quote id; serde_json writes the integer keys as strings.
pub type Translations = BTreeMap<u64, TranslationRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_string_encoded_ids() {
        let mut t = Translations::new();
        let mut rec = TranslationRecord {
            quote: "Stay hungry, stay foolish.".into(),
            ..Default::default()
        };
        rec.translations.insert("fr".into(), "Restez affamés, restez fous.".into());
        t.insert(12, rec);

        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["12"]["translations"]["fr"], "Restez affamés, restez fous.");

        let back: Translations = serde_json::from_value(v).unwrap();
        assert_eq!(back, t);
    }
}
