use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::QuoteResult;
use crate::model::quote::Quote;
use crate::model::translation::Translations;

/// The input catalog is required; a missing or broken file is fatal.
pub fn load_catalog(path: &Path) -> QuoteResult<Vec<Quote>> {
    let data = fs::read_to_string(path)?;
    let quotes: Vec<Quote> = serde_json::from_str(&data)?;
    debug!(path = %path.display(), count = quotes.len(), "catalog loaded");
    Ok(quotes)
}

pub fn save_catalog(path: &Path, quotes: &[Quote]) -> QuoteResult<()> {
    write_json(path, &quotes)?;
    debug!(path = %path.display(), count = quotes.len(), "catalog written");
    Ok(())
}

/// A missing translations file is an empty map, so a first run and a
/// resumed run go through the same path.
pub fn load_translations(path: &Path) -> QuoteResult<Translations> {
    if !path.exists() {
        return Ok(Translations::new());
    }

    let data = fs::read_to_string(path)?;
    let translations: Translations = serde_json::from_str(&data)?;
    debug!(path = %path.display(), count = translations.len(), "translations loaded");
    Ok(translations)
}

pub fn save_translations(path: &Path, translations: &Translations) -> QuoteResult<()> {
    write_json(path, translations)?;
    debug!(path = %path.display(), count = translations.len(), "translations written");
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> QuoteResult<()> {
    // serde_json leaves non-ASCII text unescaped.
    let json = serde_json::to_string_pretty(value)?;
    write_atomic(path, json.as_bytes())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> QuoteResult<()> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "quotes".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::translation::TranslationRecord;
    use tempfile::TempDir;

    #[test]
    fn catalog_round_trip_preserves_non_ascii() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assets").join("quotes.json");
        let quotes = vec![Quote::new(0, "La vie est belle, n'est-ce pas ? 人生", "Anonyme", "love")];

        save_catalog(&path, &quotes).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("人生"));
        assert!(raw.contains("\n  {"));
        assert!(!tmp_path(&path).exists());
        assert_eq!(load_catalog(&path).unwrap(), quotes);
    }

    #[test]
    fn missing_catalog_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_catalog(&dir.path().join("quotes.json")).is_err());
    }

    #[test]
    fn missing_translations_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let t = load_translations(&dir.path().join("quotes_translations.json")).unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quotes_translations.json");

        let mut t = Translations::new();
        t.insert(1, TranslationRecord { quote: "one".into(), ..Default::default() });
        save_translations(&path, &t).unwrap();

        t.clear();
        t.insert(2, TranslationRecord { quote: "two".into(), ..Default::default() });
        save_translations(&path, &t).unwrap();

        let back = load_translations(&path).unwrap();
        assert_eq!(back.keys().copied().collect::<Vec<_>>(), vec![2]);
    }
}
