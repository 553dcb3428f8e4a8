use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;
use std::{thread, time::Duration};

use regex::Regex;
use tracing::{debug, info, warn};

use crate::model::quote::Quote;
use crate::model::translation::Translations;
use crate::services::ai::CompletionClient;
use crate::services::ai_types::{ChatRequest, TranslationReport};
use crate::services::store;

/// (code, name) pairs, in request order.
pub const TARGET_LANGUAGES: [(&str, &str); 6] = [
    ("ko", "Korean"),
    ("ja", "Japanese"),
    ("zh", "Chinese (Simplified)"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("pt", "Portuguese"),
];

pub struct TranslateOptions<'a> {
    pub model: &'a str,
    pub delay: Duration,
    pub checkpoint_every: usize,
    /// Where to persist progress mid-run. `None` keeps everything in memory.
    pub checkpoint_path: Option<&'a Path>,
}

fn refusal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)error|sorry|cannot").expect("refusal pattern is valid"))
}

pub fn build_request(model: &str, quote: &str, language: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        system: format!(
            "You are a professional translator. Translate the given English quote to {language}. \
             Maintain the meaning, tone, and style of the original quote. \
             Only return the translation, nothing else."
        ),
        user: quote.to_string(),
        temperature: 0.3,
        max_tokens: 500,
    }
}

/// Empty answers and answers that look like a refusal are rejected.
pub fn accept_translation(text: &str) -> Option<String> {
    let t = text.trim();
    if t.is_empty() || refusal_re().is_match(t) {
        return None;
    }
    Some(t.to_string())
}

/// Upserts by (quote id, language code); pairs already present are skipped.
/// A record whose quote text changed starts over, and ids no longer in the
/// catalog are dropped.
pub fn run(
    client: &dyn CompletionClient,
    catalog: &[Quote],
    translations: &mut Translations,
    opts: &TranslateOptions,
) -> TranslationReport {
    let mut report = TranslationReport::default();
    let total = catalog.len() * TARGET_LANGUAGES.len();
    let mut current = 0usize;
    let mut dirty = false;

    let ids: HashSet<u64> = catalog.iter().map(|q| q.id).collect();
    let before = translations.len();
    translations.retain(|id, _| ids.contains(id));
    if translations.len() != before {
        info!(dropped = before - translations.len(), "stale translation records removed");
        dirty = true;
    }

    info!(
        quotes = catalog.len(),
        languages = TARGET_LANGUAGES.len(),
        resumed = translations.len(),
        "translating catalog"
    );

    for (n, q) in catalog.iter().enumerate() {
        let record = translations.entry(q.id).or_default();
        if record.quote != q.quote {
            if !record.translations.is_empty() {
                debug!(id = q.id, "quote text changed, discarding old translations");
                record.translations.clear();
            }
            record.quote = q.quote.clone();
            dirty = true;
        }

        for (code, name) in TARGET_LANGUAGES {
            current += 1;

            if record.translations.contains_key(code) {
                report.skipped += 1;
                continue;
            }

            debug!("[{current}/{total}] quote {} -> {name}", q.id);
            report.attempted += 1;

            let request = build_request(opts.model, &q.quote, name);
            match client.complete(&request) {
                Ok(text) => match accept_translation(&text) {
                    Some(t) => {
                        record.translations.insert(code.to_string(), t);
                        report.succeeded += 1;
                        dirty = true;
                    }
                    None => {
                        debug!(id = q.id, lang = code, "translation rejected");
                        report.failed += 1;
                    }
                },
                Err(err) => {
                    warn!(id = q.id, lang = code, "translation failed: {err}");
                    report.failed += 1;
                }
            }

            thread::sleep(opts.delay);
        }

        let processed = n + 1;
        if dirty && opts.checkpoint_every > 0 && processed % opts.checkpoint_every == 0 {
            if let Some(path) = opts.checkpoint_path {
                match store::save_translations(path, translations) {
                    Ok(()) => {
                        dirty = false;
                        info!(processed, "checkpoint written");
                    }
                    Err(e) => warn!("checkpoint failed: {e}"),
                }
            }
        }
    }

    info!(
        attempted = report.attempted,
        succeeded = report.succeeded,
        failed = report.failed,
        skipped = report.skipped,
        "translation finished"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusals_are_rejected() {
        assert_eq!(accept_translation("Sorry, I cannot translate this."), None);
        assert_eq!(accept_translation("An ERROR occurred"), None);
        assert_eq!(accept_translation("   "), None);
    }

    #[test]
    fn blacklist_matches_inside_words() {
        // Substring match, same as the refusal check has always done.
        assert_eq!(accept_translation("Errores"), None);
    }

    #[test]
    fn accepted_text_is_trimmed() {
        assert_eq!(
            accept_translation("  La vie est belle.\n").as_deref(),
            Some("La vie est belle.")
        );
    }

    #[test]
    fn request_names_target_language() {
        let req = build_request("gpt-4o-mini", "Carpe diem.", "Chinese (Simplified)");
        assert!(req.system.contains("to Chinese (Simplified)."));
        assert_eq!(req.user, "Carpe diem.");
        assert_eq!(req.max_tokens, 500);
    }

    struct Echo;

    impl CompletionClient for Echo {
        fn complete(&self, request: &ChatRequest) -> Result<String, crate::services::ai_types::AiError> {
            Ok(format!("T({})", request.user))
        }
    }

    fn opts() -> TranslateOptions<'static> {
        TranslateOptions {
            model: "gpt-4o-mini",
            delay: Duration::ZERO,
            checkpoint_every: 0,
            checkpoint_path: None,
        }
    }

    #[test]
    fn changed_quote_text_is_translated_again() {
        let mut translations = Translations::new();
        run(&Echo, &[Quote::new(0, "Old quote text here.", "A", "love")], &mut translations, &opts());

        let report = run(&Echo, &[Quote::new(0, "Brand new quote.", "B", "time")], &mut translations, &opts());

        assert_eq!(report.attempted, 6);
        assert_eq!(report.skipped, 0);
        let record = &translations[&0];
        assert_eq!(record.quote, "Brand new quote.");
        assert!(record.translations.values().all(|t| t == "T(Brand new quote.)"));
        assert_eq!(record.translations.len(), 6);
    }

    #[test]
    fn ids_missing_from_catalog_are_dropped() {
        let mut translations = Translations::new();
        let catalog = vec![
            Quote::new(0, "First quote text.", "A", "love"),
            Quote::new(1, "Second quote text.", "B", "love"),
        ];
        run(&Echo, &catalog, &mut translations, &opts());
        assert_eq!(translations.len(), 2);

        let report = run(&Echo, &catalog[..1], &mut translations, &opts());

        assert_eq!(report.skipped, 6);
        assert_eq!(translations.keys().copied().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn six_languages_in_fixed_order() {
        let codes: Vec<&str> = TARGET_LANGUAGES.iter().map(|(c, _)| *c).collect();
        assert_eq!(codes, ["ko", "ja", "zh", "es", "fr", "pt"]);
    }
}
