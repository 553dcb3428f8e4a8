use std::collections::{BTreeMap, HashSet};
use std::{thread, time::Duration};

use tracing::{info, warn};

use crate::model::quote::{next_id, Quote};
use crate::services::ai::CompletionClient;
use crate::services::ai_types::{ChatRequest, ExpansionReport};

pub const DEFAULT_PER_CATEGORY: usize = 30;

/// Quote texts of this many characters or fewer are dropped.
const MIN_QUOTE_CHARS: usize = 10;
const SEPARATOR: &str = " - ";

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that generates inspiring quotes suitable for commercial use.";

pub struct ExpandOptions<'a> {
    pub model: &'a str,
    pub categories: &'a [&'a str],
    pub per_category: usize,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuote {
    pub quote: String,
    pub author: String,
    pub category: String,
}

pub fn build_request(model: &str, category: &str, count: usize) -> ChatRequest {
    let user = format!(
        "Generate {count} inspiring, commercial-use-friendly quotes about {category}.\n\
         Each quote should be:\n\
         1. Original or from public domain sources\n\
         2. Suitable for commercial use\n\
         3. Inspiring and meaningful\n\
         4. From well-known authors, philosophers, or public figures\n\
         5. Format: \"quote text\" - Author Name\n\
         \n\
         Return only the quotes in this format:\n\
         \"Quote text\" - Author Name\n\
         \"Quote text\" - Author Name\n\
         ..."
    );

    ChatRequest {
        model: model.to_string(),
        system: SYSTEM_PROMPT.to_string(),
        user,
        temperature: 0.8,
        max_tokens: 2000,
    }
}

/// Lines of the form `"<quote text>" - <author>`; anything else is ignored.
pub fn parse_quotes(text: &str, category: &str) -> Vec<ParsedQuote> {
    let mut quotes = Vec::new();

    for line in text.trim().lines() {
        let line = line.trim();
        if !line.starts_with('"') {
            continue;
        }

        let Some((left, right)) = line.split_once(SEPARATOR) else {
            continue;
        };

        let quote = left.trim().trim_matches('"');
        if quote.chars().count() <= MIN_QUOTE_CHARS {
            continue;
        }

        quotes.push(ParsedQuote {
            quote: quote.to_string(),
            author: right.trim().to_string(),
            category: category.to_string(),
        });
    }

    quotes
}

/// Appends quotes whose exact text is not in the catalog yet. Ids continue
/// from the current maximum. Returns how many were added.
pub fn merge_new(catalog: &mut Vec<Quote>, parsed: Vec<ParsedQuote>) -> usize {
    let mut known: HashSet<String> = catalog.iter().map(|q| q.quote.clone()).collect();
    let mut id = next_id(catalog);
    let mut added = 0usize;

    for p in parsed {
        if !known.insert(p.quote.clone()) {
            continue;
        }
        catalog.push(Quote {
            id,
            quote: p.quote,
            author: p.author,
            category: p.category,
            tags: Vec::new(),
        });
        id += 1;
        added += 1;
    }

    added
}

pub fn unique_count(catalog: &[Quote]) -> usize {
    catalog.iter().map(|q| q.quote.as_str()).collect::<HashSet<_>>().len()
}

/// One request per category; failures count as zero quotes and the run moves on.
pub fn run(
    client: &dyn CompletionClient,
    catalog: &mut Vec<Quote>,
    opts: &ExpandOptions,
) -> ExpansionReport {
    let mut report = ExpansionReport {
        existing: catalog.len(),
        ..Default::default()
    };

    info!(
        existing = catalog.len(),
        unique = unique_count(catalog),
        "expanding catalog"
    );

    let mut generated: Vec<ParsedQuote> = Vec::new();
    let mut by_category: BTreeMap<String, usize> = BTreeMap::new();

    for &category in opts.categories {
        info!(category, "generating quotes");

        let request = build_request(opts.model, category, opts.per_category);
        match client.complete(&request) {
            Ok(text) => {
                let parsed = parse_quotes(&text, category);
                info!(category, count = parsed.len(), "quotes generated");
                by_category.insert(category.to_string(), parsed.len());
                generated.extend(parsed);
            }
            Err(err) => {
                warn!(category, "generation failed: {err}");
                by_category.insert(category.to_string(), 0);
                report.failed_categories.push(category.to_string());
            }
        }

        thread::sleep(opts.delay);
    }

    report.generated = generated.len();
    report.added = merge_new(catalog, generated);
    report.by_category = by_category;

    info!(
        total = catalog.len(),
        unique = unique_count(catalog),
        added = report.added,
        "expansion finished"
    );

    report
}
