//! One function per CLI command. Each reads what it needs from disk, runs a
//! service and writes the result back.

use std::path::Path;

use tracing::{info, warn};

use crate::config::{Config, API_KEY_VAR};
use crate::error::QuoteResult;
use crate::model::quote::Quote;
use crate::services::ai::{CompletionClient, HttpCompletionClient};
use crate::services::ai_types::{ExpansionReport, TranslationReport};
use crate::services::qa::{self, CatalogStats, QaIssue};
use crate::services::{catalog, expand, seed, store, translate};

/// Flat seed, modulo padding.
pub fn generate(cfg: &Config, target: usize, seed_path: Option<&Path>) -> QuoteResult<Vec<Quote>> {
    let flat = match seed_path {
        Some(p) => seed::load_flat_seed(p)?,
        None => seed::flat_seed()?,
    };
    info!(version = flat.version, entries = flat.entries.len(), "flat seed loaded");

    let quotes = catalog::build_flat(&flat, target)?;
    write_catalog(cfg, &quotes)?;
    Ok(quotes)
}

/// Category seed, round-robin padding.
pub fn generate_commercial(
    cfg: &Config,
    target: usize,
    seed_path: Option<&Path>,
) -> QuoteResult<Vec<Quote>> {
    let grouped = match seed_path {
        Some(p) => seed::load_category_seed(p)?,
        None => seed::category_seed()?,
    };
    info!(
        version = grouped.version,
        categories = grouped.categories.len(),
        entries = grouped.entry_count(),
        "category seed loaded"
    );

    let quotes = catalog::build_round_robin(&grouped, target)?;
    write_catalog(cfg, &quotes)?;
    Ok(quotes)
}

fn write_catalog(cfg: &Config, quotes: &[Quote]) -> QuoteResult<()> {
    let path = cfg.catalog_path();
    store::save_catalog(&path, quotes)?;

    let s = qa::stats(quotes);
    info!(
        path = %path.display(),
        total = s.total,
        unique = s.unique_quotes,
        categories = ?s.by_category.keys().collect::<Vec<_>>(),
        "catalog generated"
    );
    Ok(())
}

fn http_client(cfg: &Config) -> QuoteResult<Option<HttpCompletionClient>> {
    if cfg.api_key.is_none() {
        warn!("{API_KEY_VAR} environment variable not set, nothing to do");
        return Ok(None);
    }
    HttpCompletionClient::new(cfg).map(Some)
}

/// `None` when no credential is configured.
pub fn expand(cfg: &Config, per_category: usize) -> QuoteResult<Option<ExpansionReport>> {
    match http_client(cfg)? {
        Some(client) => expand_with(&client, cfg, per_category).map(Some),
        None => Ok(None),
    }
}

pub fn expand_with(
    client: &dyn CompletionClient,
    cfg: &Config,
    per_category: usize,
) -> QuoteResult<ExpansionReport> {
    let path = cfg.catalog_path();
    let mut quotes = store::load_catalog(&path)?;

    let opts = expand::ExpandOptions {
        model: &cfg.model,
        categories: &seed::CATEGORIES,
        per_category,
        delay: cfg.expand_delay,
    };

    let report = expand::run(client, &mut quotes, &opts);
    store::save_catalog(&path, &quotes)?;

    Ok(report)
}

/// `None` when no credential is configured.
pub fn translate(cfg: &Config) -> QuoteResult<Option<TranslationReport>> {
    match http_client(cfg)? {
        Some(client) => translate_with(&client, cfg).map(Some),
        None => Ok(None),
    }
}

pub fn translate_with(client: &dyn CompletionClient, cfg: &Config) -> QuoteResult<TranslationReport> {
    let quotes = store::load_catalog(&cfg.catalog_path())?;

    let out = cfg.translations_path();
    let mut translations = store::load_translations(&out)?;

    let opts = translate::TranslateOptions {
        model: &cfg.model,
        delay: cfg.translate_delay,
        checkpoint_every: cfg.checkpoint_every,
        checkpoint_path: Some(out.as_path()),
    };

    let report = translate::run(client, &quotes, &mut translations, &opts);

    store::save_translations(&out, &translations)?;
    info!(path = %out.display(), quotes = translations.len(), "translations saved");

    Ok(report)
}

pub fn check(cfg: &Config) -> QuoteResult<(CatalogStats, Vec<QaIssue>)> {
    let quotes = store::load_catalog(&cfg.catalog_path())?;
    Ok((qa::stats(&quotes), qa::run(&quotes)))
}
