use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::quote::Quote;
use crate::services::fingerprint::fingerprint;
use crate::services::seed::is_known_category;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QaIssue {
    pub id: u64,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub unique_quotes: usize,
    pub by_category: BTreeMap<String, usize>,
}

pub fn stats(catalog: &[Quote]) -> CatalogStats {
    let mut by_category: BTreeMap<String, usize> = BTreeMap::new();
    for q in catalog {
        *by_category.entry(q.category.clone()).or_default() += 1;
    }

    CatalogStats {
        total: catalog.len(),
        unique_quotes: catalog.iter().map(|q| q.quote.as_str()).collect::<HashSet<_>>().len(),
        by_category,
    }
}

fn issue(id: u64, code: &str, message: String) -> QaIssue {
    QaIssue {
        id,
        code: code.to_string(),
        message,
    }
}

pub fn run(catalog: &[Quote]) -> Vec<QaIssue> {
    let mut issues: Vec<QaIssue> = Vec::new();

    let mut seen_ids: HashSet<u64> = HashSet::new();
    // fingerprint -> first exact text seen with it
    let mut seen_prints: HashMap<String, &str> = HashMap::new();

    for q in catalog {
        if !seen_ids.insert(q.id) {
            issues.push(issue(q.id, "DUPLICATE_ID", format!("id {} appears more than once", q.id)));
        }

        if q.quote.trim().is_empty() {
            issues.push(issue(q.id, "EMPTY_QUOTE", "quote text is empty".into()));
            continue;
        }

        if q.author.trim().is_empty() {
            issues.push(issue(q.id, "EMPTY_AUTHOR", "author is empty".into()));
        }

        if !is_known_category(&q.category) {
            issues.push(issue(
                q.id,
                "UNKNOWN_CATEGORY",
                format!("category '{}' is outside the working vocabulary", q.category),
            ));
        }

        // Exact repeats come from padding and are expected; only reworded
        // variants of the same text are flagged.
        let print = fingerprint(&q.quote);
        match seen_prints.get(print.as_str()) {
            Some(first) if *first != q.quote => {
                issues.push(issue(
                    q.id,
                    "NEAR_DUPLICATE",
                    format!("'{}' differs from '{}' only in case or punctuation", q.quote, first),
                ));
            }
            Some(_) => {}
            None => {
                seen_prints.insert(print, q.quote.as_str());
            }
        }
    }

    // ids should be exactly 0..len
    let len = catalog.len() as u64;
    if seen_ids.len() as u64 != len || seen_ids.iter().any(|&id| id >= len) {
        let missing = (0..len).filter(|id| !seen_ids.contains(id)).count();
        issues.push(issue(
            len,
            "ID_GAP",
            format!("ids are not contiguous from 0 ({missing} missing below {len})"),
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(issues: &[QaIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.code.as_str()).collect()
    }

    #[test]
    fn clean_catalog_has_no_issues() {
        let catalog = vec![
            Quote::new(0, "Stay hungry, stay foolish.", "Steve Jobs", "inspiration"),
            Quote::new(1, "Stay hungry, stay foolish.", "Steve Jobs", "inspiration"),
        ];
        assert!(run(&catalog).is_empty());
    }

    #[test]
    fn flags_duplicate_ids_and_gaps() {
        let catalog = vec![
            Quote::new(0, "First quote text.", "A", "love"),
            Quote::new(0, "Second quote text.", "B", "love"),
            Quote::new(5, "Third quote text.", "C", "love"),
        ];
        let found = codes(&run(&catalog)).join(",");
        assert!(found.contains("DUPLICATE_ID"));
        assert!(found.contains("ID_GAP"));
    }

    #[test]
    fn flags_empty_fields_and_unknown_category() {
        let catalog = vec![
            Quote::new(0, " ", "A", "love"),
            Quote::new(1, "Some quote text.", "", "gardening"),
        ];
        assert_eq!(
            codes(&run(&catalog)),
            vec!["EMPTY_QUOTE", "EMPTY_AUTHOR", "UNKNOWN_CATEGORY"]
        );
    }

    #[test]
    fn flags_near_duplicates_only() {
        let catalog = vec![
            Quote::new(0, "Don't count the days.", "Ali", "time"),
            Quote::new(1, "Dont count the days.", "Ali", "time"),
        ];
        let issues = run(&catalog);
        assert_eq!(codes(&issues), vec!["NEAR_DUPLICATE"]);
        assert_eq!(issues[0].id, 1);
    }

    #[test]
    fn stats_count_unique_and_per_category() {
        let catalog = vec![
            Quote::new(0, "a", "x", "love"),
            Quote::new(1, "a", "x", "love"),
            Quote::new(2, "b", "y", "time"),
        ];
        let s = stats(&catalog);
        assert_eq!(s.total, 3);
        assert_eq!(s.unique_quotes, 2);
        assert_eq!(s.by_category["love"], 2);
    }
}
