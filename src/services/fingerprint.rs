use sha2::{Digest, Sha256};

/// Folds the ways model output varies on the same quote: case, curly vs
/// straight quote marks, dash style, brackets, ellipses and the closing
/// punctuation.
pub fn normalize(text: &str) -> String {
    let folded = text
        .chars()
        .filter_map(|ch| match ch {
            '“' | '”' | '‘' | '’' | '"' | '\'' | '«' | '»' | '(' | ')' => None,
            '—' | '–' | '‑' | '-' => Some(' '),
            '…' => Some('.'),
            c => Some(c),
        })
        .collect::<String>()
        .to_lowercase();

    let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches(|c: char| matches!(c, '.' | '!' | ',' | ';' | ' '))
        .to_string()
}

pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize(text).as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_case_space_and_quote_marks() {
        assert_eq!(
            normalize("  “Don’t  count the DAYS…”  "),
            "dont count the days"
        );
    }

    #[test]
    fn closing_punctuation_is_dropped_but_inner_kept() {
        assert_eq!(normalize("Well done, is better than well said..."), "well done, is better than well said");
        assert_eq!(normalize("«Veni, vidi, vici!»"), "veni, vidi, vici");
    }

    #[test]
    fn reworded_punctuation_shares_a_fingerprint() {
        assert_eq!(
            fingerprint("Life is what happens (while you plan)."),
            fingerprint("life is what happens while you plan.")
        );
        assert_ne!(fingerprint("Carpe diem."), fingerprint("Carpe noctem."));
        assert_eq!(
            fingerprint("Time—like money—is finite."),
            fingerprint("Time - like money - is finite!")
        );
        assert_eq!(fingerprint("x").len(), 64);
    }
}
