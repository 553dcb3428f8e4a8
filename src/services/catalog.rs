use crate::error::{QuoteError, QuoteResult};
use crate::model::quote::Quote;
use crate::model::seed::{CategorySeed, FlatSeed};

pub const DEFAULT_TARGET: usize = 2000;

/// Record `i` is `entries[i % len]`; ids run `0..target`.
pub fn build_flat(seed: &FlatSeed, target: usize) -> QuoteResult<Vec<Quote>> {
    if target == 0 {
        return Ok(Vec::new());
    }
    if seed.entries.is_empty() {
        return Err(QuoteError::EmptySeed { target });
    }

    let quotes = (0..target)
        .map(|i| {
            let e = &seed.entries[i % seed.entries.len()];
            Quote::new(i as u64, &e.quote, &e.author, &e.category)
        })
        .collect();

    Ok(quotes)
}

/// Walks categories in order, each category's quotes in order, and starts
/// over from the first category until `target` records exist.
pub fn build_round_robin(seed: &CategorySeed, target: usize) -> QuoteResult<Vec<Quote>> {
    if target == 0 {
        return Ok(Vec::new());
    }
    if seed.entry_count() == 0 {
        return Err(QuoteError::EmptySeed { target });
    }

    let mut quotes: Vec<Quote> = Vec::with_capacity(target);

    'fill: loop {
        for c in &seed.categories {
            for q in &c.quotes {
                if quotes.len() >= target {
                    break 'fill;
                }
                let id = quotes.len() as u64;
                quotes.push(Quote::new(id, &q.quote, &q.author, &c.category));
            }
        }
    }

    Ok(quotes)
}
