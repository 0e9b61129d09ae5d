//! Word lookup for the search box

use strsim::jaro_winkler;

use crate::store::WordStore;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion
pub const SUGGEST_THRESHOLD: f64 = 0.8;

/// Index of the first word whose key contains `query` (case-insensitive).
/// Blank queries match nothing.
pub fn resolve(store: &WordStore, query: &str) -> Option<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    store.entries().iter().position(|e| e.key.contains(&needle))
}

/// Closest word to `query` when nothing matched. Ties go to the earlier row.
pub fn suggest(store: &WordStore, query: &str) -> Option<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let mut best: Option<(f64, &str)> = None;
    for entry in store.entries() {
        let score = jaro_winkler(&needle, &entry.key);
        if score >= SUGGEST_THRESHOLD && best.map_or(true, |(s, _)| score > s) {
            best = Some((score, entry.word.as_str()));
        }
    }
    best.map(|(_, word)| word.to_string())
}
