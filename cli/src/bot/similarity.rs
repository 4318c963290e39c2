//! # Statement Similarity
//!
//! File: cli/src/bot/similarity.rs
//! Author: Christi Mahu
//!
//! Case-insensitive Levenshtein similarity between two statements, expressed as
//! a ratio in `0.0..=1.0` and rounded to two decimals so confidence values stay
//! stable when compared against the configured threshold.
//!

/// Returns how similar `a` and `b` are, from `0.0` (nothing in common) to `1.0` (identical).
///
/// Comparison ignores case and surrounding whitespace. Two empty strings are
/// considered unrelated rather than identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.trim().to_lowercase().chars().collect();
    let b: Vec<char> = b.trim().to_lowercase().chars().collect();

    let longest = a.len().max(b.len());
    if longest == 0 {
        return 0.0;
    }

    let distance = levenshtein(&a, &b);
    let ratio = 1.0 - distance as f64 / longest as f64;
    (ratio * 100.0).round() / 100.0
}

/// Edit distance using a single rolling row.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ca != cb);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }
    row[b.len()]
}
