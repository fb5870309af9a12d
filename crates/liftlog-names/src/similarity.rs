//! Edit-distance similarity between canonical keys

use strsim::levenshtein;

use crate::normalize::normalize;

/// Classic single-character edit distance (insert, delete, substitute; unit
/// cost each), counted in Unicode scalar values.
pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein(a, b)
}

/// Similarity in [0.0, 1.0] between two already-canonical keys.
///
/// `1 - distance / max(len(a), len(b))`. Two empty keys score 1.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = edit_distance(a, b);
    let score = max_len.saturating_sub(distance) as f64 / max_len as f64;
    score.clamp(0.0, 1.0)
}

/// Similarity between two raw names, normalizing both first.
pub fn name_similarity(a: &str, b: &str) -> f64 {
    similarity(&normalize(a), &normalize(b))
}
