//! Levenshtein distance and the percentage similarity derived from it.

/// Levenshtein distance between two strings, counted in `char`s.
///
/// Insertions, deletions and substitutions each cost 1. Uses a single rolling
/// row, so memory is linear in the length of `b`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }

    row[b.len()]
}

/// Similarity of two already-normalized strings as a percentage in `0..=100`.
///
/// Equal strings score 100 without running the distance computation, which
/// also covers two empty strings.
pub fn similarity(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }

    let max_len = a.chars().count().max(b.chars().count());
    let distance = levenshtein(a, b);
    let ratio = (max_len - distance.min(max_len)) as f64 / max_len as f64;

    to_percent(ratio * 100.0)
}

/// Round and clamp a percentage into `0..=100`.
pub(crate) fn to_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
