//! Fuzzy string similarity
//!
//! Used by knowledge lookup to tolerate misspellings. The ratio is
//! `2 * LCS / (len(a) + len(b))` over lowercased characters, which is
//! symmetric and equals 1.0 for identical inputs.

/// Default threshold for [`matches_default`]
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Case-insensitive similarity ratio in `[0, 1]`
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().flat_map(char::to_lowercase).collect();
    let b: Vec<char> = b.chars().flat_map(char::to_lowercase).collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * lcs_len(&a, &b) as f64 / total as f64
}

/// True iff `similarity(a, b) >= threshold`
pub fn matches(a: &str, b: &str, threshold: f64) -> bool {
    similarity(a, b) >= threshold
}

/// [`matches`] with [`DEFAULT_THRESHOLD`]
pub fn matches_default(a: &str, b: &str) -> bool {
    matches(a, b, DEFAULT_THRESHOLD)
}

/// Highest-scoring candidate at or above `threshold`; the first one wins ties
pub fn best_match<'a, I>(query: &str, candidates: I, threshold: f64) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let score = similarity(query, candidate);
        if score < threshold {
            continue;
        }
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((candidate, score));
        }
    }
    best
}

/// Longest common subsequence length, two-row DP
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
