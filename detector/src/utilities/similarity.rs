//! Edit-distance based string similarity.
//!
//! Used by the fuzzy matcher as the tie-breaking signal between a trap's
//! original and modified sides when neither appears verbatim.

/// Levenshtein distance over Unicode scalar values, using the classic
/// two-row dynamic programming formulation.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Similarity in `[0.0, 1.0]`: `1 - distance / max_len`.
///
/// Two empty strings are defined as identical (1.0).
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("apples", "apples"), 0);
    }

    #[test]
    fn test_levenshtein_classic() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_similarity_bounds() {
        assert_eq!(normalized_similarity("", ""), 1.0);
        assert_eq!(normalized_similarity("abc", "abc"), 1.0);
        assert_eq!(normalized_similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_similarity_partial() {
        // "500-word" vs "750-word": 2 substitutions over 8 chars.
        let sim = normalized_similarity("500-word", "750-word");
        assert!((sim - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_symmetric() {
        let a = "artificial intelligence";
        let b = "machine learning";
        assert_eq!(normalized_similarity(a, b), normalized_similarity(b, a));
    }
}
