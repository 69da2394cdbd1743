//! Causal linkage between operations.
//!
//! An operation may name any number of parents by event id. Parents are not
//! resolved or checked for cycles here; only their shape is enforced.

/// Length of a parent reference: a hex-encoded 32-byte event id.
pub const PARENT_HASH_LEN: usize = 64;

/// Check the shape of a parent reference.
pub fn is_parent_hash(candidate: &str) -> bool {
    candidate.chars().count() == PARENT_HASH_LEN
}

/// Keep only well-shaped parent references, preserving order.
///
/// Malformed candidates are dropped silently.
pub fn normalize_parents<I, S>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .filter(|c| is_parent_hash(c.as_ref()))
        .map(|c| c.as_ref().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_filters_by_length() {
        let good = "a".repeat(64);
        let long = "b".repeat(65);
        let kept = normalize_parents(["short", good.as_str(), long.as_str()]);
        assert_eq!(kept, vec![good]);
    }

    #[test]
    fn test_preserves_order_and_duplicates() {
        let a = "1".repeat(64);
        let b = "2".repeat(64);
        let kept = normalize_parents(vec![b.clone(), a.clone(), b.clone()]);
        assert_eq!(kept, vec![b.clone(), a, b]);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_parents(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_length_counts_characters() {
        let wide = "é".repeat(64);
        assert_eq!(normalize_parents([wide.as_str()]), vec![wide.clone()]);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(candidates in prop::collection::vec(".{0,70}", 0..8)) {
            let once = normalize_parents(&candidates);
            prop_assert!(once.iter().all(|p| is_parent_hash(p)));
            prop_assert_eq!(normalize_parents(&once), once);
        }
    }
}
