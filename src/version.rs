//! Version parsing and ordering for the update check
//!
//! Release tags in the wild are loosely formatted ("v1.2", "1.2.0",
//! "1.2-beta"), so parsing degrades gracefully instead of rejecting.

/// Parse a version string into its numeric segments.
///
/// A single leading `v` is stripped. Segments are read left to right;
/// each contributes its leading digits, and the first segment that does
/// not start with a digit ends the parse. Anything unparseable yields
/// `[0]`.
pub fn parse_version(version: &str) -> Vec<u64> {
    let trimmed = version.trim();
    let body = trimmed.strip_prefix('v').unwrap_or(trimmed);

    let mut parts = Vec::new();
    for segment in body.split('.') {
        let digits: String = segment.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            break;
        }
        // Leading digits of a short segment always fit in u64
        parts.push(digits.parse::<u64>().unwrap_or(0));
    }

    if parts.is_empty() {
        parts.push(0);
    }
    parts
}

/// True when `candidate` orders strictly after `current`.
///
/// Both sides are right-padded with zeros to equal length before the
/// lexicographic compare, so "1.2" and "1.2.0" are equal on purpose.
pub fn is_newer(candidate: &str, current: &str) -> bool {
    let mut a = parse_version(candidate);
    let mut b = parse_version(current);

    let len = a.len().max(b.len());
    a.resize(len, 0);
    b.resize(len, 0);

    a > b
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_plain() {
        assert_eq!(parse_version("1.2.3"), vec![1, 2, 3]);
        assert_eq!(parse_version("10"), vec![10]);
    }

    #[test]
    fn test_parse_leading_v() {
        assert_eq!(parse_version("v1.2.3"), vec![1, 2, 3]);
        assert_eq!(parse_version("v0.3"), vec![0, 3]);
    }

    #[test]
    fn test_parse_truncates_at_suffix() {
        // Non-numeric suffix segment ends the parse
        assert_eq!(parse_version("v2.0-rc1"), vec![2, 0]);
        assert_eq!(parse_version("1.2.beta"), vec![1, 2]);
        assert_eq!(parse_version("1..2"), vec![1]);
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_version(""), vec![0]);
        assert_eq!(parse_version("nightly"), vec![0]);
        assert_eq!(parse_version("v"), vec![0]);
    }

    #[test]
    fn test_is_newer_basic() {
        assert!(is_newer("1.10.0", "1.9.9"));
        assert!(is_newer("2.0", "1.99.99"));
        assert!(!is_newer("1.9.9", "1.10.0"));
    }

    #[test]
    fn test_is_newer_padding() {
        assert!(!is_newer("1.2", "1.2.0"));
        assert!(!is_newer("1.2.0", "1.2"));
        assert!(is_newer("1.2.1", "1.2"));
    }

    #[test]
    fn test_is_newer_equal() {
        assert!(!is_newer("1.2.3", "1.2.3"));
        assert!(!is_newer("v1.2.3", "1.2.3"));
    }

    #[test]
    fn test_is_newer_suffix_fallback() {
        // "2.1-beta" parses as 2.1, so it beats 2.0
        assert!(is_newer("2.1-beta", "2.0"));
        // garbage parses as 0 and never wins
        assert!(!is_newer("nightly", "0.1"));
    }

    proptest! {
        #[test]
        fn prop_never_newer_than_self(parts in prop::collection::vec(0u64..1000, 1..5)) {
            let version = parts
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(".");
            prop_assert!(!is_newer(&version, &version));
        }

        #[test]
        fn prop_antisymmetric(
            a in prop::collection::vec(0u64..1000, 1..5),
            b in prop::collection::vec(0u64..1000, 1..5),
        ) {
            let va = a.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(".");
            let vb = b.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(".");
            prop_assert!(!(is_newer(&va, &vb) && is_newer(&vb, &va)));
        }

        #[test]
        fn prop_trailing_zeros_are_equal(parts in prop::collection::vec(0u64..1000, 1..4)) {
            let version = parts
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(".");
            let padded = format!("{}.0", version);
            prop_assert!(!is_newer(&version, &padded));
            prop_assert!(!is_newer(&padded, &version));
        }
    }
}
