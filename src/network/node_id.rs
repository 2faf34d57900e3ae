/// Canonicalize a spectrum identifier for use as a graph node key.
///
/// Numeric identifiers are truncated to their integer string form, written out in full even
/// beyond the 64-bit range; empty, non-numeric and non-finite identifiers yield `None`.
pub fn canonicalize_node_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value: f64 = trimmed.parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    let truncated = value.trunc();
    if truncated == 0.0 {
        // -0.5 truncates to -0.0
        return Some("0".to_string());
    }
    Some(format!("{:.0}", truncated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_identifiers() {
        assert_eq!(canonicalize_node_id("42"), Some("42".to_string()));
        assert_eq!(canonicalize_node_id("42.0"), Some("42".to_string()));
        assert_eq!(canonicalize_node_id(" 7.9 "), Some("7".to_string()));
        assert_eq!(canonicalize_node_id("1e3"), Some("1000".to_string()));
        assert_eq!(canonicalize_node_id("-3"), Some("-3".to_string()));
        assert_eq!(canonicalize_node_id("-0.5"), Some("0".to_string()));
    }

    #[test]
    fn test_large_identifiers_stay_distinct() {
        let first = canonicalize_node_id("1e30").unwrap();
        let second = canonicalize_node_id("2e30").unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("1000000000000000"));
        assert_eq!(first.len(), 31);

        assert_eq!(
            canonicalize_node_id("9223372036854775807"),
            Some("9223372036854775808".to_string())
        );
        assert_ne!(canonicalize_node_id("1e19"), canonicalize_node_id("2e19"));
    }

    #[test]
    fn test_invalid_identifiers() {
        assert_eq!(canonicalize_node_id(""), None);
        assert_eq!(canonicalize_node_id("   "), None);
        assert_eq!(canonicalize_node_id("scan=12"), None);
        assert_eq!(canonicalize_node_id("NaN"), None);
        assert_eq!(canonicalize_node_id("inf"), None);
    }
}
