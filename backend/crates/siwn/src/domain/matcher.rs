//! Origin domain allow-list
//!
//! Matching is case-sensitive and applies no normalization (no
//! lowercasing, no trailing-dot stripping, no IDNA mapping): the claimed
//! domain must match a pattern exactly as it was configured.

/// Check a claimed domain against the configured patterns, first match
/// wins. Pure function, no side effects.
pub fn is_allowed(domain: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .any(|pattern| matches_pattern(domain, pattern))
}

fn matches_pattern(domain: &str, pattern: &str) -> bool {
    if domain == pattern {
        return true;
    }
    // "*.example.com" admits any subdomain and the bare parent domain
    if let Some(suffix) = pattern.strip_prefix("*.") {
        return domain == suffix || domain.ends_with(&format!(".{suffix}"));
    }
    // "localhost:*" admits the bare host and the host with any port
    if let Some(prefix) = pattern.strip_suffix(":*") {
        return domain == prefix || domain.starts_with(&format!("{prefix}:"));
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match() {
        let p = patterns(&["app.example.com"]);
        assert!(is_allowed("app.example.com", &p));
        assert!(!is_allowed("other.example.com", &p));
    }

    #[test]
    fn test_subdomain_wildcard() {
        let p = patterns(&["*.example.com"]);
        assert!(is_allowed("app.example.com", &p));
        assert!(is_allowed("deep.nested.example.com", &p));
        // Bare parent domain is also allowed
        assert!(is_allowed("example.com", &p));
        assert!(!is_allowed("other.com", &p));
        assert!(!is_allowed("badexample.com", &p));
    }

    #[test]
    fn test_port_wildcard() {
        let p = patterns(&["localhost:*"]);
        assert!(is_allowed("localhost:3000", &p));
        assert!(is_allowed("localhost:8080", &p));
        assert!(is_allowed("localhost", &p));
        assert!(!is_allowed("127.0.0.1", &p));
        assert!(!is_allowed("localhost.evil.com", &p));
    }

    #[test]
    fn test_first_match_wins_across_patterns() {
        let p = patterns(&["*.example.com", "localhost:*"]);
        assert!(is_allowed("app.example.com", &p));
        assert!(is_allowed("localhost:3000", &p));
        assert!(!is_allowed("app.other.com", &p));
    }

    #[test]
    fn test_case_sensitive() {
        let p = patterns(&["App.Example.com"]);
        assert!(is_allowed("App.Example.com", &p));
        assert!(!is_allowed("app.example.com", &p));
    }

    #[test]
    fn test_empty_patterns_reject_everything() {
        assert!(!is_allowed("example.com", &[]));
    }
}
