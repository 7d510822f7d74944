use regex::Regex;

fn absolute_url_patterns() -> &'static [Regex] {
    use std::sync::OnceLock;

    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            vec![
                Regex::new(r"(?i)^https?://[^/\s]+").expect("invalid http(s) regex"),
                Regex::new(r"^//[^/\s]+").expect("invalid protocol-relative regex"),
            ]
        })
        .as_slice()
}

/// Determine whether a value is an absolute URL with a host.
///
/// Both `http(s)://host` and protocol-relative `//host` forms are accepted.
pub fn is_absolute_url(value: &str) -> bool {
    absolute_url_patterns()
        .iter()
        .any(|pattern| pattern.is_match(value))
}
