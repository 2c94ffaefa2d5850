//! URL normalization for bookmark deduplication.

/// Schemes kept as-is when present (matched ASCII case-insensitively).
const KNOWN_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Scheme prepended to anything that does not start with a known one.
const DEFAULT_SCHEME: &str = "http://";

/// Canonicalizes a free-form URL so equal bookmarks compare equal.
///
/// Trims surrounding whitespace, prepends `http://` when the input has no
/// `http://`/`https://` prefix (so `www.example.com` and `example.com` are
/// handled alike), strips any run of trailing slashes and lower-cases the result.
///
/// The function is total and idempotent. Whitespace left exposed by the slash
/// strip is removed with it, and the strip never eats into the scheme itself,
/// so `"http://"` stays `"http://"`.
///
/// Callers are expected to reject empty input before normalizing.
///
/// # Examples
///
/// ```
/// use linkstash::bookmarks::normalize;
///
/// assert_eq!(normalize("Example.com/"), "http://example.com");
/// assert_eq!(normalize("HTTPS://Example.com//"), "https://example.com");
/// ```
pub fn normalize(raw: &str) -> String {
    let (scheme, rest) = split_scheme(raw.trim());
    let rest = rest.trim_end_matches(|c: char| c == '/' || c.is_whitespace());
    format!("{scheme}{rest}").to_lowercase()
}

fn split_scheme(url: &str) -> (&str, &str) {
    for scheme in KNOWN_SCHEMES {
        if let Some(prefix) = url.get(..scheme.len()) {
            if prefix.eq_ignore_ascii_case(scheme) {
                return (scheme, &url[scheme.len()..]);
            }
        }
    }
    (DEFAULT_SCHEME, url)
}
