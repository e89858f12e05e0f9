//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%');

/// Join a site base URL and a relative path without doubling slashes
///
/// # Examples
/// ```ignore
/// full_url("https://example.com/", "financing/cmbs.html") // -> "https://example.com/financing/cmbs.html"
/// full_url("https://example.com", "") // -> "https://example.com/"
/// ```
pub fn full_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, encode_path(path))
}

/// Percent-encode each segment of a path, keeping the separators
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Relative prefix from an output file back to the site root
///
/// # Examples
/// ```ignore
/// depth_prefix("financing/cmbs.html") // -> "../"
/// depth_prefix("robots.txt") // -> ""
/// ```
pub fn depth_prefix(path: &str) -> String {
    let levels = path.trim_matches('/').matches('/').count();
    "../".repeat(levels)
}
