use crate::error::CoreError;
use url::{ParseError, Position, Url};

/// Scheme used when the input does not carry one.
pub const DEFAULT_SCHEME: &str = "https";

/// Normalizes raw user input into the URL text that gets stored.
///
/// Input without a scheme gets [`DEFAULT_SCHEME`]. The result is the parsed
/// URL's own serialization (lowercased scheme and host, percent-encoded path),
/// except that no `/` path is added to input that had none. Reachability,
/// host existence and the choice of scheme are not checked.
///
/// ```
/// use snip_core::normalize::normalize;
///
/// assert_eq!(normalize("example.com/path").unwrap(), "https://example.com/path");
/// assert_eq!(normalize("http://example.com").unwrap(), "http://example.com");
/// ```
pub fn normalize(raw: &str) -> Result<String, CoreError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(CoreError::InvalidUrl("url must not be empty".to_string()));
    }

    let candidate = if input.starts_with("//") {
        format!("{DEFAULT_SCHEME}:{input}")
    } else {
        match Url::parse(input) {
            // `example.com:8080` parses with "example.com" as its scheme. Real
            // schemes never contain a dot, so treat it as a bare host instead.
            Ok(url) if url.scheme().contains('.') => format!("{DEFAULT_SCHEME}://{input}"),
            Ok(url) => return Ok(serialize(url, input)),
            Err(ParseError::RelativeUrlWithoutBase) => format!("{DEFAULT_SCHEME}://{input}"),
            Err(err) => return Err(CoreError::InvalidUrl(format!("'{input}': {err}"))),
        }
    };

    Url::parse(&candidate)
        .map(|url| serialize(url, &candidate))
        .map_err(|err| CoreError::InvalidUrl(format!("'{input}': {err}")))
}

/// Serializes `url`, dropping the root path the parser inserts when `text`
/// has an authority but no path.
fn serialize(url: Url, text: &str) -> String {
    if url.has_authority() && url.path() == "/" && !has_path(text) {
        return format!("{}{}", &url[..Position::BeforePath], &url[Position::AfterPath..]);
    }
    url.into()
}

fn has_path(text: &str) -> bool {
    let Some((_, rest)) = text.split_once("//") else {
        return true;
    };
    match rest.find(['/', '\\', '?', '#']) {
        Some(at) => matches!(rest.as_bytes()[at], b'/' | b'\\'),
        None => false,
    }
}
