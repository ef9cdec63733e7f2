//! Writing a [`CacheDirective`] into response headers.

use http::HeaderValue;
use http::header::{CACHE_CONTROL, ETAG, EXPIRES, HeaderMap, HeaderName, LAST_MODIFIED, PRAGMA};
use revalidate_core::{CacheDirective, date};
use tracing::warn;

/// Headers owned by the directive. Values set upstream are replaced.
pub const DIRECTIVE_HEADERS: [HeaderName; 5] =
    [CACHE_CONTROL, PRAGMA, EXPIRES, ETAG, LAST_MODIFIED];

/// Replaces the caching headers in `headers` with those of `directive`.
///
/// Headers the directive leaves out are removed, so a POST response never
/// leaks `Cache-Control` or `Expires` set by a handler. Values that cannot be
/// represented as a header value are dropped with a warning.
pub fn apply_directive(directive: &CacheDirective, headers: &mut HeaderMap) {
    for name in &DIRECTIVE_HEADERS {
        headers.remove(name);
    }

    let values = [
        (CACHE_CONTROL, directive.cache_control.clone()),
        (PRAGMA, directive.pragma.clone()),
        (EXPIRES, directive.expires.map(date::format)),
        (ETAG, directive.etag.as_ref().map(ToString::to_string)),
        (LAST_MODIFIED, directive.last_modified.map(date::format)),
    ];

    for (name, value) in values {
        let Some(value) = value else {
            continue;
        };
        match HeaderValue::try_from(value) {
            Ok(value) => {
                headers.insert(name, value);
            }
            Err(error) => warn!(header = %name, %error, "dropping invalid cache header"),
        }
    }
}
