//! Reading conditional headers from an HTTP request.

use chrono::{DateTime, Utc};
use http::header::{
    HeaderMap, HeaderName, IF_MATCH, IF_MODIFIED_SINCE, IF_NONE_MATCH, IF_UNMODIFIED_SINCE,
};
use http::request::Parts;
use revalidate_core::{ConditionalRequest, EntityTagList, MethodKind, date};
use tracing::trace;

/// Reduces an [`http::Method`] to the distinctions the engine cares about.
pub fn method_kind(method: &http::Method) -> MethodKind {
    MethodKind::from_name(method.as_str())
}

/// Parses the conditional headers of a request.
pub fn conditional_request(parts: &Parts) -> ConditionalRequest {
    conditional_request_from_headers(&parts.method, &parts.headers)
}

/// Parses conditional headers from a method and a header map.
///
/// Never fails: values that are not valid UTF-8 or do not parse are treated
/// as if the header had not been sent.
pub fn conditional_request_from_headers(
    method: &http::Method,
    headers: &HeaderMap,
) -> ConditionalRequest {
    ConditionalRequest {
        method: method_kind(method),
        if_match: tag_list(headers, &IF_MATCH),
        if_none_match: tag_list(headers, &IF_NONE_MATCH),
        if_modified_since: header_date(headers, &IF_MODIFIED_SINCE),
        if_unmodified_since: header_date(headers, &IF_UNMODIFIED_SINCE),
    }
}

fn tag_list(headers: &HeaderMap, name: &HeaderName) -> Option<EntityTagList> {
    let mut values = headers
        .get_all(name)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .peekable();
    values.peek()?;
    Some(EntityTagList::parse_all(values))
}

/// Reads an HTTP-date header. Only the first line is considered.
pub fn header_date(headers: &HeaderMap, name: &HeaderName) -> Option<DateTime<Utc>> {
    let raw = headers.get(name)?;
    let parsed = raw.to_str().ok().and_then(date::parse);
    if parsed.is_none() {
        trace!(header = %name, value = ?raw, "ignoring malformed date header");
    }
    parsed
}
