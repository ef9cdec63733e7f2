//! Conditional request evaluation.
//!
//! Implements the precedence of [RFC 7232 §6](https://datatracker.ietf.org/doc/html/rfc7232#section-6):
//!
//! 1. `If-Match`: fails unless the current entity tag is listed (or `*` is
//!    listed and a tag exists).
//! 2. `If-None-Match`: when the current tag is listed, answers 304 for
//!    GET/HEAD and 412 otherwise. A match here stops evaluation, so
//!    `If-Modified-Since` is never consulted.
//! 3. `If-Modified-Since`: 304 for GET/HEAD when the resource has not been
//!    modified after the given instant.
//! 4. `If-Unmodified-Since`: 412 when the resource was modified after the
//!    given instant.
//!
//! Entity-tag conditions always take precedence over date conditions. A
//! condition whose validator is missing on the resource is ignored.

use tracing::trace;

use crate::request::ConditionalRequest;
use crate::validator::Validator;

/// Outcome of conditional evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Send the full response (200).
    Full,
    /// The client's copy is current (304).
    NotModified,
    /// A precondition did not hold (412).
    PreconditionFailed,
}

impl Disposition {
    /// Only a full response carries a body.
    pub const fn has_body(self) -> bool {
        matches!(self, Disposition::Full)
    }

    /// Name used in log events.
    pub const fn as_str(self) -> &'static str {
        match self {
            Disposition::Full => "full",
            Disposition::NotModified => "not_modified",
            Disposition::PreconditionFailed => "precondition_failed",
        }
    }
}

/// Evaluates the conditional headers of `request` against `validator`.
///
/// Total over its inputs: malformed headers must already have been
/// normalized to absent values.
pub fn evaluate(request: &ConditionalRequest, validator: &Validator) -> Disposition {
    let entity_tag = validator.entity_tag();

    let if_match_failed = request
        .if_match
        .as_ref()
        .filter(|list| !list.is_empty())
        .is_some_and(|list| !list.matches(entity_tag));
    if if_match_failed {
        trace!(?entity_tag, "If-Match failed");
        return Disposition::PreconditionFailed;
    }

    let if_none_match_matched = request
        .if_none_match
        .as_ref()
        .is_some_and(|list| list.matches(entity_tag));
    if if_none_match_matched {
        trace!(?entity_tag, method = ?request.method, "If-None-Match matched");
        return if request.method.is_retrieval() {
            Disposition::NotModified
        } else {
            Disposition::PreconditionFailed
        };
    }

    let last_modified = validator.last_modified();

    if request.method.is_retrieval() {
        if let (Some(since), Some(modified)) = (request.if_modified_since, last_modified) {
            if modified <= since {
                trace!(%since, %modified, "not modified since If-Modified-Since");
                return Disposition::NotModified;
            }
        }
    }

    match (request.if_unmodified_since, last_modified) {
        (Some(since), Some(modified)) if modified > since => {
            trace!(%since, %modified, "modified after If-Unmodified-Since");
            Disposition::PreconditionFailed
        }
        _ => Disposition::Full,
    }
}
