//! Response side: veto detection, validators and the final rewrite.

use http::header::{CONTENT_LENGTH, ETAG, LAST_MODIFIED};
use http::{Response, StatusCode};
use revalidate_core::{Cacheability, Disposition, EntityTag, Outcome, Validator, ValidatorSource};

use crate::body::ConditionalBody;
use crate::headers::apply_directive;
use crate::request::header_date;

/// Status code written for a disposition.
pub fn status_for(disposition: Disposition) -> StatusCode {
    match disposition {
        Disposition::Full => StatusCode::OK,
        Disposition::NotModified => StatusCode::NOT_MODIFIED,
        Disposition::PreconditionFailed => StatusCode::PRECONDITION_FAILED,
    }
}

/// Marks a response as never cacheable.
///
/// Handlers call this when the body is built from externally supplied
/// content, e.g. a streamed upload.
pub fn veto<B>(response: &mut Response<B>) {
    response.extensions_mut().insert(Cacheability::Vetoed);
}

/// Determines whether a response may be cached.
///
/// A response is vetoed when its producer inserted [`Cacheability::Vetoed`]
/// into the extensions, or, with `veto_errors`, when its status is a client
/// or server error.
pub fn cacheability_of<B>(response: &Response<B>, veto_errors: bool) -> Cacheability {
    let explicit = response
        .extensions()
        .get::<Cacheability>()
        .copied()
        .unwrap_or_default();
    let status = response.status();
    if explicit.is_vetoed() || (veto_errors && (status.is_client_error() || status.is_server_error()))
    {
        Cacheability::Vetoed
    } else {
        Cacheability::Cacheable
    }
}

/// Validator source reading what the handler already attached to the
/// response.
///
/// Prefers a [`Validator`] stored in the response extensions and falls back
/// to the response's own `ETag` and `Last-Modified` headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseValidators;

impl<B> ValidatorSource<Response<B>> for ResponseValidators {
    fn validator(&self, response: &Response<B>) -> Validator {
        if let Some(validator) = response.extensions().get::<Validator>() {
            return validator.clone();
        }

        let headers = response.headers();
        let validator = match headers
            .get(ETAG)
            .and_then(|value| value.to_str().ok())
            .and_then(EntityTag::parse)
        {
            Some(tag) => Validator::none().with_entity_tag(tag),
            None => Validator::none(),
        };
        match header_date(headers, &LAST_MODIFIED) {
            Some(modified) => validator.with_last_modified(modified),
            None => validator,
        }
    }
}

/// Rewrites a response according to the outcome of conditional evaluation.
///
/// For [`Disposition::Full`] the status and body are kept. Otherwise the
/// status becomes 304 or 412 and the body is dropped together with its
/// `Content-Length`. The caching headers are replaced in every case.
pub fn into_conditional_response<B>(
    response: Response<B>,
    outcome: &Outcome,
) -> Response<ConditionalBody<B>> {
    let (mut parts, body) = response.into_parts();
    apply_directive(&outcome.directive, &mut parts.headers);

    let body = if outcome.disposition.has_body() {
        ConditionalBody::Full(body)
    } else {
        parts.status = status_for(outcome.disposition);
        parts.headers.remove(CONTENT_LENGTH);
        ConditionalBody::Empty
    };

    Response::from_parts(parts, body)
}
