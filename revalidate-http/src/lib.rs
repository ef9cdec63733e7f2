//! `http` crate integration for [`revalidate_core`].
//!
//! - [`conditional_request`] parses `If-*` headers out of a request
//! - [`ResponseValidators`] and [`cacheability_of`] read validators and the
//!   veto signal off a response
//! - [`into_conditional_response`] applies the outcome: status, caching
//!   headers and (for 304/412) an empty [`ConditionalBody`]

pub mod body;
pub mod headers;
mod request;
mod response;

pub use body::ConditionalBody;
pub use headers::{DIRECTIVE_HEADERS, apply_directive};
pub use request::{conditional_request, conditional_request_from_headers, header_date, method_kind};
pub use response::{
    ResponseValidators, cacheability_of, into_conditional_response, status_for, veto,
};
