#![warn(missing_docs)]
//! # revalidate-core
//!
//! Protocol-agnostic core of HTTP conditional request handling.
//!
//! Given the parsed conditional headers of a request and the validators of
//! the response about to be sent, this crate decides whether the response is
//! sent in full, answered with `304 Not Modified` or rejected with
//! `412 Precondition Failed`, and which caching headers go with it.
//!
//! ## Components
//!
//! - [`date`] - HTTP-date parsing (three formats) and formatting
//! - [`ValidatorSource`] - where entity tags and modification times come from
//! - [`evaluate`] - RFC 7232 precedence of `If-Match`, `If-None-Match`,
//!   `If-Modified-Since` and `If-Unmodified-Since`
//! - [`select`] - `Cache-Control`, `Pragma`, `Expires`, `ETag` and
//!   `Last-Modified` for a response, including the veto mode for responses
//!   that must never be cached
//! - [`Engine`] - both steps behind one call
//!
//! Everything here is a pure function of its arguments and the current
//! time. No state survives a request.

pub mod date;
pub mod directive;
pub mod engine;
pub mod etag;
pub mod evaluator;
pub mod policy;
pub mod request;
pub mod source;
pub mod validator;

pub use directive::{CacheDirective, select, select_now};
pub use engine::{Engine, Outcome};
pub use etag::{EntityTag, EntityTagList};
pub use evaluator::{Disposition, evaluate};
pub use policy::{Cacheability, FreshnessPolicy};
pub use request::{ConditionalRequest, MethodKind};
pub use source::{SeededSource, ValidatorSource, Versioned};
pub use validator::Validator;
