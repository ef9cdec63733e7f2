//! Tower middleware for HTTP conditional requests.
//!
//! [`Conditional`] wraps any Tower HTTP service. For every request it
//!
//! 1. parses `If-Match`, `If-None-Match`, `If-Modified-Since` and
//!    `If-Unmodified-Since`,
//! 2. calls the inner service,
//! 3. reads the response's validators and veto signal,
//! 4. answers `304 Not Modified` or `412 Precondition Failed` when the
//!    conditions say so, dropping the body,
//! 5. replaces `Cache-Control`, `Pragma`, `Expires`, `ETag` and
//!    `Last-Modified` with the selected directive.
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//! use revalidate_core::FreshnessPolicy;
//! use revalidate_tower::Conditional;
//! use tower::{ServiceBuilder, service_fn};
//!
//! let layer = Conditional::builder()
//!     .policy(FreshnessPolicy::default().max_age(Duration::from_secs(60)))
//!     .build();
//!
//! let service = ServiceBuilder::new()
//!     .layer(layer)
//!     .service(service_fn(|_req: http::Request<()>| async {
//!         Ok::<_, std::convert::Infallible>(
//!             http::Response::builder()
//!                 .header(http::header::ETAG, "\"v1\"")
//!                 .body("hello")
//!                 .unwrap(),
//!         )
//!     }));
//! # let _ = service;
//! ```
//!
//! # Validators and veto
//!
//! By default validators come from [`ResponseValidators`]: a
//! [`Validator`](revalidate_core::Validator) in the response extensions, or
//! the response's own `ETag` / `Last-Modified` headers. Use
//! [`ConditionalBuilder::validators`] to plug in any other
//! [`ValidatorSource`](revalidate_core::ValidatorSource).
//!
//! Handlers that must never be cached call [`veto`] on their response.
//! Error responses are vetoed automatically unless
//! [`ConditionalBuilder::veto_errors`] is turned off.

pub mod future;
pub mod layer;
pub mod service;

pub use layer::{Conditional, ConditionalBuilder, Settings};
pub use revalidate_http::{ResponseValidators, veto};
pub use service::ConditionalService;
