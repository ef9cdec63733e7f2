//! Per-request entry point combining evaluation and directive selection.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::directive::{self, CacheDirective};
use crate::evaluator::{self, Disposition};
use crate::policy::{Cacheability, FreshnessPolicy};
use crate::request::ConditionalRequest;
use crate::validator::Validator;

/// Result of handling one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Whether to send the full response, 304 or 412.
    pub disposition: Disposition,
    /// Caching headers to write, whatever the disposition.
    pub directive: CacheDirective,
}

/// Conditional request engine.
///
/// Holds only the policy; every call is independent of previous ones, so a
/// single engine can be shared between threads.
///
/// ```
/// use revalidate_core::{
///     Cacheability, ConditionalRequest, Disposition, Engine, EntityTag, EntityTagList,
///     MethodKind, Validator,
/// };
///
/// let engine = Engine::default();
/// let validator = Validator::none().with_entity_tag(EntityTag::new("v1"));
/// let request = ConditionalRequest::new(MethodKind::Get)
///     .if_none_match(EntityTagList::parse("\"v1\""));
///
/// let outcome = engine.respond(&request, &validator, Cacheability::Cacheable);
/// assert_eq!(outcome.disposition, Disposition::NotModified);
/// assert_eq!(outcome.directive.etag, Some(EntityTag::new("v1")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    policy: FreshnessPolicy,
}

impl Engine {
    /// Creates an engine applying `policy`.
    pub fn new(policy: FreshnessPolicy) -> Self {
        Engine { policy }
    }

    /// The policy this engine applies.
    pub fn policy(&self) -> &FreshnessPolicy {
        &self.policy
    }

    /// Handles a response at the current time.
    pub fn respond(
        &self,
        request: &ConditionalRequest,
        validator: &Validator,
        cacheability: Cacheability,
    ) -> Outcome {
        self.respond_at(request, validator, cacheability, Utc::now())
    }

    /// Handles a response at a given time.
    ///
    /// Vetoed responses are never answered with 304 or 412: their content
    /// must not be cached, so there is nothing a client could validate.
    /// With `never_304` set the conditional headers are ignored as well.
    pub fn respond_at(
        &self,
        request: &ConditionalRequest,
        validator: &Validator,
        cacheability: Cacheability,
        now: DateTime<Utc>,
    ) -> Outcome {
        let disposition = if cacheability.is_vetoed() || self.policy.never_304 {
            Disposition::Full
        } else {
            evaluator::evaluate(request, validator)
        };

        let directive = directive::select(
            disposition,
            request.method,
            cacheability,
            validator,
            &self.policy,
            now,
        );

        debug!(
            method = ?request.method,
            conditional = request.is_conditional(),
            vetoed = cacheability.is_vetoed(),
            disposition = disposition.as_str(),
            "conditional request evaluated"
        );

        Outcome {
            disposition,
            directive,
        }
    }
}
