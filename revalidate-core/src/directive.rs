//! Cache directive selection.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::etag::EntityTag;
use crate::evaluator::Disposition;
use crate::policy::{Cacheability, FreshnessPolicy};
use crate::request::MethodKind;
use crate::validator::Validator;

/// `Cache-Control` value of a vetoed response.
pub const NO_CACHE_NO_STORE: &str = "no-cache, no-store";

/// `Pragma` value of a vetoed response.
pub const PRAGMA_NO_CACHE: &str = "no-cache";

/// Smallest distance of a vetoed `Expires` date into the past.
pub const MIN_FAR_PAST: Duration = Duration::from_secs(1);

/// Caching related headers of one response.
///
/// Every field maps to one header, absent fields mean the header must not be
/// sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheDirective {
    /// `Cache-Control` value.
    pub cache_control: Option<String>,
    /// `Pragma` value.
    pub pragma: Option<String>,
    /// `Expires` date.
    pub expires: Option<DateTime<Utc>>,
    /// `ETag`, written double-quoted.
    pub etag: Option<EntityTag>,
    /// `Last-Modified` date.
    pub last_modified: Option<DateTime<Utc>>,
}

impl CacheDirective {
    /// Directive that forbids caching anywhere.
    ///
    /// `Expires` lies `far_past` before `now`, and at least
    /// [`MIN_FAR_PAST`] before it.
    pub fn vetoed(policy: &FreshnessPolicy, now: DateTime<Utc>) -> Self {
        CacheDirective {
            cache_control: Some(NO_CACHE_NO_STORE.to_owned()),
            pragma: Some(PRAGMA_NO_CACHE.to_owned()),
            expires: Some(before(now, policy.far_past.max(MIN_FAR_PAST))),
            etag: None,
            last_modified: None,
        }
    }

    /// Directive without any header.
    pub fn empty() -> Self {
        CacheDirective::default()
    }

    /// `true` when no header would be written.
    pub fn is_empty(&self) -> bool {
        *self == CacheDirective::default()
    }
}

/// Selects the directive for a response.
///
/// - vetoed responses get [`CacheDirective::vetoed`];
/// - responses to methods other than GET and HEAD get no caching headers;
/// - everything else gets the policy's `Cache-Control` and `Expires`, plus
///   the validator parts that exist.
///
/// The directive is the same for every disposition, so 304 and 412
/// responses carry the same metadata a 200 would.
pub fn select(
    _disposition: Disposition,
    method: MethodKind,
    cacheability: Cacheability,
    validator: &Validator,
    policy: &FreshnessPolicy,
    now: DateTime<Utc>,
) -> CacheDirective {
    if cacheability.is_vetoed() {
        return CacheDirective::vetoed(policy, now);
    }
    if !method.is_retrieval() {
        return CacheDirective::empty();
    }

    let (etag, last_modified) = if policy.never_304 {
        (None, None)
    } else {
        (validator.entity_tag().cloned(), validator.last_modified())
    };

    CacheDirective {
        cache_control: Some(policy.cache_control()),
        pragma: None,
        expires: Some(after(now, policy.max_age)),
        etag,
        last_modified,
    }
}

/// Like [`select`], reading the current time.
pub fn select_now(
    disposition: Disposition,
    method: MethodKind,
    cacheability: Cacheability,
    validator: &Validator,
    policy: &FreshnessPolicy,
) -> CacheDirective {
    select(disposition, method, cacheability, validator, policy, Utc::now())
}

// Offsets beyond chrono's range saturate instead of panicking.
fn before(now: DateTime<Utc>, offset: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(offset)
        .ok()
        .and_then(|delta| now.checked_sub_signed(delta))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn after(now: DateTime<Utc>, offset: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(offset)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
