//! Freshness policy and veto signal.
//!
//! - [`Cacheability`] - whether the producer allows the response to be cached
//! - [`FreshnessPolicy`] - how long cacheable responses stay fresh

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Veto signal from the response producer.
///
/// Handlers that stream externally supplied content, and every error
/// response, must mark their output [`Cacheability::Vetoed`]. A vetoed
/// response is sent with `no-cache, no-store` directives and an `Expires`
/// date in the past, and without validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cacheability {
    /// The response may be cached according to the policy.
    #[default]
    Cacheable,
    /// The response must never be cached.
    Vetoed,
}

impl Cacheability {
    /// `true` for [`Cacheability::Vetoed`].
    pub fn is_vetoed(self) -> bool {
        matches!(self, Cacheability::Vetoed)
    }
}

/// Default lifetime of a cacheable response.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(30);

/// Default distance of a vetoed response's `Expires` date into the past.
pub const DEFAULT_FAR_PAST: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Cache policy for GET and HEAD responses.
///
/// ```
/// use std::time::Duration;
/// use revalidate_core::FreshnessPolicy;
///
/// let policy = FreshnessPolicy::default().max_age(Duration::from_secs(60));
/// assert_eq!(policy.cache_control(), "max-age=60, public");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreshnessPolicy {
    /// Lifetime of a response, used for `Expires` and the default
    /// `Cache-Control` value (e.g. "30s", "5m").
    #[serde(default = "default_max_age", with = "humantime_serde")]
    pub max_age: Duration,
    /// Explicit `Cache-Control` value, replacing the one derived from
    /// `max_age`.
    #[serde(default)]
    pub cache_control: Option<String>,
    /// How far in the past vetoed responses expire.
    #[serde(default = "default_far_past", with = "humantime_serde")]
    pub far_past: Duration,
    /// Ignore conditional headers entirely and never emit validators.
    #[serde(default)]
    pub never_304: bool,
}

fn default_max_age() -> Duration {
    DEFAULT_MAX_AGE
}

fn default_far_past() -> Duration {
    DEFAULT_FAR_PAST
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        FreshnessPolicy {
            max_age: DEFAULT_MAX_AGE,
            cache_control: None,
            far_past: DEFAULT_FAR_PAST,
            never_304: false,
        }
    }
}

impl FreshnessPolicy {
    /// Sets the lifetime of cacheable responses.
    pub fn max_age(self, max_age: Duration) -> Self {
        FreshnessPolicy { max_age, ..self }
    }

    /// Sets an explicit `Cache-Control` value.
    pub fn with_cache_control(self, cache_control: impl Into<String>) -> Self {
        FreshnessPolicy {
            cache_control: Some(cache_control.into()),
            ..self
        }
    }

    /// Sets how far in the past vetoed responses expire. A zero offset
    /// still puts `Expires` one second in the past.
    pub fn far_past(self, far_past: Duration) -> Self {
        FreshnessPolicy { far_past, ..self }
    }

    /// Enables or disables never-304 mode.
    pub fn never_304(self, never_304: bool) -> Self {
        FreshnessPolicy { never_304, ..self }
    }

    /// `Cache-Control` value for cacheable responses. Never empty.
    pub fn cache_control(&self) -> String {
        match self.cache_control.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => value.to_owned(),
            _ => format!("max-age={}, public", self.max_age.as_secs()),
        }
    }
}
