//! Configuration for the revalidate engine.
//!
//! ```yaml
//! http_caching:
//!   never_304: false
//!   max_age: 30s
//!   cache_control: "max-age=30, public"
//!   far_past: 365days
//! veto_errors: true
//! etag_seed: search
//! ```
//!
//! Every key is optional. Durations use the `humantime` syntax.

mod error;

use http::HeaderValue;
use revalidate_core::{Engine, FreshnessPolicy, SeededSource};
use serde::{Deserialize, Serialize};

pub use error::ConfigError;

/// Default seed mixed into derived entity tags.
pub const DEFAULT_ETAG_SEED: &str = "revalidate";

/// Top level configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Freshness policy for GET and HEAD responses.
    #[serde(default)]
    pub http_caching: FreshnessPolicy,
    /// Treat every 4xx and 5xx response as vetoed.
    #[serde(default = "default_veto_errors")]
    pub veto_errors: bool,
    /// Seed for entity tags derived from index versions.
    #[serde(default)]
    pub etag_seed: Option<String>,
}

fn default_veto_errors() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            http_caching: FreshnessPolicy::default(),
            veto_errors: default_veto_errors(),
            etag_seed: None,
        }
    }
}

impl Config {
    /// Parses and validates a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config =
            serde_saphyr::from_str(yaml).map_err(|error| ConfigError::Parse(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values serde cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(cache_control) = &self.http_caching.cache_control {
            if HeaderValue::from_str(cache_control).is_err() {
                return Err(ConfigError::InvalidCacheControl(cache_control.clone()));
            }
        }
        if self.http_caching.far_past.is_zero() {
            return Err(ConfigError::ZeroFarPast);
        }
        Ok(())
    }

    /// Engine configured with this policy.
    pub fn engine(&self) -> Engine {
        Engine::new(self.http_caching.clone())
    }

    /// Entity tag source for versioned resources.
    pub fn seeded_source(&self) -> SeededSource {
        SeededSource::new(self.etag_seed.as_deref().unwrap_or(DEFAULT_ETAG_SEED))
    }
}
