use std::sync::Arc;

use revalidate_configuration::Config;
use revalidate_core::{Engine, FreshnessPolicy};
use revalidate_http::ResponseValidators;
use tower::Layer;

use crate::service::ConditionalService;

/// Shared, immutable settings of a [`Conditional`] layer.
#[derive(Debug)]
pub struct Settings<V> {
    pub engine: Engine,
    pub validators: V,
    pub veto_errors: bool,
}

/// Tower layer answering conditional requests and writing cache headers.
///
/// Built with [`Conditional::builder`]. Cloning is cheap: the settings are
/// shared through an [`Arc`].
#[derive(Debug)]
pub struct Conditional<V = ResponseValidators> {
    settings: Arc<Settings<V>>,
}

impl<V> Clone for Conditional<V> {
    fn clone(&self) -> Self {
        Conditional {
            settings: Arc::clone(&self.settings),
        }
    }
}

impl Conditional<ResponseValidators> {
    pub fn builder() -> ConditionalBuilder<ResponseValidators> {
        ConditionalBuilder::default()
    }
}

impl Default for Conditional<ResponseValidators> {
    fn default() -> Self {
        Conditional::builder().build()
    }
}

impl<V> Conditional<V> {
    pub fn settings(&self) -> &Settings<V> {
        &self.settings
    }
}

impl<S, V> Layer<S> for Conditional<V> {
    type Service = ConditionalService<S, V>;

    fn layer(&self, inner: S) -> Self::Service {
        ConditionalService::new(inner, Arc::clone(&self.settings))
    }
}

/// Builder for [`Conditional`].
pub struct ConditionalBuilder<V> {
    policy: FreshnessPolicy,
    validators: V,
    veto_errors: bool,
}

impl<V> ConditionalBuilder<V> {
    /// Replaces the freshness policy.
    pub fn policy(self, policy: FreshnessPolicy) -> Self {
        ConditionalBuilder { policy, ..self }
    }

    /// Disables conditional evaluation and validator headers.
    pub fn never_304(self, never_304: bool) -> Self {
        ConditionalBuilder {
            policy: self.policy.never_304(never_304),
            ..self
        }
    }

    /// Whether 4xx and 5xx responses are sent as vetoed. Enabled by default.
    pub fn veto_errors(self, veto_errors: bool) -> Self {
        ConditionalBuilder {
            veto_errors,
            ..self
        }
    }

    /// Takes the policy and veto setting from a loaded configuration.
    pub fn config(self, config: &Config) -> Self {
        ConditionalBuilder {
            policy: config.http_caching.clone(),
            veto_errors: config.veto_errors,
            ..self
        }
    }

    /// Replaces the source of response validators.
    pub fn validators<NV>(self, validators: NV) -> ConditionalBuilder<NV> {
        ConditionalBuilder {
            policy: self.policy,
            validators,
            veto_errors: self.veto_errors,
        }
    }

    pub fn build(self) -> Conditional<V> {
        Conditional {
            settings: Arc::new(Settings {
                engine: Engine::new(self.policy),
                validators: self.validators,
                veto_errors: self.veto_errors,
            }),
        }
    }
}

impl Default for ConditionalBuilder<ResponseValidators> {
    fn default() -> Self {
        ConditionalBuilder {
            policy: FreshnessPolicy::default(),
            validators: ResponseValidators,
            veto_errors: true,
        }
    }
}
