use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::ready;
use http::Response;
use pin_project::pin_project;
use revalidate_core::{Cacheability, ConditionalRequest, Validator, ValidatorSource};
use revalidate_http::{ConditionalBody, cacheability_of, into_conditional_response};
use tracing::debug;

use crate::layer::Settings;

/// Future resolving to the inner response rewritten by the engine.
#[pin_project]
pub struct ConditionalFuture<F, V> {
    #[pin]
    inner: F,
    request: ConditionalRequest,
    settings: Arc<Settings<V>>,
}

impl<F, V> ConditionalFuture<F, V> {
    pub fn new(inner: F, request: ConditionalRequest, settings: Arc<Settings<V>>) -> Self {
        ConditionalFuture {
            inner,
            request,
            settings,
        }
    }
}

impl<F, V, ResBody, E> Future for ConditionalFuture<F, V>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
    V: ValidatorSource<Response<ResBody>>,
{
    type Output = Result<Response<ConditionalBody<ResBody>>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let response = ready!(this.inner.poll(cx))?;
        let settings = this.settings;

        let cacheability = cacheability_of(&response, settings.veto_errors);
        let status = response.status();

        // Non-success responses that are not vetoed pass through untouched.
        if !status.is_success() && !cacheability.is_vetoed() {
            debug!(%status, "skipping conditional evaluation");
            return Poll::Ready(Ok(response.map(ConditionalBody::Full)));
        }

        let validator = match cacheability {
            Cacheability::Cacheable => settings.validators.validator(&response),
            Cacheability::Vetoed => Validator::none(),
        };
        let outcome = settings.engine.respond(this.request, &validator, cacheability);

        Poll::Ready(Ok(into_conditional_response(response, &outcome)))
    }
}
