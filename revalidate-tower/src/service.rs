use std::sync::Arc;
use std::task::{Context, Poll};

use http::{Request, Response};
use revalidate_core::ValidatorSource;
use revalidate_http::{ConditionalBody, conditional_request};
use tower::Service;

use crate::future::ConditionalFuture;
use crate::layer::Settings;

/// Service produced by [`Conditional`](crate::Conditional).
pub struct ConditionalService<S, V> {
    inner: S,
    settings: Arc<Settings<V>>,
}

impl<S, V> ConditionalService<S, V> {
    pub fn new(inner: S, settings: Arc<Settings<V>>) -> Self {
        ConditionalService { inner, settings }
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }
}

impl<S, V> Clone for ConditionalService<S, V>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        ConditionalService {
            inner: self.inner.clone(),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl<S, V, ReqBody, ResBody> Service<Request<ReqBody>> for ConditionalService<S, V>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    V: ValidatorSource<Response<ResBody>>,
{
    type Response = Response<ConditionalBody<ResBody>>;
    type Error = S::Error;
    type Future = ConditionalFuture<S::Future, V>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        // Conditions are read before the request is handed over.
        let (parts, body) = request.into_parts();
        let conditional = conditional_request(&parts);
        let response = self.inner.call(Request::from_parts(parts, body));

        ConditionalFuture::new(response, conditional, Arc::clone(&self.settings))
    }
}
