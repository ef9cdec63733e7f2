//! Response body that can be dropped by conditional evaluation.
//!
//! `304 Not Modified` and `412 Precondition Failed` responses never carry the
//! representation, regardless of method. [`ConditionalBody`] lets a response
//! keep its body type while the body itself is replaced with nothing.

use std::pin::Pin;
use std::task::{Context, Poll};

use http_body::{Body as HttpBody, Frame, SizeHint};
use pin_project::pin_project;

/// Body of a response after conditional evaluation.
#[pin_project(project = ConditionalBodyProj)]
#[derive(Debug)]
pub enum ConditionalBody<B> {
    /// The original body, streamed unchanged.
    Full(#[pin] B),
    /// No body.
    Empty,
}

impl<B> ConditionalBody<B> {
    pub fn is_empty(&self) -> bool {
        matches!(self, ConditionalBody::Empty)
    }

    /// The original body, if it was kept.
    pub fn into_inner(self) -> Option<B> {
        match self {
            ConditionalBody::Full(body) => Some(body),
            ConditionalBody::Empty => None,
        }
    }
}

impl<B> HttpBody for ConditionalBody<B>
where
    B: HttpBody,
{
    type Data = B::Data;
    type Error = B::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        match self.project() {
            ConditionalBodyProj::Full(body) => body.poll_frame(cx),
            ConditionalBodyProj::Empty => Poll::Ready(None),
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            ConditionalBody::Full(body) => body.is_end_stream(),
            ConditionalBody::Empty => true,
        }
    }

    fn size_hint(&self) -> SizeHint {
        match self {
            ConditionalBody::Full(body) => body.size_hint(),
            ConditionalBody::Empty => SizeHint::with_exact(0),
        }
    }
}
