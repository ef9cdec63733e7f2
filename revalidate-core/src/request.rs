//! The conditional part of a request.

use chrono::{DateTime, Utc};

use crate::etag::EntityTagList;

/// Request method, reduced to the distinctions that affect evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// `GET`.
    Get,
    /// `HEAD`.
    Head,
    /// `POST`.
    Post,
    /// Any other method (PUT, DELETE, PATCH, ...).
    Other,
}

impl MethodKind {
    /// Classifies a method name. Matching is case-sensitive, as method
    /// names are.
    pub fn from_name(name: &str) -> Self {
        match name {
            "GET" => MethodKind::Get,
            "HEAD" => MethodKind::Head,
            "POST" => MethodKind::Post,
            _ => MethodKind::Other,
        }
    }

    /// GET and HEAD retrieve a representation; only those responses can be
    /// answered with 304 or carry cache directives.
    pub fn is_retrieval(self) -> bool {
        matches!(self, MethodKind::Get | MethodKind::Head)
    }
}

/// Conditional headers of a single request, already parsed.
///
/// Malformed header values are represented as absent (`None`) or as an
/// empty [`EntityTagList`]; both are inert during evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalRequest {
    /// Request method.
    pub method: MethodKind,
    /// Parsed `If-Match`.
    pub if_match: Option<EntityTagList>,
    /// Parsed `If-None-Match`.
    pub if_none_match: Option<EntityTagList>,
    /// Parsed `If-Modified-Since`.
    pub if_modified_since: Option<DateTime<Utc>>,
    /// Parsed `If-Unmodified-Since`.
    pub if_unmodified_since: Option<DateTime<Utc>>,
}

impl ConditionalRequest {
    /// A request without conditional headers.
    pub fn new(method: MethodKind) -> Self {
        ConditionalRequest {
            method,
            if_match: None,
            if_none_match: None,
            if_modified_since: None,
            if_unmodified_since: None,
        }
    }

    /// Sets `If-Match`.
    pub fn if_match(self, list: EntityTagList) -> Self {
        ConditionalRequest {
            if_match: Some(list),
            ..self
        }
    }

    /// Sets `If-None-Match`.
    pub fn if_none_match(self, list: EntityTagList) -> Self {
        ConditionalRequest {
            if_none_match: Some(list),
            ..self
        }
    }

    /// Sets `If-Modified-Since`.
    pub fn if_modified_since(self, instant: DateTime<Utc>) -> Self {
        ConditionalRequest {
            if_modified_since: Some(instant),
            ..self
        }
    }

    /// Sets `If-Unmodified-Since`.
    pub fn if_unmodified_since(self, instant: DateTime<Utc>) -> Self {
        ConditionalRequest {
            if_unmodified_since: Some(instant),
            ..self
        }
    }

    /// `true` when at least one conditional header is present.
    pub fn is_conditional(&self) -> bool {
        self.if_match.is_some()
            || self.if_none_match.is_some()
            || self.if_modified_since.is_some()
            || self.if_unmodified_since.is_some()
    }
}
