//! Resource validators.

use chrono::{DateTime, Utc};

use crate::date;
use crate::etag::EntityTag;

/// Entity tag and last-modification time of a response.
///
/// Either part may be missing. Conditions that depend on a missing part are
/// ignored during evaluation.
///
/// The modification time is truncated to whole seconds on construction, the
/// resolution of HTTP-date, so that a value echoed back by a client compares
/// equal to the one that was sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    entity_tag: Option<EntityTag>,
    last_modified: Option<DateTime<Utc>>,
}

impl Validator {
    /// A validator with both parts.
    pub fn new(entity_tag: EntityTag, last_modified: DateTime<Utc>) -> Self {
        Validator {
            entity_tag: Some(entity_tag),
            last_modified: Some(date::truncate(last_modified)),
        }
    }

    /// No validator available.
    pub fn none() -> Self {
        Validator::default()
    }

    /// Sets the entity tag.
    pub fn with_entity_tag(self, entity_tag: EntityTag) -> Self {
        Validator {
            entity_tag: Some(entity_tag),
            ..self
        }
    }

    /// Sets the modification time.
    pub fn with_last_modified(self, last_modified: DateTime<Utc>) -> Self {
        Validator {
            last_modified: Some(date::truncate(last_modified)),
            ..self
        }
    }

    /// The entity tag, if any.
    pub fn entity_tag(&self) -> Option<&EntityTag> {
        self.entity_tag.as_ref()
    }

    /// The modification time, if any.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    /// `true` when neither part is present.
    pub fn is_empty(&self) -> bool {
        self.entity_tag.is_none() && self.last_modified.is_none()
    }
}
