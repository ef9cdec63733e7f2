//! Entity tags and entity-tag lists.
//!
//! An [`EntityTag`] holds the opaque part of a tag, without quotes and without
//! the `W/` weakness prefix. Two tags match when their opaque parts are
//! byte-equal, so a weak tag sent by a client matches the strong tag the
//! server emits.
//!
//! An [`EntityTagList`] is the parsed value of `If-Match` or `If-None-Match`:
//! the listed tags plus a flag for the `*` wildcard.

use std::fmt;

use smol_str::SmolStr;
use tracing::trace;

/// Opaque entity tag.
///
/// Always rendered as a strong, double-quoted tag.
///
/// ```
/// use revalidate_core::EntityTag;
///
/// let tag = EntityTag::new("abc123");
/// assert_eq!(tag.to_string(), "\"abc123\"");
/// assert_eq!(EntityTag::parse("W/\"abc123\""), Some(tag));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityTag {
    opaque: SmolStr,
}

impl EntityTag {
    /// Creates a tag from its opaque part.
    ///
    /// Double quotes cannot appear inside an entity tag and are removed, so
    /// `a"b` becomes the tag `"ab"`.
    pub fn new(opaque: impl Into<SmolStr>) -> Self {
        let opaque = opaque.into();
        let opaque = if opaque.contains('"') {
            opaque.chars().filter(|c| *c != '"').collect()
        } else {
            opaque
        };
        EntityTag { opaque }
    }

    /// Parses a single tag as found in an `ETag` header.
    ///
    /// Accepts `"tag"`, `W/"tag"` and bare legacy tokens. Returns `None` for
    /// `*`, empty input or an unterminated quote.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        match split_entry(value) {
            (Entry::Tag(tag), _) => Some(tag),
            _ => None,
        }
    }

    /// The opaque part of the tag.
    pub fn as_str(&self) -> &str {
        &self.opaque
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.opaque)
    }
}

/// Parsed `If-Match` / `If-None-Match` value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityTagList {
    any: bool,
    tags: Vec<EntityTag>,
}

impl EntityTagList {
    /// The `*` list.
    pub fn any() -> Self {
        EntityTagList {
            any: true,
            tags: Vec::new(),
        }
    }

    /// A list of concrete tags.
    pub fn from_tags(tags: impl IntoIterator<Item = EntityTag>) -> Self {
        EntityTagList {
            any: false,
            tags: tags.into_iter().collect(),
        }
    }

    /// Parses one header value.
    ///
    /// Malformed entries are skipped, so garbage input yields an empty list.
    pub fn parse(value: &str) -> Self {
        Self::parse_all([value])
    }

    /// Parses and concatenates several header lines of the same field.
    pub fn parse_all<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut list = EntityTagList::default();
        for value in values {
            list.extend_from(value);
        }
        list
    }

    fn extend_from(&mut self, value: &str) {
        let mut rest = value;
        loop {
            rest = rest.trim_start_matches(|c: char| c == ',' || c.is_ascii_whitespace());
            if rest.is_empty() {
                break;
            }
            let (entry, tail) = split_entry(rest);
            match entry {
                Entry::Any => self.any = true,
                Entry::Tag(tag) => self.tags.push(tag),
                Entry::Invalid => trace!(entry = rest, "skipping malformed entity tag"),
            }
            rest = tail;
        }
    }

    /// `true` when `*` was listed.
    pub fn is_any(&self) -> bool {
        self.any
    }

    /// Concrete tags, in the order they were listed.
    pub fn tags(&self) -> &[EntityTag] {
        &self.tags
    }

    /// `true` when neither `*` nor any tag was listed.
    pub fn is_empty(&self) -> bool {
        !self.any && self.tags.is_empty()
    }

    /// Whether the list matches the current entity tag of a resource.
    ///
    /// Nothing matches a resource without an entity tag, not even `*`.
    pub fn matches(&self, current: Option<&EntityTag>) -> bool {
        match current {
            Some(current) => self.any || self.tags.iter().any(|tag| tag == current),
            None => false,
        }
    }
}

enum Entry {
    Any,
    Tag(EntityTag),
    Invalid,
}

/// Splits the first list entry off `input`, returning the entry and the
/// unconsumed remainder (starting at the next separator, if any).
fn split_entry(input: &str) -> (Entry, &str) {
    let unprefixed = input.strip_prefix("W/").unwrap_or(input);

    // Quoted tags may contain commas, so scan for the closing quote first.
    if let Some(quoted) = unprefixed.strip_prefix('"') {
        return match quoted.find('"') {
            Some(end) => {
                let tail = &quoted[end + 1..];
                let tail = tail.find(',').map_or("", |separator| &tail[separator..]);
                (Entry::Tag(EntityTag::new(&quoted[..end])), tail)
            }
            None => (Entry::Invalid, ""),
        };
    }

    let end = unprefixed.find(',').unwrap_or(unprefixed.len());
    let entry = match unprefixed[..end].trim() {
        "*" => Entry::Any,
        "" => Entry::Invalid,
        token => Entry::Tag(EntityTag::new(token)),
    };
    (entry, &unprefixed[end..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &EntityTagList) -> Vec<&str> {
        list.tags().iter().map(EntityTag::as_str).collect()
    }

    #[test]
    fn parses_quoted_list() {
        let list = EntityTagList::parse(r#""xyz1223", "1231323423", "1211211", "v1""#);
        assert!(!list.is_any());
        assert_eq!(tags(&list), vec!["xyz1223", "1231323423", "1211211", "v1"]);
    }

    #[test]
    fn parses_star() {
        let list = EntityTagList::parse("*");
        assert!(list.is_any());
        assert!(list.tags().is_empty());
        assert!(!list.is_empty());
    }

    #[test]
    fn weak_prefix_is_ignored() {
        let list = EntityTagList::parse(r#"W/"v1", "v2""#);
        assert_eq!(tags(&list), vec!["v1", "v2"]);
        assert!(list.matches(Some(&EntityTag::new("v1"))));
    }

    #[test]
    fn quoted_tags_may_contain_commas() {
        let list = EntityTagList::parse(r#""a,b", "c""#);
        assert_eq!(tags(&list), vec!["a,b", "c"]);
    }

    #[test]
    fn bare_tokens_are_accepted() {
        let list = EntityTagList::parse("abc, def");
        assert_eq!(tags(&list), vec!["abc", "def"]);
    }

    #[test]
    fn malformed_entries_are_skipped() {
        assert!(EntityTagList::parse(" , ,").is_empty());
        assert!(EntityTagList::parse("\"unterminated").is_empty());
        let list = EntityTagList::parse(r#""ok"garbage, "next""#);
        assert_eq!(tags(&list), vec!["ok", "next"]);
    }

    #[test]
    fn multiple_lines_are_combined() {
        let list = EntityTagList::parse_all([r#""a""#, r#""b", "c""#]);
        assert_eq!(tags(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn nothing_matches_missing_tag() {
        assert!(!EntityTagList::any().matches(None));
        assert!(!EntityTagList::parse(r#""v1""#).matches(None));
    }

    #[test]
    fn star_matches_any_existing_tag() {
        assert!(EntityTagList::any().matches(Some(&EntityTag::new("anything"))));
    }

    #[test]
    fn quotes_are_removed_from_opaque_part() {
        let tag = EntityTag::new(r#"a"b"#);
        assert_eq!(tag.as_str(), "ab");
        assert_eq!(tag.to_string(), r#""ab""#);
        assert_eq!(EntityTag::new(r#""""#).to_string(), r#""""#);
    }

    #[test]
    fn single_tag_parsing() {
        assert_eq!(EntityTag::parse(r#""abc""#), Some(EntityTag::new("abc")));
        assert_eq!(EntityTag::parse(r#" W/"abc" "#), Some(EntityTag::new("abc")));
        assert_eq!(EntityTag::parse("*"), None);
        assert_eq!(EntityTag::parse(""), None);
    }
}
