//! Dot-path parsing and resolution.
//!
//! A [`KeyPath`] addresses a value nested inside records and sequences, such
//! as `user.roles.0.name`. [`resolve`] walks a literal path against one
//! value; wildcard segments (`*`) are only meaningful to the pluck engine.

use std::fmt;

use crate::value::Value;

/// One segment of a [`KeyPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Record key. May be empty when the path has repeated dots.
    Key(String),
    /// Sequence index, written in canonical decimal form.
    Index(usize),
    /// `*`: matches exactly one segment at this depth.
    Wildcard,
}

impl Segment {
    /// Parses one dot-free segment.
    pub fn parse(text: &str) -> Segment {
        if text == "*" {
            return Segment::Wildcard;
        }
        match text.parse::<usize>() {
            Ok(index) if index.to_string() == text => Segment::Index(index),
            _ => Segment::Key(text.to_string()),
        }
    }

    /// Returns `true` if this segment accepts the given path text.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Segment::Wildcard => true,
            Segment::Key(key) => key == text,
            Segment::Index(index) => text == index.to_string(),
        }
    }

    /// Returns `true` for `*`.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(index) => write!(f, "{index}"),
            Segment::Wildcard => f.write_str("*"),
        }
    }
}

/// An ordered list of path segments, written dot-joined.
///
/// # Example
///
/// ```
/// use recollect::{KeyPath, Segment};
///
/// let path = KeyPath::parse("roles.*.name");
/// assert_eq!(path.len(), 3);
/// assert!(path.has_wildcard());
/// assert_eq!(path.segments()[1], Segment::Wildcard);
/// assert_eq!(path.to_string(), "roles.*.name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyPath {
    segments: Vec<Segment>,
}

impl KeyPath {
    /// Parses a dot-joined path. Empty input yields an empty path.
    pub fn parse(path: &str) -> KeyPath {
        if path.is_empty() {
            return KeyPath::default();
        }
        KeyPath {
            segments: path.split('.').map(Segment::parse).collect(),
        }
    }

    /// Returns the segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns `true` if any segment is `*`.
    pub fn has_wildcard(&self) -> bool {
        self.segments.iter().any(Segment::is_wildcard)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        KeyPath::parse(path)
    }
}

/// Returns `true` if a path string contains a wildcard segment.
pub fn is_pattern(path: &str) -> bool {
    path.split('.').any(|segment| segment == "*")
}

/// Resolves a dot-path against a value.
///
/// - An empty key returns `holder` itself.
/// - A key the record owns literally (even one containing dots) wins.
/// - Otherwise the path is walked segment by segment. A missing key or index
///   yields `None`; reaching a scalar before the path is exhausted returns
///   that scalar unchanged.
///
/// # Example
///
/// ```
/// use recollect::{resolve, Value};
/// use serde_json::json;
///
/// let user = Value::from(json!({"name": "John", "address": {"city": "Oslo"}, "a.b": 1}));
/// assert_eq!(resolve(&user, "address.city"), Some(&Value::from("Oslo")));
/// assert_eq!(resolve(&user, "a.b"), Some(&Value::from(1)));
/// assert_eq!(resolve(&user, "name.first"), Some(&Value::from("John")));
/// assert_eq!(resolve(&user, "address.zip"), None);
/// ```
pub fn resolve<'a>(holder: &'a Value, key: &str) -> Option<&'a Value> {
    if key.is_empty() {
        return Some(holder);
    }
    if let Value::Record(record) = holder {
        if let Some(value) = record.get(key) {
            return Some(value);
        }
    }

    let mut current = holder;
    for segment in key.split('.') {
        if !current.is_container() {
            return Some(current);
        }
        current = current.child(segment)?;
    }
    Some(current)
}
