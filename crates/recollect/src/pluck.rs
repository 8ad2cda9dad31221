//! Wildcard matching and plucking.
//!
//! Plucking extracts one value per item. Literal paths go through
//! [`resolve`]; paths containing `*` segments are matched against a
//! [`FlatIndex`] so that every value at the wildcard positions is collected.
//!
//! Wildcard matches are grouped per source item, never flattened across
//! items:
//!
//! ```
//! use recollect::{pluck_with_pattern, Value};
//! use serde_json::json;
//!
//! let users = vec![Value::from(json!({
//!     "name": "John",
//!     "roles": [{"name": "Editor"}, {"name": "Admin"}]
//! }))];
//!
//! let names = pluck_with_pattern(&users, "roles.*.name", None);
//! assert_eq!(names, Value::from(json!([["Editor", "Admin"]])));
//! ```

use crate::index::FlatIndex;
use crate::path::{is_pattern, resolve, KeyPath};
use crate::value::{Record, Value};

/// Matches a path pattern against the entries of a [`FlatIndex`].
///
/// An index key `i.s1...sn` matches the pattern `p1...pm` when `n == m` and
/// each `sk` matches `pk`; `*` accepts any single segment. The equal-length
/// rule is what separates `roles.*.name` from `roles.*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardMatcher {
    pattern: KeyPath,
}

impl WildcardMatcher {
    /// Creates a matcher for a dot-joined pattern.
    pub fn new(pattern: &str) -> Self {
        WildcardMatcher {
            pattern: KeyPath::parse(pattern),
        }
    }

    /// Returns the parsed pattern.
    pub fn pattern(&self) -> &KeyPath {
        &self.pattern
    }

    /// Returns `true` if a synthesized index key matches, ignoring its
    /// leading item segment.
    pub fn matches_key(&self, key: &str) -> bool {
        let mut segments = key.split('.');
        if segments.next().is_none() {
            return false;
        }
        let rest: Vec<&str> = segments.collect();
        rest.len() == self.pattern.len()
            && self
                .pattern
                .segments()
                .iter()
                .zip(&rest)
                .all(|(segment, text)| segment.matches(text))
    }

    /// Returns the matches inside one source item, in document order.
    pub fn match_item<'a>(&self, index: &FlatIndex<'a>, item: usize) -> Vec<&'a Value> {
        index
            .item_entries(item)
            .filter(|(key, _)| self.matches_key(key))
            .map(|(_, value)| value)
            .collect()
    }

    /// Returns the matches across all items, in item order.
    pub fn match_all<'a>(&self, index: &FlatIndex<'a>) -> Vec<&'a Value> {
        index
            .iter()
            .filter(|(key, _)| self.matches_key(key))
            .map(|(_, value)| value)
            .collect()
    }
}

/// Plucks values from every item.
///
/// When either path contains a `*` segment this is
/// [`pluck_with_pattern`]. Otherwise each item contributes its resolved
/// value (`Null` when absent), and with a key path the result is a record
/// keyed by the string form of each item's resolved key (`""` when absent;
/// later items overwrite earlier ones).
pub fn pluck(sequence: &[Value], value_path: &str, key_path: Option<&str>) -> Value {
    if is_pattern(value_path) || key_path.is_some_and(is_pattern) {
        return pluck_with_pattern(sequence, value_path, key_path);
    }

    let value_of = |item: &Value| resolve(item, value_path).cloned().unwrap_or_default();
    match key_path {
        None => Value::Sequence(sequence.iter().map(value_of).collect()),
        Some(key_path) => {
            let mut keyed = Record::new();
            for item in sequence {
                keyed.insert(key_string(resolve(item, key_path)), value_of(item));
            }
            Value::Record(keyed)
        }
    }
}

/// Plucks with wildcard patterns through a [`FlatIndex`].
///
/// Without a key pattern the result is a sequence holding, for each item,
/// the sequence of that item's matches. With a key pattern the result is a
/// record mapping each item's first key match to its value matches.
pub fn pluck_with_pattern(
    sequence: &[Value],
    value_pattern: &str,
    key_pattern: Option<&str>,
) -> Value {
    let index = FlatIndex::build(sequence);
    let values = WildcardMatcher::new(value_pattern);
    let keys = key_pattern.map(WildcardMatcher::new);

    let grouped = |item: usize| {
        Value::Sequence(
            values
                .match_item(&index, item)
                .into_iter()
                .cloned()
                .collect(),
        )
    };

    let result = match keys {
        None => Value::Sequence((0..sequence.len()).map(grouped).collect()),
        Some(keys) => {
            let mut keyed = Record::new();
            for item in 0..sequence.len() {
                let key = keys.match_item(&index, item).first().copied();
                keyed.insert(key_string(key), grouped(item));
            }
            Value::Record(keyed)
        }
    };
    tracing::debug!(
        value_pattern,
        key_pattern = ?key_pattern,
        items = sequence.len(),
        "plucked with wildcard pattern"
    );
    result
}

pub(crate) fn key_string(key: Option<&Value>) -> String {
    key.map(|key| key.coerce_string().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn users() -> Vec<Value> {
        vec![
            Value::from(json!({
                "id": 1,
                "name": "John",
                "roles": [{"name": "Editor"}, {"name": "Admin"}]
            })),
            Value::from(json!({
                "id": 2,
                "name": "Jane",
                "roles": [{"name": "Viewer"}]
            })),
        ]
    }

    #[test]
    fn single_item_groups_matches() {
        let items = vec![users().remove(0)];
        assert_eq!(
            pluck_with_pattern(&items, "roles.*.name", None),
            Value::from(json!([["Editor", "Admin"]]))
        );
    }

    #[test]
    fn one_group_per_item() {
        assert_eq!(
            pluck_with_pattern(&users(), "roles.*.name", None),
            Value::from(json!([["Editor", "Admin"], ["Viewer"]]))
        );
    }

    #[test]
    fn segment_count_separates_depths() {
        let items = users();
        let roles = pluck_with_pattern(&items, "roles.*", None);
        assert_eq!(
            roles,
            Value::from(json!([
                [{"name": "Editor"}, {"name": "Admin"}],
                [{"name": "Viewer"}]
            ]))
        );
    }

    #[test]
    fn top_level_wildcard() {
        let items = vec![Value::from(json!({"a": 1, "b": {"c": 2}}))];
        assert_eq!(
            pluck_with_pattern(&items, "*", None),
            Value::from(json!([[1, {"c": 2}]]))
        );
    }

    #[test]
    fn keyed_by_pattern() {
        let plucked = pluck_with_pattern(&users(), "roles.*.name", Some("name"));
        assert_eq!(
            plucked,
            Value::from(json!({"John": ["Editor", "Admin"], "Jane": ["Viewer"]}))
        );
    }

    #[test]
    fn keyed_collisions_keep_the_later_item() {
        let items = vec![
            Value::from(json!({"team": "x", "tags": ["a"]})),
            Value::from(json!({"team": "x", "tags": ["b"]})),
        ];
        assert_eq!(
            pluck_with_pattern(&items, "tags.*", Some("team")),
            Value::from(json!({"x": ["b"]}))
        );
    }

    #[test]
    fn unresolved_key_is_empty_string() {
        let plucked = pluck_with_pattern(&users(), "roles.*.name", Some("missing"));
        let record = plucked.as_record().unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record[""], Value::from(json!(["Viewer"])));
    }

    #[test]
    fn no_entry_under_scalar_parent() {
        let items = vec![Value::from(json!({"roles": "none"}))];
        assert_eq!(
            pluck_with_pattern(&items, "roles.*.name", None),
            Value::from(json!([[]]))
        );
    }

    #[test]
    fn literal_pluck_maps_resolve() {
        let items = users();
        assert_eq!(
            pluck(&items, "name", None),
            Value::from(json!(["John", "Jane"]))
        );
        assert_eq!(
            pluck(&items, "roles.0.name", None),
            Value::from(json!(["Editor", "Viewer"]))
        );
    }

    #[test]
    fn literal_pluck_missing_is_null() {
        assert_eq!(
            pluck(&users(), "email", None),
            Value::from(json!([null, null]))
        );
    }

    #[test]
    fn literal_pluck_with_key() {
        assert_eq!(
            pluck(&users(), "name", Some("id")),
            Value::from(json!({"1": "John", "2": "Jane"}))
        );
    }

    #[test]
    fn pluck_dispatches_on_wildcards() {
        let items = users();
        assert_eq!(
            pluck(&items, "roles.*.name", None),
            pluck_with_pattern(&items, "roles.*.name", None)
        );
        // A wildcard key pattern alone also selects the pattern engine
        assert_eq!(
            pluck(&items, "name", Some("roles.*.name")),
            Value::from(json!({"Editor": ["John"], "Viewer": ["Jane"]}))
        );
    }

    #[test]
    fn matcher_match_all_spans_items() {
        let items = users();
        let index = FlatIndex::build(&items);
        let matcher = WildcardMatcher::new("roles.*.name");
        let names: Vec<&str> = matcher
            .match_all(&index)
            .into_iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(names, ["Editor", "Admin", "Viewer"]);
    }

    #[test]
    fn matcher_key_rules() {
        let matcher = WildcardMatcher::new("roles.*.name");
        assert!(matcher.matches_key("0.roles.1.name"));
        assert!(matcher.matches_key("12.roles.x.name"));
        assert!(!matcher.matches_key("0.roles.1"));
        assert!(!matcher.matches_key("0.roles.1.name.first"));
        assert!(!matcher.matches_key("0.groups.1.name"));
    }
}
