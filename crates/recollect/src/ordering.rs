//! Ordering types for sorting records by path.
//!
//! Provides [`Dir`] for sort direction and [`OrderBy`] for path-based ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::path::resolve;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ordering clause specifying a path and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// The dot-path to sort by.
    pub path: String,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new ascending ordering for the given path.
    pub fn asc(path: impl Into<String>) -> Self {
        OrderBy::new(path, Dir::Asc)
    }

    /// Creates a new descending ordering for the given path.
    pub fn desc(path: impl Into<String>) -> Self {
        OrderBy::new(path, Dir::Desc)
    }

    /// Creates a new ordering with the given direction.
    pub fn new(path: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            path: path.into(),
            dir,
        }
    }

    /// Compares two items by the value at this ordering's path.
    ///
    /// Null and missing values sort last in both directions; the direction
    /// only reverses the order of present values.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let a = resolve(a, &self.path).unwrap_or(&Value::Null);
        let b = resolve(b, &self.path).unwrap_or(&Value::Null);
        match (a.is_null(), b.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.dir.apply(compare_values(a, b)),
        }
    }
}

/// Compares two values under a total order.
///
/// Values of different kinds order by kind: booleans, numbers, strings,
/// sequences, records, then null. Within a kind, numbers compare exactly
/// with NaN last, strings lexicographically, and containers element by
/// element (records by key, then value) with the shorter one first on a
/// common prefix.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a.total_cmp(*b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Sequence(a), Value::Sequence(b)) => a
            .iter()
            .zip(b)
            .map(|(a, b)| compare_values(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len())),
        (Value::Record(a), Value::Record(b)) => a
            .iter()
            .zip(b)
            .map(|((ka, va), (kb, vb))| ka.cmp(kb).then_with(|| compare_values(va, vb)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len())),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Sequence(_) => 3,
        Value::Record(_) => 4,
        Value::Null => 5,
    }
}

/// Compares two items using a list of ordering clauses.
///
/// Uses the first clause as the primary sort key, the second to break ties, etc.
/// If all clauses compare equal, returns `Equal`.
pub fn compare_by_orderings(a: &Value, b: &Value, orderings: &[OrderBy]) -> Ordering {
    orderings
        .iter()
        .map(|order_by| order_by.compare(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn dir_display_and_serde() {
        assert_eq!(Dir::Asc.to_string(), "asc");
        assert_eq!(Dir::Desc.to_string(), "desc");
        let dir: Dir = serde_json::from_str(r#""desc""#).unwrap();
        assert!(dir.is_desc());
    }

    #[test]
    fn compare_values_within_kind() {
        assert_eq!(
            compare_values(&Value::from("apple"), &Value::from("banana")),
            Ordering::Less
        );
        assert_eq!(compare_values(&Value::from(2), &Value::from(1.5)), Ordering::Greater);
        assert_eq!(
            compare_values(&Value::Bool(false), &Value::Bool(true)),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::from(json!([1, 2])), &Value::from(json!([1, 2, 0]))),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::from(json!({"a": 2})), &Value::from(json!({"a": 1, "b": 0}))),
            Ordering::Greater
        );
    }

    #[test]
    fn compare_values_across_kinds() {
        let ranked = [
            Value::Bool(true),
            Value::from(-5),
            Value::from(f64::NAN),
            Value::from(""),
            Value::from(json!([])),
            Value::from(json!({})),
            Value::Null,
        ];
        for (i, a) in ranked.iter().enumerate() {
            for (j, b) in ranked.iter().enumerate() {
                assert_eq!(compare_values(a, b), i.cmp(&j), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn order_by_resolves_paths() {
        let a = Value::from(json!({"meta": {"rank": 1}}));
        let b = Value::from(json!({"meta": {"rank": 2}}));
        assert_eq!(OrderBy::asc("meta.rank").compare(&a, &b), Ordering::Less);
        assert_eq!(OrderBy::desc("meta.rank").compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn missing_values_sort_last_in_both_directions() {
        let present = Value::from(json!({"rank": 1}));
        let missing = Value::from(json!({}));
        for order in [OrderBy::asc("rank"), OrderBy::desc("rank")] {
            assert_eq!(order.compare(&missing, &present), Ordering::Greater);
            assert_eq!(order.compare(&present, &missing), Ordering::Less);
        }
    }

    #[test]
    fn mixed_kinds_sort_without_panicking() {
        let mut items: Vec<Value> = (0..40)
            .map(|i| match i % 5 {
                0 => json!({"price": i}),
                1 => json!({"price": i.to_string()}),
                2 => json!({"price": true}),
                3 => json!({"price": "abc"}),
                _ => json!({"price": (i as f64) / 3.0}),
            })
            .map(Value::from)
            .collect();
        let order = OrderBy::asc("price");
        items.sort_by(|a, b| order.compare(a, b));
        for pair in items.windows(2) {
            assert_ne!(order.compare(&pair[0], &pair[1]), Ordering::Greater);
        }
        assert_eq!(items[0]["price"], Value::Bool(true));
        assert_eq!(items[39]["price"], Value::from("abc"));
    }

    #[test]
    fn multiple_orderings_break_ties() {
        let items = [
            Value::from(json!({"name": "a", "priority": 1})),
            Value::from(json!({"name": "b", "priority": 1})),
            Value::from(json!({"name": "a", "priority": 2})),
        ];
        let orderings = vec![OrderBy::asc("priority"), OrderBy::asc("name")];

        assert_eq!(
            compare_by_orderings(&items[0], &items[1], &orderings),
            Ordering::Less
        );
        assert_eq!(
            compare_by_orderings(&items[0], &items[2], &orderings),
            Ordering::Less
        );
        assert_eq!(
            compare_by_orderings(&items[0], &items[0], &orderings),
            Ordering::Equal
        );
    }
}
