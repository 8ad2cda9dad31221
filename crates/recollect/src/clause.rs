//! Clause types for query predicates.
//!
//! A [`Clause`] represents a single filter predicate: a path into the item,
//! an operator, and a comparison value.

use serde::{Deserialize, Serialize};

use crate::like::LikeMatcher;
use crate::op::Operator;
use crate::path::resolve;
use crate::predicate::compare_resolved;
use crate::value::Value;

/// A single filter predicate.
///
/// A clause consists of:
/// - A dot-path (resolved against each item)
/// - An operator (how to compare)
/// - A value (what to compare against)
///
/// LIKE clauses compile their pattern once, when the clause is built.
///
/// # Example
///
/// ```
/// use recollect::{Clause, Value};
/// use serde_json::json;
///
/// let clause = Clause::new("brand.name", "LIKE", "ik%");
/// assert!(clause.matches(&Value::from(json!({"brand": {"name": "IKEA"}}))));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ClauseDef", into = "ClauseDef")]
pub struct Clause {
    /// The dot-path of the property to compare.
    pub path: String,
    /// The comparison operator.
    pub operator: Operator,
    /// The value to compare against.
    pub value: Value,
    like: Option<LikeMatcher>,
}

impl Clause {
    /// Creates a new clause.
    pub fn new(
        path: impl Into<String>,
        operator: impl Into<Operator>,
        value: impl Into<Value>,
    ) -> Self {
        let operator = operator.into();
        let value = value.into();
        let path = path.into();
        let like = match (operator, value.as_str()) {
            (Operator::Like, Some(pattern)) => LikeMatcher::new(pattern).ok(),
            (Operator::Like, None) => {
                tracing::debug!(
                    path = %path,
                    kind = value.kind(),
                    "LIKE clause value is not a string, clause never matches"
                );
                None
            }
            _ => None,
        };
        Clause {
            path,
            operator,
            value,
            like,
        }
    }

    /// Evaluates this clause against an item.
    pub fn matches(&self, item: &Value) -> bool {
        self.matches_property(resolve(item, &self.path))
    }

    /// Evaluates this clause against an already-resolved property.
    ///
    /// Returns `false` if the value doesn't match or if the types are incompatible.
    pub fn matches_property(&self, property: Option<&Value>) -> bool {
        match &self.like {
            Some(matcher) => property
                .and_then(Value::as_str)
                .is_some_and(|text| matcher.is_match(text)),
            None => compare_resolved(property, &self.value, self.operator),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClauseDef {
    path: String,
    #[serde(default)]
    op: Operator,
    #[serde(default)]
    value: Value,
}

impl From<ClauseDef> for Clause {
    fn from(def: ClauseDef) -> Self {
        Clause::new(def.path, def.op, def.value)
    }
}

impl From<Clause> for ClauseDef {
    fn from(clause: Clause) -> Self {
        ClauseDef {
            path: clause.path,
            op: clause.operator,
            value: clause.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product() -> Value {
        Value::from(json!({
            "name": "Desk",
            "price": 150,
            "brand": {"name": "IKEA"},
            "tags": ["wood", "office"],
            "discontinued": null
        }))
    }

    #[test]
    fn strict_equality_on_path() {
        assert!(Clause::new("price", "===", 150).matches(&product()));
        assert!(!Clause::new("price", "===", "150").matches(&product()));
        assert!(Clause::new("price", "==", "150").matches(&product()));
    }

    #[test]
    fn nested_paths() {
        assert!(Clause::new("brand.name", "===", "IKEA").matches(&product()));
        assert!(Clause::new("tags.1", "===", "office").matches(&product()));
    }

    #[test]
    fn ordering_clauses() {
        assert!(Clause::new("price", ">", 100).matches(&product()));
        assert!(!Clause::new("price", "<", 100).matches(&product()));
        assert!(Clause::new("price", "<=", 150).matches(&product()));
    }

    #[test]
    fn like_clause_is_precompiled() {
        let clause = Clause::new("brand.name", Operator::Like, "%kea");
        assert!(clause.like.is_some());
        assert!(clause.matches(&product()));
        assert!(!Clause::new("name", "LIKE", "%kea").matches(&product()));
    }

    #[test]
    fn like_with_non_string_value_never_matches() {
        let clause = Clause::new("price", "LIKE", 150);
        assert!(clause.like.is_none());
        assert!(!clause.matches(&product()));
    }

    #[test]
    fn missing_property() {
        assert!(!Clause::new("color", "===", Value::Null).matches(&product()));
        assert!(Clause::new("color", "==", Value::Null).matches(&product()));
        assert!(Clause::new("color", "!==", "red").matches(&product()));
        assert!(Clause::new("discontinued", "===", Value::Null).matches(&product()));
    }

    #[test]
    fn deserializes_with_default_operator() {
        let clause: Clause = serde_json::from_value(json!({"path": "name", "value": "Desk"})).unwrap();
        assert_eq!(clause.operator, Operator::StrictEq);
        assert!(clause.matches(&product()));

        let like: Clause =
            serde_json::from_value(json!({"path": "name", "op": "like", "value": "d%"})).unwrap();
        assert_eq!(like.operator, Operator::Like);
        assert!(like.matches(&product()));
    }

    #[test]
    fn rejects_unknown_fields() {
        let result: Result<Clause, _> =
            serde_json::from_value(json!({"path": "name", "operator": "=="}));
        assert!(result.is_err());
    }
}
