//! The predicate engine behind every where-family filter.
//!
//! [`compare`] evaluates `property <operator> value` for two values.
//! [`compare_resolved`] does the same for a property that may be absent,
//! which is what path resolution produces for missing keys. Evaluation is
//! pure and never fails; incompatible operands simply do not match.

use std::cmp::Ordering;

use crate::like::LikeMatcher;
use crate::op::Operator;
use crate::value::Value;

/// Evaluates `property <operator> value`.
///
/// # Example
///
/// ```
/// use recollect::{compare, Operator, Value};
///
/// assert!(compare(&Value::from(5), &Value::from("5"), Operator::LooseEq));
/// assert!(!compare(&Value::from(5), &Value::from("5"), Operator::StrictEq));
/// assert!(compare(&Value::from("IKEA"), &Value::from("IK%"), Operator::Like));
/// ```
pub fn compare(property: &Value, value: &Value, operator: Operator) -> bool {
    compare_resolved(Some(property), value, operator)
}

/// Evaluates `property <operator> value` where the property may be absent.
///
/// An absent property is loosely equal only to `Null`, strictly equal to
/// nothing, unordered, and never matches `LIKE`.
pub fn compare_resolved(property: Option<&Value>, value: &Value, operator: Operator) -> bool {
    match operator {
        Operator::StrictEq => property.is_some_and(|p| strict_eq(p, value)),
        Operator::StrictNe => !property.is_some_and(|p| strict_eq(p, value)),
        Operator::LooseEq => loose_eq_resolved(property, value),
        Operator::LooseNe => !loose_eq_resolved(property, value),
        Operator::Lt | Operator::Lte | Operator::Gt | Operator::Gte => property
            .and_then(|p| order(p, value))
            .is_some_and(|ordering| operator.eval_ordering(ordering)),
        Operator::Like => match (property.and_then(Value::as_str), value.as_str()) {
            (Some(text), Some(pattern)) => like(text, pattern),
            _ => false,
        },
    }
}

/// Matches a string against a LIKE pattern. Patterns that cannot be
/// compiled match nothing.
pub fn like(text: &str, pattern: &str) -> bool {
    match LikeMatcher::new(pattern) {
        Ok(matcher) => matcher.is_match(text),
        Err(err) => {
            tracing::warn!(pattern, error = %err, "LIKE pattern rejected");
            false
        }
    }
}

/// Strict equality: same kind of value and equal contents. Numbers compare
/// numerically across representations; containers compare structurally.
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a.numeric_eq(*b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Sequence(a), Value::Sequence(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| strict_eq(a, b))
        }
        (Value::Record(a), Value::Record(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, a)| b.get(key).is_some_and(|b| strict_eq(a, b)))
        }
        _ => false,
    }
}

/// Loose equality with coercion between primitives.
///
/// Containers of the same kind compare structurally. Null equals only null.
/// Booleans compare with booleans; two string-like operands (strings and
/// the string forms of containers) compare as text; everything else
/// compares numerically after coercion.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Sequence(_), Value::Sequence(_)) | (Value::Record(_), Value::Record(_)) => {
            strict_eq(a, b)
        }
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        _ if is_textual(a) && is_textual(b) => a.coerce_string() == b.coerce_string(),
        _ => a.coerce_number().numeric_eq(b.coerce_number()),
    }
}

fn loose_eq_resolved(property: Option<&Value>, value: &Value) -> bool {
    match property {
        Some(property) => loose_eq(property, value),
        None => value.is_null(),
    }
}

/// Orders two values the way the relational operators see them: string-like
/// operands lexicographically, everything else numerically after coercion.
fn order(a: &Value, b: &Value) -> Option<Ordering> {
    if is_textual(a) && is_textual(b) {
        Some(a.coerce_string().cmp(&b.coerce_string()))
    } else {
        a.coerce_number().compare(b.coerce_number())
    }
}

fn is_textual(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Sequence(_) | Value::Record(_))
}
