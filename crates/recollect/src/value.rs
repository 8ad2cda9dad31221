//! Dynamic value types for records and sequences.
//!
//! The [`Value`] enum is the shape-free building block of every collection:
//! scalars, nested [`Record`]s and ordered [`Sequence`]s. Records keep their
//! insertion order so that paths, plucks and dumps are reproducible.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::path::Segment;

/// Insertion-ordered mapping from keys to values.
pub type Record = IndexMap<String, Value>;

/// Ordered, index-addressable list of values.
pub type Sequence = Vec<Value>;

/// A dynamically-shaped value.
///
/// # Example
///
/// ```
/// use recollect::Value;
/// use serde_json::json;
///
/// let value = Value::from(json!({"name": "John", "roles": ["admin"]}));
/// assert!(value.is_record());
/// assert_eq!(value.child("name"), Some(&Value::from("John")));
/// assert_eq!(value.child("roles").and_then(|r| r.child("0")), Some(&Value::from("admin")));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicit null.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value.
    String(String),
    /// Ordered list of values.
    Sequence(Sequence),
    /// Nested record.
    Record(Record),
}

impl Value {
    /// Returns `true` if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is a `Bool` value.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if this is a `Number` value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if this is a `String` value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if this is a `Record`.
    pub fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// Returns `true` if this is a `Sequence`.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    /// Returns `true` for records and sequences.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Record(_) | Value::Sequence(_))
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the record, if present.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Extracts the sequence, if present.
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a short name for the kind of value.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Record(_) => "record",
        }
    }

    /// Looks up one path segment: a key on records, a canonical decimal
    /// index on sequences (`"1"`, never `"01"` or `"+1"`). Scalars have no
    /// children.
    pub fn child(&self, segment: &str) -> Option<&Value> {
        match self {
            Value::Record(record) => record.get(segment),
            Value::Sequence(items) => match Segment::parse(segment) {
                Segment::Index(i) => items.get(i),
                _ => None,
            },
            _ => None,
        }
    }

    /// Coerces this value to a number the way loose comparisons do.
    ///
    /// Null is `0`, booleans are `0`/`1`, strings are parsed (trimmed, empty
    /// is `0`, unparsable is NaN) and containers go through their string form.
    pub fn coerce_number(&self) -> Number {
        match self {
            Value::Null => Number::I64(0),
            Value::Bool(b) => Number::I64(i64::from(*b)),
            Value::Number(n) => *n,
            Value::String(s) => parse_number(s),
            Value::Sequence(_) | Value::Record(_) => parse_number(&self.coerce_string()),
        }
    }

    /// Coerces this value to its string form.
    ///
    /// Strings are returned as-is. Sequences join their elements with `,`
    /// (null elements render empty). Records render as compact JSON.
    pub fn coerce_string(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed("null"),
            Value::Bool(true) => Cow::Borrowed("true"),
            Value::Bool(false) => Cow::Borrowed("false"),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::String(s) => Cow::Borrowed(s),
            Value::Sequence(items) => Cow::Owned(
                items
                    .iter()
                    .map(|item| match item {
                        Value::Null => Cow::Borrowed(""),
                        other => other.coerce_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Value::Record(_) => Cow::Owned(serde_json::to_string(self).unwrap_or_default()),
        }
    }
}

fn parse_number(text: &str) -> Number {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Number::I64(0);
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Number::I64(n);
    }
    let plain = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if plain {
        if let Ok(f) = trimmed.parse::<f64>() {
            return Number::F64(f);
        }
    }
    match trimmed {
        "Infinity" | "+Infinity" => Number::F64(f64::INFINITY),
        "-Infinity" => Number::F64(f64::NEG_INFINITY),
        _ => Number::F64(f64::NAN),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coerce_string())
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers beyond `i64::MAX`
/// - `F64` for floating point
///
/// Comparisons between different numeric types are numeric, so `I64(5)`
/// and `F64(5.0)` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns `true` if this is a NaN float.
    pub fn is_nan(self) -> bool {
        matches!(self, Number::F64(n) if n.is_nan())
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        (!self.is_nan() && !other.is_nan()).then(|| self.total_cmp(other))
    }

    /// Total order over numbers, suitable for sorting.
    ///
    /// Integers and floats compare exactly by value regardless of variant,
    /// `-0.0` equals `0.0`, and NaN sorts after every other number.
    pub fn total_cmp(self, other: Number) -> Ordering {
        match (self.is_nan(), other.is_nan()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
        match (self, other) {
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            (Number::F64(a), b) => cmp_int_float(b.integer(), a).reverse(),
            (a, Number::F64(b)) => cmp_int_float(a.integer(), b),
            (a, b) => a.integer().cmp(&b.integer()),
        }
    }

    fn integer(self) -> i128 {
        match self {
            Number::I64(n) => i128::from(n),
            Number::U64(n) => i128::from(n),
            Number::F64(n) => n as i128,
        }
    }

    /// Numeric equality across variants. NaN is never equal to anything.
    pub fn numeric_eq(self, other: Number) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

/// Compares an integer with a non-NaN float without rounding the integer.
fn cmp_int_float(int: i128, float: f64) -> Ordering {
    // Beyond every i64 and u64
    if float >= 1.0e20 {
        return Ordering::Less;
    }
    if float <= -1.0e20 {
        return Ordering::Greater;
    }
    let whole = float.trunc();
    match int.cmp(&(whole as i128)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(float - whole)).unwrap_or(Ordering::Equal),
        ordering => ordering,
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(i64::from(n))
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::I64(i64::from(n))
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Number::I64(n),
            Err(_) => Number::U64(n),
        }
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::from(n as u64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

// Conversions into Value

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(Number::F64(n))
    }
}

impl From<Sequence> for Value {
    fn from(items: Sequence) -> Self {
        Value::Sequence(items)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(if let Some(i) = n.as_i64() {
                Number::I64(i)
            } else if let Some(u) = n.as_u64() {
                Number::U64(u)
            } else {
                Number::F64(n.as_f64().unwrap_or(f64::NAN))
            }),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Record(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

static NULL: Value = Value::Null;

/// Looks up a record key, yielding `Null` when the key is missing or the
/// value is not a record.
impl std::ops::Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.as_record().and_then(|r| r.get(key)).unwrap_or(&NULL)
    }
}

/// Looks up a sequence position, yielding `Null` when out of range or the
/// value is not a sequence.
impl std::ops::Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.as_sequence().and_then(|s| s.get(index)).unwrap_or(&NULL)
    }
}
