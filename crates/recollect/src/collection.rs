//! An owned collection of records with fluent filtering, plucking and
//! aggregation.
//!
//! Every where-family method resolves its path per item with
//! [`resolve`] and evaluates it with the predicate engine, so the same
//! coercion rules apply everywhere. Filtering methods return a new
//! collection and leave the receiver untouched; the mutation methods at the
//! bottom of the impl work in place.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::clause::Clause;
use crate::error::Result;
use crate::inspect::Inspector;
use crate::op::Operator;
use crate::ordering::OrderBy;
use crate::path::resolve;
use crate::pluck::{key_string, pluck};
use crate::predicate::{compare_resolved, strict_eq};
use crate::query::Query;
use crate::value::{Number, Value};

/// An ordered collection of [`Value`] items.
///
/// # Example
///
/// ```
/// use recollect::{Collection, Value};
/// use serde_json::json;
///
/// let products = Collection::from(vec![
///     Value::from(json!({"name": "Desk", "brand": {"name": "IKEA"}, "price": 150})),
///     Value::from(json!({"name": "Chair", "brand": {"name": "Herman Miller"}, "price": 900})),
/// ]);
///
/// let cheap = products.where_op("price", "<", 200);
/// assert_eq!(cheap.pluck("name", None), Value::from(json!(["Desk"])));
///
/// let ikea = products.where_op("brand.name", "LIKE", "ik%");
/// assert_eq!(ikea.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    items: Vec<Value>,
}

impl Collection {
    /// Creates a collection from its items.
    pub fn new(items: Vec<Value>) -> Self {
        Collection { items }
    }

    /// Parses a JSON array into a collection.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Returns the items.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Consumes the collection, returning its items.
    pub fn into_items(self) -> Vec<Value> {
        self.items
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Iterates over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    fn retain_items(&self, keep: impl FnMut(&&Value) -> bool) -> Collection {
        self.items.iter().filter(keep).cloned().collect()
    }

    fn retain_at(&self, path: &str, mut keep: impl FnMut(Option<&Value>) -> bool) -> Collection {
        self.retain_items(|item| keep(resolve(item, path)))
    }

    // ========================================================================
    // Where family
    // ========================================================================

    /// Keeps the items whose value at `path` satisfies `operator` against
    /// `value`.
    pub fn where_op(
        &self,
        path: &str,
        operator: impl Into<Operator>,
        value: impl Into<Value>,
    ) -> Collection {
        let clause = Clause::new(path, operator, value);
        self.retain_items(|item| clause.matches(item))
    }

    /// Keeps the items whose value at `path` is strictly equal to `value`.
    pub fn where_eq(&self, path: &str, value: impl Into<Value>) -> Collection {
        self.where_op(path, Operator::StrictEq, value)
    }

    /// Keeps the items whose value at `path` is strictly equal to one of
    /// `values`.
    pub fn where_in<V: Into<Value>>(
        &self,
        path: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Collection {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.retain_at(path, |property| is_member(property, &values))
    }

    /// Keeps the items whose value at `path` is missing or not strictly
    /// equal to any of `values`.
    pub fn where_not_in<V: Into<Value>>(
        &self,
        path: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Collection {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.retain_at(path, |property| !is_member(property, &values))
    }

    /// Keeps the items whose value at `path` lies within `low..=high`.
    pub fn where_between(
        &self,
        path: &str,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Collection {
        let (low, high) = (low.into(), high.into());
        self.retain_at(path, |property| is_between(property, &low, &high))
    }

    /// Keeps the items whose value at `path` lies outside `low..=high`,
    /// including those where it is missing or unordered.
    pub fn where_not_between(
        &self,
        path: &str,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Collection {
        let (low, high) = (low.into(), high.into());
        self.retain_at(path, |property| !is_between(property, &low, &high))
    }

    /// Keeps the items whose value at `path` is null or missing.
    pub fn where_null(&self, path: &str) -> Collection {
        self.retain_at(path, |property| property.map_or(true, Value::is_null))
    }

    /// Keeps the items whose value at `path` is present and not null.
    pub fn where_not_null(&self, path: &str) -> Collection {
        self.retain_at(path, |property| property.is_some_and(|p| !p.is_null()))
    }

    /// Returns the first item whose value at `path` satisfies the comparison.
    pub fn first_where(
        &self,
        path: &str,
        operator: impl Into<Operator>,
        value: impl Into<Value>,
    ) -> Option<&Value> {
        let clause = Clause::new(path, operator, value);
        self.items.iter().find(|item| clause.matches(item))
    }

    /// Runs a [`Query`] against the items, applying its ordering and paging.
    pub fn query(&self, query: &Query) -> Collection {
        query.filter(&self.items).into_iter().cloned().collect()
    }

    /// Keeps the items for which `keep` returns `true`.
    pub fn filter(&self, mut keep: impl FnMut(&Value) -> bool) -> Collection {
        self.retain_items(|item| keep(item))
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Extracts the value at `value_path` from every item, optionally keyed
    /// by the value at `key_path`. Paths containing `*` segments are
    /// matched against every nested path of every item.
    pub fn pluck(&self, value_path: &str, key_path: Option<&str>) -> Value {
        pluck(&self.items, value_path, key_path)
    }

    // ========================================================================
    // Sorting and grouping
    // ========================================================================

    /// Sorts ascending by the value at `path`. Missing values sort last.
    pub fn sort_by(&self, path: &str) -> Collection {
        self.sorted(OrderBy::asc(path))
    }

    /// Sorts descending by the value at `path`. Missing values sort last.
    pub fn sort_by_desc(&self, path: &str) -> Collection {
        self.sorted(OrderBy::desc(path))
    }

    fn sorted(&self, order: OrderBy) -> Collection {
        let mut items = self.items.clone();
        items.sort_by(|a, b| order.compare(a, b));
        Collection::new(items)
    }

    /// Groups the items by the string form of their value at `path`.
    ///
    /// Groups appear in order of first occurrence. Items without the path
    /// land in the `""` group.
    pub fn group_by(&self, path: &str) -> IndexMap<String, Collection> {
        let mut groups: IndexMap<String, Collection> = IndexMap::new();
        for item in &self.items {
            groups
                .entry(key_string(resolve(item, path)))
                .or_default()
                .items
                .push(item.clone());
        }
        groups
    }

    /// Keys the items by the string form of their value at `path`. Later
    /// items replace earlier ones with the same key.
    pub fn key_by(&self, path: &str) -> IndexMap<String, Value> {
        self.items
            .iter()
            .map(|item| (key_string(resolve(item, path)), item.clone()))
            .collect()
    }

    // ========================================================================
    // Aggregates
    // ========================================================================

    fn numbers_at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = Number> + 'a {
        self.items
            .iter()
            .filter_map(move |item| resolve(item, path).and_then(Value::as_number))
    }

    /// Sums the numbers at `path`, ignoring non-numeric values.
    ///
    /// Stays integral while every addend is a signed integer and the total
    /// fits in an `i64`.
    pub fn sum(&self, path: &str) -> Number {
        let mut total = Number::I64(0);
        for n in self.numbers_at(path) {
            total = match (total, n) {
                (Number::I64(a), Number::I64(b)) => a
                    .checked_add(b)
                    .map_or(Number::F64(a as f64 + b as f64), Number::I64),
                (a, b) => Number::F64(a.to_f64() + b.to_f64()),
            };
        }
        total
    }

    /// Averages the numbers at `path`. Returns `None` if there are none.
    pub fn avg(&self, path: &str) -> Option<f64> {
        let (total, count) = self
            .numbers_at(path)
            .fold((0.0, 0usize), |(total, count), n| (total + n.to_f64(), count + 1));
        (count > 0).then(|| total / count as f64)
    }

    /// Returns the smallest number at `path`, skipping NaN.
    pub fn min(&self, path: &str) -> Option<Number> {
        self.extreme(path, Ordering::Less)
    }

    /// Returns the largest number at `path`, skipping NaN.
    pub fn max(&self, path: &str) -> Option<Number> {
        self.extreme(path, Ordering::Greater)
    }

    fn extreme(&self, path: &str, wanted: Ordering) -> Option<Number> {
        self.numbers_at(path)
            .filter(|n| !n.is_nan())
            .fold(None, |best, n| match best {
                Some(best) if n.compare(best) != Some(wanted) => Some(best),
                _ => Some(n),
            })
    }

    // ========================================================================
    // In-place mutation
    // ========================================================================

    /// Removes the item at `index`. Out-of-range indices are ignored.
    pub fn forget(&mut self, index: usize) -> &mut Self {
        if index < self.items.len() {
            self.items.remove(index);
        }
        self
    }

    /// Replaces the item at `index`, or appends when `index` is past the end.
    pub fn put(&mut self, index: usize, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        match self.items.get_mut(index) {
            Some(slot) => *slot = value,
            None => self.items.push(value),
        }
        self
    }

    /// Removes and returns the item at `index`.
    pub fn pull(&mut self, index: usize) -> Option<Value> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Replaces every item with the result of `f`.
    pub fn transform(&mut self, mut f: impl FnMut(Value) -> Value) -> &mut Self {
        self.items = std::mem::take(&mut self.items).into_iter().map(&mut f).collect();
        self
    }

    // ========================================================================
    // Debugging
    // ========================================================================

    /// Hands the items, rendered as pretty JSON, to `inspector`.
    pub fn dump(&self, inspector: &mut dyn Inspector) -> Result<&Self> {
        let rendered = serde_json::to_string_pretty(&self.items)?;
        inspector.dump(&rendered);
        Ok(self)
    }

    /// Dumps the items, then asks `inspector` to exit with status 1.
    pub fn dd(&self, inspector: &mut dyn Inspector) -> Result<()> {
        self.dump(inspector)?;
        inspector.exit(1);
        Ok(())
    }
}

fn is_member(property: Option<&Value>, values: &[Value]) -> bool {
    property.is_some_and(|property| values.iter().any(|value| strict_eq(property, value)))
}

fn is_between(property: Option<&Value>, low: &Value, high: &Value) -> bool {
    compare_resolved(property, low, Operator::Gte) && compare_resolved(property, high, Operator::Lte)
}

impl From<Vec<Value>> for Collection {
    fn from(items: Vec<Value>) -> Self {
        Collection::new(items)
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Collection::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Collection {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
