//! Query builder and executor.
//!
//! The [`Query`] struct provides a fluent builder API for constructing queries
//! over collections of [`Value`]s and methods for executing them. Queries can
//! also be declared as data and loaded from JSON or YAML.

use serde::{Deserialize, Serialize};

use crate::clause::Clause;
use crate::error::Result;
use crate::op::Operator;
use crate::ordering::{compare_by_orderings, Dir, OrderBy};
use crate::value::Value;

/// A query for filtering and ordering collections.
///
/// Queries consist of three clause groups:
/// - **AND**: All clauses must match
/// - **OR**: At least one clause must match (or none if empty)
/// - **NOT**: No clause may match
///
/// The overall match logic is:
/// ```text
/// match = (all AND clauses match)
///       ∧ (at least one OR clause matches, OR no OR clauses exist)
///       ∧ (no NOT clause matches)
/// ```
///
/// # Example
///
/// ```
/// use recollect::{Query, Value};
/// use serde_json::json;
///
/// let products = vec![
///     Value::from(json!({"name": "Desk", "brand": "IKEA", "price": 150})),
///     Value::from(json!({"name": "Chair", "brand": "Herman Miller", "price": 900})),
///     Value::from(json!({"name": "Lamp", "brand": "IKEA", "price": 30, "archived": true})),
/// ];
///
/// let query = Query::new()
///     .and_like("brand", "ik%")
///     .not_eq("archived", true)
///     .order_desc("price")
///     .build();
///
/// let results = query.filter(&products);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0]["name"], Value::from("Desk"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Query {
    #[serde(rename = "and")]
    and_clauses: Vec<Clause>,
    #[serde(rename = "or")]
    or_clauses: Vec<Clause>,
    #[serde(rename = "not")]
    not_clauses: Vec<Clause>,
    #[serde(rename = "order")]
    orderings: Vec<OrderBy>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl Query {
    /// Creates a new empty query.
    ///
    /// An empty query matches all items.
    pub fn new() -> Self {
        Query::default()
    }

    /// Loads a query declared as JSON.
    ///
    /// ```
    /// use recollect::Query;
    ///
    /// let query = Query::from_json_str(r#"{"and": [{"path": "price", "op": "<", "value": 100}]}"#).unwrap();
    /// assert_eq!(query.and_clauses().len(), 1);
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads a query declared as YAML.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    // ========================================================================
    // Generic clause builders
    // ========================================================================

    /// Adds an AND clause.
    ///
    /// All AND clauses must match for an item to be included.
    pub fn and(mut self, path: &str, op: impl Into<Operator>, value: impl Into<Value>) -> Self {
        self.and_clauses.push(Clause::new(path, op, value));
        self
    }

    /// Adds an OR clause.
    ///
    /// At least one OR clause must match (unless there are no OR clauses).
    pub fn or(mut self, path: &str, op: impl Into<Operator>, value: impl Into<Value>) -> Self {
        self.or_clauses.push(Clause::new(path, op, value));
        self
    }

    /// Adds a NOT clause.
    ///
    /// No NOT clause may match for an item to be included.
    pub fn not(mut self, path: &str, op: impl Into<Operator>, value: impl Into<Value>) -> Self {
        self.not_clauses.push(Clause::new(path, op, value));
        self
    }

    // ========================================================================
    // AND shorthand methods
    // ========================================================================

    /// Adds an AND strict equality clause.
    pub fn and_eq(self, path: &str, value: impl Into<Value>) -> Self {
        self.and(path, Operator::StrictEq, value)
    }

    /// Adds an AND strict not-equal clause.
    pub fn and_ne(self, path: &str, value: impl Into<Value>) -> Self {
        self.and(path, Operator::StrictNe, value)
    }

    /// Adds an AND greater-than clause.
    pub fn and_gt(self, path: &str, value: impl Into<Value>) -> Self {
        self.and(path, Operator::Gt, value)
    }

    /// Adds an AND greater-than-or-equal clause.
    pub fn and_gte(self, path: &str, value: impl Into<Value>) -> Self {
        self.and(path, Operator::Gte, value)
    }

    /// Adds an AND less-than clause.
    pub fn and_lt(self, path: &str, value: impl Into<Value>) -> Self {
        self.and(path, Operator::Lt, value)
    }

    /// Adds an AND less-than-or-equal clause.
    pub fn and_lte(self, path: &str, value: impl Into<Value>) -> Self {
        self.and(path, Operator::Lte, value)
    }

    /// Adds an AND LIKE clause.
    pub fn and_like(self, path: &str, pattern: &str) -> Self {
        self.and(path, Operator::Like, pattern)
    }

    // ========================================================================
    // OR shorthand methods
    // ========================================================================

    /// Adds an OR strict equality clause.
    pub fn or_eq(self, path: &str, value: impl Into<Value>) -> Self {
        self.or(path, Operator::StrictEq, value)
    }

    /// Adds an OR greater-than clause.
    pub fn or_gt(self, path: &str, value: impl Into<Value>) -> Self {
        self.or(path, Operator::Gt, value)
    }

    /// Adds an OR less-than clause.
    pub fn or_lt(self, path: &str, value: impl Into<Value>) -> Self {
        self.or(path, Operator::Lt, value)
    }

    /// Adds an OR LIKE clause.
    pub fn or_like(self, path: &str, pattern: &str) -> Self {
        self.or(path, Operator::Like, pattern)
    }

    // ========================================================================
    // NOT shorthand methods
    // ========================================================================

    /// Adds a NOT strict equality clause.
    pub fn not_eq(self, path: &str, value: impl Into<Value>) -> Self {
        self.not(path, Operator::StrictEq, value)
    }

    /// Adds a NOT LIKE clause.
    pub fn not_like(self, path: &str, pattern: &str) -> Self {
        self.not(path, Operator::Like, pattern)
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Adds an ordering clause.
    pub fn order_by(mut self, path: &str, dir: Dir) -> Self {
        self.orderings.push(OrderBy::new(path, dir));
        self
    }

    /// Adds an ascending ordering clause.
    pub fn order_asc(self, path: &str) -> Self {
        self.order_by(path, Dir::Asc)
    }

    /// Adds a descending ordering clause.
    pub fn order_desc(self, path: &str) -> Self {
        self.order_by(path, Dir::Desc)
    }

    // ========================================================================
    // Limits
    // ========================================================================

    /// Sets the maximum number of results to return.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets the number of results to skip.
    pub fn offset(mut self, n: usize) -> Self {
        self.offset = Some(n);
        self
    }

    /// Finalizes the query.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the AND clauses.
    pub fn and_clauses(&self) -> &[Clause] {
        &self.and_clauses
    }

    /// Returns the OR clauses.
    pub fn or_clauses(&self) -> &[Clause] {
        &self.or_clauses
    }

    /// Returns the NOT clauses.
    pub fn not_clauses(&self) -> &[Clause] {
        &self.not_clauses
    }

    /// Returns the ordering clauses.
    pub fn orderings(&self) -> &[OrderBy] {
        &self.orderings
    }

    /// Returns the limit, if set.
    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the offset, if set.
    pub fn get_offset(&self) -> Option<usize> {
        self.offset
    }

    /// Returns `true` if this query has no clauses (matches everything).
    pub fn is_empty(&self) -> bool {
        self.and_clauses.is_empty() && self.or_clauses.is_empty() && self.not_clauses.is_empty()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single item matches this query.
    pub fn matches(&self, item: &Value) -> bool {
        self.and_clauses.iter().all(|clause| clause.matches(item))
            && (self.or_clauses.is_empty() || self.or_clauses.iter().any(|clause| clause.matches(item)))
            && !self.not_clauses.iter().any(|clause| clause.matches(item))
    }

    /// Filters a slice, returning references to matching items.
    ///
    /// Results are sorted according to the query's ordering clauses,
    /// then offset and limit are applied.
    pub fn filter<'a>(&self, items: &'a [Value]) -> Vec<&'a Value> {
        let mut results: Vec<&'a Value> = items.iter().filter(|item| self.matches(item)).collect();

        if !self.orderings.is_empty() {
            // Stable, so ties keep source order
            results.sort_by(|a, b| compare_by_orderings(a, b, &self.orderings));
        }

        let matched = results.len();
        let offset = self.offset.unwrap_or(0);
        let limit = self.limit.unwrap_or(usize::MAX);
        let results: Vec<&'a Value> = results.into_iter().skip(offset).take(limit).collect();

        tracing::debug!(
            items = items.len(),
            matched,
            returned = results.len(),
            "executed query"
        );
        results
    }

    /// Filters and clones matching items.
    pub fn filter_cloned(&self, items: &[Value]) -> Vec<Value> {
        self.filter(items).into_iter().cloned().collect()
    }

    /// Filters a vector in place, keeping only matching items.
    ///
    /// Note: This does not apply ordering, offset, or limit.
    /// Use `filter_cloned` if you need those features.
    pub fn filter_mut(&self, items: &mut Vec<Value>) {
        items.retain(|item| self.matches(item));
    }

    /// Counts the number of matching items.
    pub fn count(&self, items: &[Value]) -> usize {
        items.iter().filter(|item| self.matches(item)).count()
    }

    /// Returns `true` if any item matches.
    pub fn any(&self, items: &[Value]) -> bool {
        items.iter().any(|item| self.matches(item))
    }

    /// Returns `true` if all items match.
    pub fn all(&self, items: &[Value]) -> bool {
        items.iter().all(|item| self.matches(item))
    }

    /// Finds the first matching item.
    pub fn find<'a>(&self, items: &'a [Value]) -> Option<&'a Value> {
        items.iter().find(|item| self.matches(item))
    }

    /// Finds the first matching item and returns its index.
    pub fn position(&self, items: &[Value]) -> Option<usize> {
        items.iter().position(|item| self.matches(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tasks() -> Vec<Value> {
        [
            json!({"name": "Write docs", "priority": 3, "status": "open", "archived": false}),
            json!({"name": "Fix bug", "priority": 5, "status": "open", "archived": false}),
            json!({"name": "Old task", "priority": 1, "status": "done", "archived": true}),
            json!({"name": "Urgent fix", "priority": 5, "status": "blocked", "archived": false}),
            json!({"name": "Review PR", "priority": 2, "status": "open"}),
        ]
        .into_iter()
        .map(Value::from)
        .collect()
    }

    fn names(results: &[&Value]) -> Vec<String> {
        results
            .iter()
            .map(|item| item["name"].to_string())
            .collect()
    }

    #[test]
    fn empty_query_matches_all() {
        let items = tasks();
        let query = Query::new().build();
        assert!(query.is_empty());
        assert_eq!(query.filter(&items).len(), items.len());
    }

    #[test]
    fn and_multiple_clauses() {
        let items = tasks();
        let query = Query::new()
            .and_eq("status", "open")
            .and_gte("priority", 3)
            .build();
        assert_eq!(names(&query.filter(&items)), ["Write docs", "Fix bug"]);
    }

    #[test]
    fn or_clauses() {
        let items = tasks();
        let query = Query::new()
            .or_eq("status", "blocked")
            .or_lt("priority", 2)
            .build();
        assert_eq!(names(&query.filter(&items)), ["Old task", "Urgent fix"]);
    }

    #[test]
    fn not_clauses() {
        let items = tasks();
        let query = Query::new().not_eq("archived", true).build();
        assert_eq!(query.count(&items), 4);
    }

    #[test]
    fn combined_and_or_not() {
        let items = tasks();
        let query = Query::new()
            .and_gte("priority", 2)
            .or_like("name", "%fix%")
            .or_like("name", "review%")
            .not_eq("status", "blocked")
            .build();
        assert_eq!(names(&query.filter(&items)), ["Fix bug", "Review PR"]);
    }

    #[test]
    fn ordering_with_ties_keeps_source_order() {
        let items = tasks();
        let query = Query::new().order_desc("priority").build();
        assert_eq!(
            names(&query.filter(&items)),
            ["Fix bug", "Urgent fix", "Write docs", "Review PR", "Old task"]
        );
    }

    #[test]
    fn ordering_multiple_paths() {
        let items = tasks();
        let query = Query::new()
            .order_desc("priority")
            .order_asc("name")
            .build();
        let results = query.filter(&items);
        assert_eq!(names(&results[..2]), ["Fix bug", "Urgent fix"]);
    }

    #[test]
    fn offset_and_limit() {
        let items = tasks();
        let query = Query::new().order_asc("priority").offset(1).limit(2).build();
        assert_eq!(names(&query.filter(&items)), ["Review PR", "Write docs"]);

        let beyond = Query::new().offset(10).build();
        assert!(beyond.filter(&items).is_empty());
    }

    #[test]
    fn any_all_find_position() {
        let items = tasks();
        let query = Query::new().and_eq("status", "done").build();
        assert!(query.any(&items));
        assert!(!query.all(&items));
        assert_eq!(query.find(&items).map(|t| t["name"].to_string()), Some("Old task".to_string()));
        assert_eq!(query.position(&items), Some(2));

        let none = Query::new().and_eq("status", "missing").build();
        assert_eq!(none.find(&items), None);
    }

    #[test]
    fn filter_mut_and_cloned() {
        let mut items = tasks();
        let query = Query::new().and_eq("status", "open").limit(1).build();
        assert_eq!(query.filter_cloned(&items).len(), 1);

        query.filter_mut(&mut items);
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn loads_from_json() {
        let query = Query::from_json_str(
            r#"{
                "and": [{"path": "status", "value": "open"}],
                "not": [{"path": "name", "op": "LIKE", "value": "%docs"}],
                "order": [{"path": "priority", "dir": "desc"}],
                "limit": 5
            }"#,
        )
        .unwrap();
        assert_eq!(query.get_limit(), Some(5));
        assert_eq!(names(&query.filter(&tasks())), ["Fix bug", "Review PR"]);
    }

    #[test]
    fn loads_from_yaml() {
        let query = Query::from_yaml_str(
            "and:\n  - { path: priority, op: '>=', value: 5 }\norder:\n  - { path: name }\n",
        )
        .unwrap();
        assert_eq!(query.orderings()[0].dir, Dir::Asc);
        assert_eq!(names(&query.filter(&tasks())), ["Fix bug", "Urgent fix"]);
    }

    #[test]
    fn rejects_malformed_definitions() {
        assert!(Query::from_json_str(r#"{"where": []}"#).is_err());
        assert!(Query::from_yaml_str("and: 3").is_err());
    }

    #[test]
    fn introspection() {
        let query = Query::new()
            .and_eq("a", 1)
            .or_eq("b", 2)
            .not_eq("c", 3)
            .order_asc("a")
            .limit(10)
            .offset(5)
            .build();

        assert_eq!(query.and_clauses().len(), 1);
        assert_eq!(query.or_clauses().len(), 1);
        assert_eq!(query.not_clauses().len(), 1);
        assert_eq!(query.orderings().len(), 1);
        assert_eq!(query.get_limit(), Some(10));
        assert_eq!(query.get_offset(), Some(5));
        assert!(!query.is_empty());
    }
}
