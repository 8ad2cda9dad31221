//! Recollect - Path lookup and predicate filtering for collections of dynamic records.
//!
//! Recollect works on ordered collections of [`Value`]s: records, sequences
//! and scalars of any shape. It supports:
//!
//! - Dot-path lookup into nested records and sequences (`brand.name`, `roles.0`)
//! - Wildcard plucking over flattened path indexes (`roles.*`, `*.name`)
//! - JavaScript-style loose and strict comparisons, ordering and SQL `LIKE`
//! - Clause groups: AND, OR, NOT with fixed combination semantics
//! - Multi-path ordering, limit and offset, and queries declared as JSON or YAML
//!
//! # Quick Start
//!
//! ```rust
//! use recollect::{Collection, Query, Value};
//! use serde_json::json;
//!
//! let users = Collection::from_json_str(r#"[
//!     {"name": "John", "roles": [{"name": "Editor"}, {"name": "Admin"}], "age": 34},
//!     {"name": "Jane", "roles": [{"name": "Viewer"}], "age": "29"}
//! ]"#).unwrap();
//!
//! // Paths with `*` are matched against every nested path of every item
//! assert_eq!(
//!     users.pluck("roles.*.name", None),
//!     Value::from(json!([["Editor", "Admin"], ["Viewer"]]))
//! );
//!
//! // Loose comparisons coerce, so the string "29" is ordered as a number
//! assert_eq!(users.where_op("age", "<", 30).len(), 1);
//!
//! let query = Query::new().and_like("name", "J_%").order_asc("name").build();
//! assert_eq!(users.query(&query).pluck("name", None), Value::from(json!(["Jane", "John"])));
//! ```
//!
//! # Query Semantics
//!
//! Queries combine three clause groups with fixed logic:
//!
//! ```text
//! match = (all AND clauses match)
//!       ∧ (at least one OR clause matches, OR no OR clauses exist)
//!       ∧ (no NOT clause matches)
//! ```
//!
//! # Operators
//!
//! | Operator | Meaning |
//! |----------|---------|
//! | `==` | Loose equality with coercion |
//! | `===` | Strict equality (also the fallback for unknown operators) |
//! | `!=`, `<>` | Loose inequality |
//! | `!==` | Strict inequality |
//! | `<`, `<=`, `>`, `>=` | Ordering (strings lexicographic, otherwise numeric) |
//! | `LIKE` | Case-insensitive SQL-style pattern, see [`LikePattern`] |
//!
//! A missing property is distinct from an explicit `null`: it is loosely equal
//! to `null` only, strictly equal to nothing, and never ordered.

mod clause;
mod collection;
mod error;
mod index;
mod inspect;
mod like;
mod op;
mod ordering;
mod path;
mod pluck;
mod predicate;
mod query;
mod value;

// Re-export public API
pub use clause::Clause;
pub use collection::Collection;
pub use error::{RecollectError, Result};
pub use index::FlatIndex;
pub use inspect::{Inspector, RecordingInspector, TracingInspector};
pub use like::{LikeMatcher, LikePattern};
pub use op::Operator;
pub use ordering::{compare_by_orderings, compare_values, Dir, OrderBy};
pub use path::{is_pattern, resolve, KeyPath, Segment};
pub use pluck::{pluck, pluck_with_pattern, WildcardMatcher};
pub use predicate::{compare, compare_resolved, like, loose_eq, strict_eq};
pub use query::Query;
pub use value::{Number, Record, Sequence, Value};
