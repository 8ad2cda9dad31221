//! Flattened path index over a sequence.
//!
//! [`FlatIndex::build`] visits every value reachable from every item and
//! records it under a synthetic dot-path whose first segment is the item's
//! position. Containers are recorded as well as their children, so wildcard
//! patterns can address intermediate records and sequences, not only leaves.
//!
//! ```text
//! [{"name": "John", "roles": [{"name": "Editor"}]}]
//!
//! 0              -> {"name": "John", "roles": [...]}
//! 0.name         -> "John"
//! 0.roles        -> [{"name": "Editor"}]
//! 0.roles.0      -> {"name": "Editor"}
//! 0.roles.0.name -> "Editor"
//! ```

use std::ops::Range;

use indexmap::IndexMap;

use crate::value::Value;

/// Map from synthesized paths to borrowed values, built per query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatIndex<'a> {
    entries: IndexMap<String, &'a Value>,
    items: Vec<Range<usize>>,
}

impl<'a> FlatIndex<'a> {
    /// Flattens every item of `sequence`.
    pub fn build(sequence: &'a [Value]) -> Self {
        let mut index = FlatIndex::default();
        for (position, item) in sequence.iter().enumerate() {
            let start = index.entries.len();
            index.visit(item, position.to_string());
            index.items.push(start..index.entries.len());
        }
        tracing::debug!(
            items = sequence.len(),
            entries = index.entries.len(),
            "built flat path index"
        );
        index
    }

    fn visit(&mut self, value: &'a Value, path: String) {
        // Keys that already exist (a record key containing dots can collide
        // with a nested path) keep their position and take the later value.
        self.entries.insert(path.clone(), value);
        match value {
            Value::Record(record) => {
                for (key, child) in record {
                    self.visit(child, format!("{path}.{key}"));
                }
            }
            Value::Sequence(items) => {
                for (i, child) in items.iter().enumerate() {
                    self.visit(child, format!("{path}.{i}"));
                }
            }
            _ => {}
        }
    }

    /// Looks up one synthesized path.
    pub fn get(&self, path: &str) -> Option<&'a Value> {
        self.entries.get(path).copied()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of source items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Iterates all entries in build order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'a Value)> + '_ {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Iterates the entries belonging to one source item.
    pub fn item_entries(&self, item: usize) -> impl Iterator<Item = (&str, &'a Value)> + '_ {
        self.items
            .get(item)
            .cloned()
            .unwrap_or(0..0)
            .filter_map(|i| self.entries.get_index(i))
            .map(|(key, value)| (key.as_str(), *value))
    }
}
