//! Field discovery over a dataset's records

use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Insertion-ordered set of names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl NameSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name, keeping first-seen order
    pub fn insert(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        self.order.push(name.to_string());
        true
    }

    /// Whether the set holds `name`
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// Names in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of names
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// All fields observed across a dataset, plus the item keys of nested fields
#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    /// Top-level field names
    fields: NameSet,
    /// Shape decision per list-valued field: `true` when its items are mappings
    list_shapes: HashMap<String, bool>,
    /// Union of item keys per nested field
    nested_keys: HashMap<String, NameSet>,
}

impl FieldCatalog {
    /// Build the catalog in a single pass over `records`
    ///
    /// A field is nested when the first non-empty list seen for it starts with
    /// a mapping. That decision is never revisited; for nested fields the keys
    /// of every mapping item in every record are unioned.
    pub fn discover(records: &[Value]) -> Self {
        let mut catalog = Self::default();

        for record in records {
            let Value::Object(map) = record else {
                continue;
            };

            for (key, value) in map {
                catalog.fields.insert(key);

                let Value::Array(items) = value else {
                    continue;
                };
                let Some(first) = items.first() else {
                    continue;
                };

                let nested = *catalog
                    .list_shapes
                    .entry(key.clone())
                    .or_insert_with(|| first.is_object());
                if !nested {
                    continue;
                }

                let keys = catalog.nested_keys.entry(key.clone()).or_default();
                for item in items {
                    if let Value::Object(item_map) = item {
                        for item_key in item_map.keys() {
                            keys.insert(item_key);
                        }
                    }
                }
            }
        }

        catalog
    }

    /// Top-level fields in discovery order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter()
    }

    /// Whether `field` was observed at top level
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    /// Whether `field` is a list-of-mappings field
    pub fn is_nested(&self, field: &str) -> bool {
        self.nested_keys.contains_key(field)
    }

    /// Nested fields in discovery order
    pub fn nested_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter(|f| self.is_nested(f))
    }

    /// Item keys of a nested field in discovery order
    pub fn nested_keys(&self, field: &str) -> Option<&NameSet> {
        self.nested_keys.get(field)
    }

    /// Number of top-level fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields were observed
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
