//! Relational schema inference from JSON records

use super::catalog::FieldCatalog;
use super::types::{ColumnDefinition, InferredSchema, SqlType, TableDefinition};
use crate::error::{Error, Result};
use crate::types::{is_date_wrapper, present};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Default identifier field of a record
pub const DEFAULT_ID_FIELD: &str = "_id";

/// Default length of string columns
pub const DEFAULT_VARCHAR_LENGTH: u32 = 500;

/// Default name of the surrogate key in nested tables
pub const DEFAULT_SURROGATE_KEY: &str = "item_id";

/// Type of the primary key column mapped from the identifier field
pub const ID_COLUMN_TYPE: SqlType = SqlType::Varchar(50);

/// Regex for unquoted SQL identifiers
static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// Check that `name` can be used unquoted as a table name
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER_RE.is_match(name)
}

/// Schema inferencer with configuration options
#[derive(Debug, Clone)]
pub struct SchemaInferencer {
    /// Field holding the record identifier
    id_field: String,
    /// Length of string columns
    varchar_length: u32,
    /// Surrogate key column name in nested tables
    surrogate_key: String,
}

impl Default for SchemaInferencer {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaInferencer {
    /// Create a new inferencer with default settings
    pub fn new() -> Self {
        Self {
            id_field: DEFAULT_ID_FIELD.to_string(),
            varchar_length: DEFAULT_VARCHAR_LENGTH,
            surrogate_key: DEFAULT_SURROGATE_KEY.to_string(),
        }
    }

    /// Set the identifier field
    #[must_use]
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// Set the length of string columns
    #[must_use]
    pub fn with_varchar_length(mut self, length: u32) -> Self {
        self.varchar_length = length;
        self
    }

    /// Set the surrogate key column name of nested tables
    #[must_use]
    pub fn with_surrogate_key(mut self, name: impl Into<String>) -> Self {
        self.surrogate_key = name.into();
        self
    }

    /// Infer the main table and one nested table per list-of-mappings field
    pub fn infer(&self, records: &[Value], root_name: &str) -> Result<InferredSchema> {
        if !is_valid_identifier(root_name) {
            return Err(Error::invalid_table_name(root_name));
        }

        let catalog = FieldCatalog::discover(records);
        debug!(
            "Discovered {} fields in '{}' ({} nested)",
            catalog.len(),
            root_name,
            catalog.nested_fields().count()
        );

        let pk_name = format!("{root_name}_id");

        // Primary key always leads, even when no record carries an identifier
        let mut main = TableDefinition::new(root_name);
        main.push(ColumnDefinition::primary_key(&pk_name, ID_COLUMN_TYPE));

        for field in catalog.fields() {
            if field == self.id_field || catalog.is_nested(field) {
                continue;
            }
            let sample = records.iter().find_map(|r| present(r, field));
            let column = ColumnDefinition::new(field, self.infer_sql_type(sample));
            push_data_column(&mut main, column);
        }

        let nested = catalog
            .nested_fields()
            .map(|field| self.nested_table(records, &catalog, root_name, &pk_name, field))
            .collect();

        Ok(InferredSchema { main, nested })
    }

    /// Build the table for one nested field
    fn nested_table(
        &self,
        records: &[Value],
        catalog: &FieldCatalog,
        root_name: &str,
        pk_name: &str,
        field: &str,
    ) -> TableDefinition {
        let mut table = TableDefinition::new(format!("{root_name}_{field}"));
        table.push(ColumnDefinition::surrogate(&self.surrogate_key));
        table.push(ColumnDefinition::foreign_key(
            pk_name,
            ID_COLUMN_TYPE,
            root_name,
            pk_name,
        ));

        if let Some(keys) = catalog.nested_keys(field) {
            for key in keys.iter() {
                let sample = records
                    .iter()
                    .filter_map(|r| r.get(field).and_then(Value::as_array))
                    .flatten()
                    .find_map(|item| present(item, key));
                let column = ColumnDefinition::new(key, self.infer_sql_type(sample));
                push_data_column(&mut table, column);
            }
        }

        table
    }

    /// Map a sampled value to a column type; `None` means no value was found
    pub fn infer_sql_type(&self, value: Option<&Value>) -> SqlType {
        match value {
            Some(Value::Number(n)) if n.is_i64() || n.is_u64() => SqlType::Int,
            Some(Value::Number(_)) => SqlType::Float,
            Some(Value::Bool(_)) => SqlType::Boolean,
            Some(v) if is_date_wrapper(v) => SqlType::Timestamp,
            _ => SqlType::Varchar(self.varchar_length),
        }
    }
}

/// Add a data column unless a key column already took its name
fn push_data_column(table: &mut TableDefinition, column: ColumnDefinition) {
    if table.column(&column.name).is_some() {
        warn!(
            "Field '{}' collides with a key column of '{}', skipping it",
            column.name, table.name
        );
        return;
    }
    table.push(column);
}

/// Infer a schema with default settings
pub fn infer_schema(
    records: &[Value],
    root_name: &str,
) -> Result<(TableDefinition, Vec<TableDefinition>)> {
    SchemaInferencer::new()
        .infer(records, root_name)
        .map(InferredSchema::into_parts)
}
