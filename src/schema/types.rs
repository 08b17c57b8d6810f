//! Relational schema types

use serde::{Serialize, Serializer};
use std::fmt;

/// SQL column type produced by inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    /// `INT`
    Int,
    /// `BIGINT`, used for surrogate keys
    BigInt,
    /// `FLOAT`
    Float,
    /// `BOOLEAN`
    Boolean,
    /// `TIMESTAMP`
    Timestamp,
    /// `VARCHAR(n)`
    Varchar(u32),
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Int => write!(f, "INT"),
            SqlType::BigInt => write!(f, "BIGINT"),
            SqlType::Float => write!(f, "FLOAT"),
            SqlType::Boolean => write!(f, "BOOLEAN"),
            SqlType::Timestamp => write!(f, "TIMESTAMP"),
            SqlType::Varchar(len) => write!(f, "VARCHAR({len})"),
        }
    }
}

impl Serialize for SqlType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Reference from a foreign key column to its parent table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyRef {
    /// Parent table name
    pub table: String,
    /// Parent primary key column
    pub column: String,
}

/// Role a column plays in its table's keys
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KeyRole {
    /// Plain data column
    #[default]
    None,
    /// Primary key mapped from the record identifier
    PrimaryKey,
    /// Auto-incrementing synthetic primary key
    Surrogate,
    /// Foreign key to the parent table
    ForeignKey(ForeignKeyRef),
}

/// A single column of a table definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,
    /// Column type
    #[serde(rename = "type")]
    pub sql_type: SqlType,
    /// Key role
    #[serde(skip_serializing_if = "KeyRole::is_none")]
    pub role: KeyRole,
}

impl KeyRole {
    /// Whether this is a plain data column
    pub fn is_none(&self) -> bool {
        matches!(self, KeyRole::None)
    }
}

impl ColumnDefinition {
    /// Create a plain data column
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            role: KeyRole::None,
        }
    }

    /// Create a primary key column
    pub fn primary_key(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            role: KeyRole::PrimaryKey,
        }
    }

    /// Create a surrogate (identity) primary key column
    pub fn surrogate(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: SqlType::BigInt,
            role: KeyRole::Surrogate,
        }
    }

    /// Create a foreign key column referencing `table(column)`
    pub fn foreign_key(
        name: impl Into<String>,
        sql_type: SqlType,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            sql_type,
            role: KeyRole::ForeignKey(ForeignKeyRef {
                table: table.into(),
                column: column.into(),
            }),
        }
    }

    /// Whether this column is its table's primary key
    pub fn is_primary_key(&self) -> bool {
        matches!(self.role, KeyRole::PrimaryKey | KeyRole::Surrogate)
    }
}

/// A table definition: name and ordered columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDefinition {
    /// Table name
    pub name: String,
    /// Columns in emission order
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    /// Create an empty table definition
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Append a column
    pub fn push(&mut self, column: ColumnDefinition) {
        self.columns.push(column);
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The primary key column, if any
    pub fn primary_key(&self) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.is_primary_key())
    }

    /// The foreign key column and its reference, if any
    pub fn foreign_key(&self) -> Option<(&ColumnDefinition, &ForeignKeyRef)> {
        self.columns.iter().find_map(|c| match &c.role {
            KeyRole::ForeignKey(fk) => Some((c, fk)),
            _ => None,
        })
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Result of inference over one dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferredSchema {
    /// Main table of top-level fields
    pub main: TableDefinition,
    /// One table per list-of-mappings field
    pub nested: Vec<TableDefinition>,
}

impl InferredSchema {
    /// Split into the main table and the nested tables
    pub fn into_parts(self) -> (TableDefinition, Vec<TableDefinition>) {
        (self.main, self.nested)
    }

    /// All tables, main first
    pub fn tables(&self) -> impl Iterator<Item = &TableDefinition> {
        std::iter::once(&self.main).chain(self.nested.iter())
    }

    /// Get a nested table by name
    pub fn nested_table(&self, name: &str) -> Option<&TableDefinition> {
        self.nested.iter().find(|t| t.name == name)
    }
}
