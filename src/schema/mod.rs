//! Schema inference module
//!
//! Derives relational table definitions from loosely structured JSON records.
//!
//! # Features
//!
//! - **Field Discovery**: Unions field names across sparse records
//! - **Nested Tables**: Lists of mappings become child tables with a foreign key
//! - **Sample-Based Typing**: The first present value of a field decides its type
//! - **DDL Rendering**: `CREATE TABLE IF NOT EXISTS` statements

mod catalog;
mod ddl;
mod inference;
mod types;

pub use catalog::{FieldCatalog, NameSet};
pub use inference::{
    infer_schema, is_valid_identifier, SchemaInferencer, DEFAULT_ID_FIELD,
    DEFAULT_SURROGATE_KEY, DEFAULT_VARCHAR_LENGTH, ID_COLUMN_TYPE,
};
pub use types::{
    ColumnDefinition, ForeignKeyRef, InferredSchema, KeyRole, SqlType, TableDefinition,
};
