//! `CREATE TABLE` rendering

use super::types::{ColumnDefinition, InferredSchema, KeyRole, TableDefinition};
use std::fmt;

impl fmt::Display for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.sql_type)?;
        match &self.role {
            KeyRole::None => Ok(()),
            KeyRole::PrimaryKey => write!(f, " PRIMARY KEY"),
            KeyRole::Surrogate => write!(f, " IDENTITY(1,1) PRIMARY KEY"),
            KeyRole::ForeignKey(fk) => write!(f, " REFERENCES {}({})", fk.table, fk.column),
        }
    }
}

impl TableDefinition {
    /// Render as a `CREATE TABLE IF NOT EXISTS` statement
    pub fn to_sql(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(ToString::to_string).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n);",
            self.name,
            columns.join(", ")
        )
    }
}

impl InferredSchema {
    /// Render every table, main first, one statement per line group
    pub fn to_sql(&self) -> String {
        self.tables()
            .map(TableDefinition::to_sql)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
