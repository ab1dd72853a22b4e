use rusqlite::types::Value;

use crate::error::{AppError, DbErrorKind, Result};

/// Builds `UPDATE <table> SET ... WHERE id = ?n` with numbered placeholders.
///
/// Each `set` pushes the column and its value together, so placeholder `?k`
/// always refers to the k-th pushed value. The row id is appended last.
#[derive(Debug, Clone)]
pub struct UpdateStatement {
    table: &'static str,
    columns: Vec<&'static str>,
    values: Vec<Value>,
}

impl UpdateStatement {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.columns.push(column);
        self.values.push(value.into());
        self
    }

    pub fn set_if_some<V: Into<Value>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    /// Renders the SQL and the bound values, id last.
    pub fn build_where_id(self, id: i64) -> Result<(String, Vec<Value>)> {
        if self.columns.is_empty() {
            return Err(AppError::database(
                DbErrorKind::Query,
                format!("UPDATE {} has no columns to set", self.table),
            ));
        }

        let assignments = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ?{}", column, i + 1))
            .collect::<Vec<_>>()
            .join(", ");

        let mut values = self.values;
        values.push(Value::Integer(id));
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            self.table,
            assignments,
            values.len()
        );
        Ok((sql, values))
    }
}
