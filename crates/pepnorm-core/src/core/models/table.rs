use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Table '{table}' has no header row")]
    MissingHeader { table: String },
    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn { table: String, column: String },
}

/// A row-aligned table of string cells.
///
/// Columns are declared once, in order, and are unique. Every row holds exactly one
/// cell per declared column; an absent value is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table. Repeated column names keep their first position.
    pub fn new<I, S>(name: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self {
            name: name.to_string(),
            ..Self::default()
        };
        for column in columns {
            table.add_column(column);
        }
        table
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<String>] {
        &mut self.rows
    }

    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    /// Returns the index of `column`, or a [`SchemaError`] naming this table.
    pub fn require_column(&self, column: &str) -> Result<usize, SchemaError> {
        self.column_index(column)
            .ok_or_else(|| SchemaError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Declares a column, filling existing rows with empty cells.
    ///
    /// Returns the index of the column; an already declared name keeps its position.
    pub fn add_column(&mut self, column: impl Into<String>) -> usize {
        let column = column.into();
        if let Some(&existing) = self.index.get(&column) {
            return existing;
        }
        let position = self.columns.len();
        self.index.insert(column.clone(), position);
        self.columns.push(column);
        for row in &mut self.rows {
            row.push(String::new());
        }
        position
    }

    /// Appends a row, padding or truncating it to the declared width.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    /// Appends a row from `(column, value)` pairs.
    ///
    /// Undeclared names are ignored and a repeated name keeps its last value.
    pub fn push_named<I, K, V>(&mut self, cells: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut row = vec![String::new(); self.columns.len()];
        for (column, value) in cells {
            if let Some(position) = self.column_index(column.as_ref()) {
                row[position] = value.into();
            }
        }
        self.rows.push(row);
    }

    /// Returns the cell at (`row`, `column`), or `""` when either is absent.
    pub fn cell(&self, row: usize, column: &str) -> &str {
        match (self.rows.get(row), self.column_index(column)) {
            (Some(cells), Some(position)) => cells[position].as_str(),
            _ => "",
        }
    }

    pub fn set_cell(&mut self, row: usize, column: usize, value: impl Into<String>) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|cells| cells.get_mut(column)) {
            *cell = value.into();
        }
    }
}
