use crate::database::column::Column;
use crate::database::column::Value;
use thiserror::Error;

/// Errors related to table construction and column lookup.
#[derive(Error, Debug, PartialEq)]
pub enum TableError {
    #[error("Column '{name}' has {actual} rows, expected {expected}")]
    RaggedColumn { name: String, expected: usize, actual: usize },

    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),
}

/// An in-memory table: ordered, uniquely named columns of equal length.
/// Rows are identified solely by position, and the row count survives removing
/// every column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Creates an empty table with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table without columns that already holds `rows` rows.
    pub fn with_rows(rows: usize) -> Self {
        Self { columns: Vec::new(), rows }
    }

    /// Builds a table from columns, checking lengths and name uniqueness.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, TableError> {
        Self::new().extend_columns(columns)
    }

    /// Appends every column in order, failing on the first invalid one.
    pub fn extend_columns(mut self, columns: Vec<Column>) -> Result<Self, TableError> {
        for column in columns {
            self.push_column(column)?;
        }
        Ok(self)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.columns.iter().map(|column| column.name.as_str())
    }

    /// Position of the column with the given name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Values of one row, in column order. Empty for a table without columns.
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.rows {
            return None;
        }
        Some(self.columns.iter().map(|column| &column.cells[index]).collect())
    }

    /// Appends a column. The first column of a table without rows fixes the row count.
    pub fn push_column(&mut self, column: Column) -> Result<(), TableError> {
        self.check_length(&column)?;
        if self.index_of(&column.name).is_some() {
            return Err(TableError::DuplicateColumn(column.name));
        }
        self.rows = column.len();
        self.columns.push(column);
        Ok(())
    }

    /// Replaces the column of the same name in place, or appends it.
    pub fn upsert_column(&mut self, column: Column) -> Result<(), TableError> {
        self.check_length(&column)?;
        self.rows = column.len();
        match self.index_of(&column.name) {
            Some(index) => self.columns[index] = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    /// Removes and returns the column at the given position. The row count is kept.
    pub fn remove_column(&mut self, index: usize) -> Option<Column> {
        if index < self.columns.len() {
            Some(self.columns.remove(index))
        } else {
            None
        }
    }

    fn check_length(&self, column: &Column) -> Result<(), TableError> {
        let unsized_table = self.columns.is_empty() && self.rows == 0;
        if unsized_table || column.len() == self.rows {
            Ok(())
        } else {
            Err(TableError::RaggedColumn {
                name: column.name.to_owned(),
                expected: self.rows,
                actual: column.len(),
            })
        }
    }
}
