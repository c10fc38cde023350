use crate::database::table::Table;
use thiserror::Error;

/// Errors raised while resolving a column selector against a table.
#[derive(Error, Debug, PartialEq)]
pub enum SelectorError {
    #[error("either a column name or a column index is required")]
    Missing,

    #[error("column name '{name}' is at index {actual}, not at the given index {index}")]
    Conflicting { name: String, index: usize, actual: usize },

    #[error("column '{0}' not found")]
    UnknownName(String),

    #[error("column index {index} is out of range for a table with {count} columns")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Identifies a table column by name, by zero-based position, or by both.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnSelector {
    pub name: Option<String>,
    pub index: Option<usize>,
}

impl ColumnSelector {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), index: None }
    }

    pub fn by_index(index: usize) -> Self {
        Self { name: None, index: Some(index) }
    }

    /// Resolves to the column position and name.
    /// When both a name and an index are given they must point at the same column.
    pub fn resolve<'t>(&self, table: &'t Table) -> Result<(usize, &'t str), SelectorError> {
        let by_name = self
            .name
            .as_deref()
            .map(|name| table.index_of(name).ok_or_else(|| SelectorError::UnknownName(name.to_owned())))
            .transpose()?;
        let by_index = self
            .index
            .map(|index| match table.column_at(index) {
                Some(_) => Ok(index),
                None => Err(SelectorError::IndexOutOfRange { index, count: table.column_count() }),
            })
            .transpose()?;
        let index = match (by_name, by_index) {
            (None, None) => return Err(SelectorError::Missing),
            (Some(actual), Some(index)) if actual != index => {
                return Err(SelectorError::Conflicting {
                    name: self.name.to_owned().unwrap_or_default(),
                    index,
                    actual,
                })
            }
            (Some(index), _) | (None, Some(index)) => index,
        };
        let name = table.columns()[index].name.as_str();
        Ok((index, name))
    }
}
