//! # Column Expansion
//!
//! Splits a delimited text column of a table into a list column or into a fixed
//! number of new columns, padding short rows and re-joining overflow parts.
//!
//! ```
//! use slimsheet::database::column::Column;
//! use slimsheet::database::selector::ColumnSelector;
//! use slimsheet::database::table::Table;
//! use slimsheet::expand::{expand, ExpandOptions};
//!
//! let table = Table::from_columns(vec![Column::new("Expand", ["a|b|c", "", "x|y"])]).unwrap();
//! let expanded = expand(&table, &ColumnSelector::by_name("Expand"), &ExpandOptions::default()).unwrap();
//! assert_eq!(expanded.column_names().collect::<Vec<_>>(), ["Expand_0", "Expand_1", "Expand_2"]);
//! ```

use crate::database::column::Column;
use crate::database::column::Value;
use crate::database::delimited::read_table;
use crate::database::delimited::write_table;
use crate::database::selector::ColumnSelector;
use crate::database::selector::SelectorError;
use crate::database::table::Table;
use crate::database::table::TableError;
use crate::error::ResultMessage;
use crate::error::SlimSheetError;
use crate::helpers::string::normalize;
use crate::helpers::string::split;
use std::io::Read;
use std::io::Write;
use thiserror::Error;

mod options;

pub use options::ExpandOptions;

/// Largest accepted `max_column_split`.
pub const MAX_COLUMN_SPLIT: usize = 1 << 16;

/// Errors raised by the expansion engine.
#[derive(Error, Debug, PartialEq)]
pub enum ExpandError {
    #[error("Invalid argument: {0}")]
    InvalidSelector(#[from] SelectorError),

    #[error("Invalid argument: max_column_split must be greater or equal to 0, got {0}")]
    NegativeMaxColumnSplit(i64),

    #[error("Invalid argument: max_column_split must be at most {limit}, got {requested}")]
    MaxColumnSplitTooLarge { requested: i64, limit: usize },

    #[error("Invalid argument: separator must not be empty")]
    EmptySeparator,

    #[error("Cell at row {row} of column '{column}' is {kind}, expected text")]
    CellNotText { row: usize, column: String, kind: &'static str },

    #[error("{0}")]
    Table(#[from] TableError),
}

/// Expands one column of `table` according to `options`.
///
/// The input table is never modified; either a complete new table is returned or
/// an error is raised before any output is produced.
pub fn expand(table: &Table, selector: &ColumnSelector, options: &ExpandOptions) -> Result<Table, ExpandError> {
    let (column_index, column_name) = selector.resolve(table)?;
    if options.max_column_split < 0 {
        return Err(ExpandError::NegativeMaxColumnSplit(options.max_column_split));
    }
    let max_column_split = usize::try_from(options.max_column_split)
        .ok()
        .filter(|width| *width <= MAX_COLUMN_SPLIT)
        .ok_or(ExpandError::MaxColumnSplitTooLarge {
            requested: options.max_column_split,
            limit: MAX_COLUMN_SPLIT,
        })?;
    if options.separator.is_empty() {
        return Err(ExpandError::EmptySeparator);
    }
    let new_column_name = options.new_column_name(column_name).to_owned();
    let join_char = options.join_char();

    let split_data = table.columns()[column_index]
        .cells
        .iter()
        .enumerate()
        .map(|(row, value)| match value.as_text() {
            Some(text) => Ok(split(text, &options.separator)),
            None => Err(ExpandError::CellNotText {
                row,
                column: column_name.to_owned(),
                kind: value.kind(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut base = table.clone();
    if options.drop_old {
        base.remove_column(column_index);
    }

    let new_columns = if options.expand {
        let width = match max_column_split {
            0 => split_data.iter().map(Vec::len).max().unwrap_or(0),
            width => width,
        };
        let rows: Vec<Vec<String>> = split_data
            .iter()
            .map(|parts| normalize(parts, join_char, width, &options.missing_value))
            .collect();
        (0..width)
            .map(|index| Column {
                name: format!("{}_{}", new_column_name, index),
                cells: rows.iter().map(|row| Value::Text(row[index].to_owned())).collect(),
            })
            .collect()
    } else {
        vec![Column {
            name: new_column_name,
            cells: split_data.into_iter().map(Value::List).collect(),
        }]
    };

    if options.new_data_only {
        Ok(Table::with_rows(table.row_count()).extend_columns(new_columns)?)
    } else {
        for column in new_columns {
            base.upsert_column(column)?;
        }
        Ok(base)
    }
}

/// Reads a delimited table, expands one column and writes the result.
/// Returns the number of data rows written; errors are prefixed with `source`.
pub fn expand_delimited<R: Read, W: Write>(
    source: &str,
    reader: R,
    writer: W,
    delimiter: u8,
    selector: &ColumnSelector,
    options: &ExpandOptions,
) -> Result<usize, SlimSheetError> {
    transform_delimited(reader, writer, delimiter, selector, options).with_prefix(source)
}

fn transform_delimited<R: Read, W: Write>(
    reader: R,
    writer: W,
    delimiter: u8,
    selector: &ColumnSelector,
    options: &ExpandOptions,
) -> Result<usize, SlimSheetError> {
    let table = read_table(reader, delimiter)?;
    let expanded = expand(&table, selector, options)?;
    Ok(write_table(writer, &expanded, delimiter)?)
}
