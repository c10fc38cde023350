//! Delimited text input and output for tables.
//! The first record is always the header row.

use crate::database::column::Column;
use crate::database::column::Value;
use crate::database::table::Table;
use crate::database::table::TableError;
use std::io::Read;
use std::io::Write;
use thiserror::Error;

/// Errors related to reading or writing delimited text.
#[derive(Error, Debug)]
pub enum CsvError {
    #[error("Invalid delimited data: {0}")]
    Format(#[from] csv::Error),

    #[error("Missing header row")]
    MissingHeaderRow,

    #[error("{0}")]
    Table(#[from] TableError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Reads a table whose cells are all text.
pub fn read_table<R: Read>(reader: R, delimiter: u8) -> Result<Table, CsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(CsvError::MissingHeaderRow);
    }
    let mut cells: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (index, field) in record.iter().enumerate() {
            cells[index].push(Value::from(field));
        }
    }
    let columns = headers
        .iter()
        .zip(cells)
        .map(|(name, cells)| Column { name: name.to_owned(), cells })
        .collect();
    Ok(Table::from_columns(columns)?)
}

/// Writes a table with a header row. Returns the number of data rows written.
pub fn write_table<W: Write>(writer: W, table: &Table, delimiter: u8) -> Result<usize, CsvError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    writer.write_record(table.column_names())?;
    let mut rows = 0;
    while let Some(row) = table.row(rows) {
        writer.write_record(row.iter().map(|value| value.to_string()))?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}
