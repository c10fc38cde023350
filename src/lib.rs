//! # slimsheet
//!
//! Two small utilities sharing one crate:
//!
//! - **Column expansion**: split a delimited text column of an in-memory table into a
//!   list column or into a fixed number of new columns, with configurable padding and
//!   re-joining of overflow parts.
//! - **Lambda packaging**: install a Python function's dependencies, drop the files
//!   matched by exclusion patterns, and emit the rest as plain files or as a single
//!   archive with a bootstrap loader.
//!
//! ## Modules
//!
//! - [`database`]: table model, column selection and delimited text I/O
//! - [`expand`]: the column expansion engine
//! - [`packager`]: the dependency packaging pipeline
pub mod database;
pub mod error;
pub mod expand;
pub mod helpers;
pub mod packager;

pub use crate::database::column::Column;
pub use crate::database::column::Value;
pub use crate::database::selector::ColumnSelector;
pub use crate::database::table::Table;
pub use crate::error::SlimSheetError;
pub use crate::expand::expand;
pub use crate::expand::ExpandOptions;
pub use crate::packager::OutputFormat;
pub use crate::packager::Packager;
