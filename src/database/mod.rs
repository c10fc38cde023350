//! In-memory table model: typed cells, named columns, column selection and
//! delimited text input/output.

pub mod column;
pub mod delimited;
pub mod selector;
pub mod table;
