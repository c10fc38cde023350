use std::fmt::Display;

/// Types of cell values held in a table column.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    /// Boolean values (true/false)
    Boolean(bool),
    /// 64-bit signed integers
    Integer(i64),
    /// Double-precision floating point numbers
    Float(f64),
    /// Variable-length strings
    Text(String),
    /// Ordered sequence of strings, produced by splitting without expanding
    List(Vec<String>),
}

impl Value {
    /// Returns the type name used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
        }
    }

    /// Borrows the text content, or None for any other kind.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns true if this value is a list of strings.
    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::List(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl Display for Value {
    /// Renders the value as a single delimited-text field.
    /// Lists are written as `[a, b, c]`, nulls as the empty string.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", value),
            Value::Text(value) => f.write_str(value),
            Value::List(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

/// Represents a named column of a table.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Column name (from header row or generated)
    pub name: String,
    /// Cell values, one per row
    pub cells: Vec<Value>,
}

impl Column {
    /// Creates a column from a name and any collection of convertible values.
    pub fn new<N, I, V>(name: N, cells: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            name: name.into(),
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of cells (rows) in this column.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
