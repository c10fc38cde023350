/// Settings for a single column expansion.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpandOptions {
    /// Delimiter used to split the cell text
    pub separator: String,
    /// Delimiter used to re-join overflow parts, defaults to `separator`
    pub join_char: Option<String>,
    /// Sentinel used to pad short rows
    pub missing_value: String,
    /// Prefix for generated column names, defaults to the source column name
    pub new_column_name: Option<String>,
    /// Split into several columns (true) or into one list column (false)
    pub expand: bool,
    /// Remove the source column when the original columns are kept
    pub drop_old: bool,
    /// Fixed output width, 0 resolves it from the longest split
    pub max_column_split: i64,
    /// Return only the newly produced column(s)
    pub new_data_only: bool,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            separator: "|".to_owned(),
            join_char: None,
            missing_value: "NA".to_owned(),
            new_column_name: None,
            expand: true,
            drop_old: true,
            max_column_split: 0,
            new_data_only: true,
        }
    }
}

impl ExpandOptions {
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_join_char(mut self, join_char: impl Into<String>) -> Self {
        self.join_char = Some(join_char.into());
        self
    }

    pub fn with_missing_value(mut self, missing_value: impl Into<String>) -> Self {
        self.missing_value = missing_value.into();
        self
    }

    pub fn with_new_column_name(mut self, name: impl Into<String>) -> Self {
        self.new_column_name = Some(name.into());
        self
    }

    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    pub fn with_drop_old(mut self, drop_old: bool) -> Self {
        self.drop_old = drop_old;
        self
    }

    pub fn with_max_column_split(mut self, max_column_split: i64) -> Self {
        self.max_column_split = max_column_split;
        self
    }

    pub fn with_new_data_only(mut self, new_data_only: bool) -> Self {
        self.new_data_only = new_data_only;
        self
    }

    /// Join delimiter in effect: an empty or absent value falls back to the separator.
    pub fn join_char(&self) -> &str {
        self.join_char
            .as_deref()
            .filter(|join_char| !join_char.is_empty())
            .unwrap_or(&self.separator)
    }

    /// Base name for new columns: an empty or absent value falls back to the source column.
    pub fn new_column_name<'a>(&'a self, source: &'a str) -> &'a str {
        self.new_column_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(source)
    }
}
