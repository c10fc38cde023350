use thiserror::Error;

/// Main error type for the slimsheet crate.
/// Aggregates the errors raised while expanding delimited tables.
#[derive(Error, Debug)]
pub enum SlimSheetError {
    #[error("{0}")]
    WithContextError(String),

    // Database module errors
    #[error("{0}")]
    CsvError(#[from] crate::database::delimited::CsvError),

    // Expansion engine errors
    #[error("{0}")]
    ExpandError(#[from] crate::expand::ExpandError),
}

pub trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, SlimSheetError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| SlimSheetError::WithContextError(format!("{}: {}", message, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::delimited::CsvError;
    use crate::database::selector::SelectorError;
    use crate::expand::ExpandError;

    #[test]
    fn with_prefix_names_the_input() {
        let result: Result<(), SlimSheetError> = Err(ExpandError::from(SelectorError::Missing).into());
        let error = result.with_prefix("data.csv").unwrap_err();
        assert_eq!(
            error.to_string(),
            "data.csv: Invalid argument: either a column name or a column index is required"
        );
    }

    #[test]
    fn with_prefix_keeps_ok() {
        let result: Result<usize, SlimSheetError> = Ok(3);
        assert_eq!(result.with_prefix("ignored").unwrap(), 3);
    }

    #[test]
    fn csv_errors_convert() {
        let error = SlimSheetError::from(CsvError::MissingHeaderRow);
        assert!(matches!(error, SlimSheetError::CsvError(CsvError::MissingHeaderRow)));
        assert_eq!(error.to_string(), "Missing header row");
    }
}
