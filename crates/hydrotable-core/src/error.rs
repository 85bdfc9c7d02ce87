use thiserror::Error;

/// Errors raised while building an export configuration or loading a preset
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("at least one column must be included in the export")]
    EmptyColumns,

    #[error("column {index} is out of range for a table with {column_count} columns")]
    ColumnOutOfRange { index: usize, column_count: usize },

    #[error("column {next} cannot follow column {previous}; columns must ascend without repeats")]
    ColumnOrder { previous: usize, next: usize },

    #[error("invalid table preset: {0}")]
    InvalidPreset(String),
}

impl ConfigurationError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigurationError::EmptyColumns => "EMPTY_COLUMNS",
            ConfigurationError::ColumnOutOfRange { .. } => "COLUMN_OUT_OF_RANGE",
            ConfigurationError::ColumnOrder { .. } => "COLUMN_ORDER",
            ConfigurationError::InvalidPreset(_) => "INVALID_PRESET",
        }
    }
}

impl From<serde_json::Error> for ConfigurationError {
    fn from(err: serde_json::Error) -> Self {
        ConfigurationError::InvalidPreset(err.to_string())
    }
}

/// Errors raised while enhancing a table on the host page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("no table matches selector '{0}'")]
    TableNotFound(String),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("table engine error: {0}")]
    Engine(String),
}

impl SetupError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            SetupError::TableNotFound(_) => "TABLE_NOT_FOUND",
            SetupError::Configuration(err) => err.code(),
            SetupError::Engine(_) => "ENGINE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = ConfigurationError::ColumnOutOfRange {
            index: 9,
            column_count: 8,
        };
        assert_eq!(err.code(), "COLUMN_OUT_OF_RANGE");
        assert_eq!(
            err.to_string(),
            "column 9 is out of range for a table with 8 columns"
        );

        let setup: SetupError = err.into();
        assert_eq!(setup.code(), "COLUMN_OUT_OF_RANGE");
        assert_eq!(SetupError::TableNotFound("#x".into()).code(), "TABLE_NOT_FOUND");
    }

    #[test]
    fn test_json_error_becomes_invalid_preset() {
        let err: ConfigurationError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.code(), "INVALID_PRESET");
    }
}
