use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Table parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Input file not found: {path}")]
    InputNotFoundError { path: String },

    #[error("Column '{column}' not found in {file} (available: {})", .available.join(", "))]
    MissingColumnError {
        file: String,
        column: String,
        available: Vec<String>,
    },

    #[error("Invalid number '{value}' in {file}, column '{column}', row {row}")]
    InvalidNumberError {
        file: String,
        column: String,
        row: usize,
        value: String,
    },

    #[error("Row {row} of {file} has {found} fields but the header has {expected}")]
    ExtraFieldsError {
        file: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Values in {file} span too wide a range to plot on the {axis} axis")]
    UnplottableRangeError { file: String, axis: String },

    #[error("Chart rendering failed: {message}")]
    RenderError { message: String },
}

/// 錯誤分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Data,
    Rendering,
    System,
}

/// 錯誤嚴重程度，決定程序退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::High => 1,     // 輸入或資料錯誤
            ErrorSeverity::Medium => 2,   // 配置錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

impl PlotError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlotError::ConfigError { .. }
            | PlotError::ConfigValidationError { .. }
            | PlotError::InvalidConfigValueError { .. }
            | PlotError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PlotError::InputNotFoundError { .. } => ErrorCategory::Input,
            PlotError::CsvError(_)
            | PlotError::MissingColumnError { .. }
            | PlotError::InvalidNumberError { .. }
            | PlotError::ExtraFieldsError { .. }
            | PlotError::UnplottableRangeError { .. } => ErrorCategory::Data,
            PlotError::RenderError { .. } => ErrorCategory::Rendering,
            PlotError::IoError(_) | PlotError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Rendering | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlotError::InputNotFoundError { .. } => {
                "Run the benchmark first or point --input-dir at the directory holding its output"
            }
            PlotError::MissingColumnError { .. } => {
                "The first line of the table must be a header naming the columns, e.g. 'x_0 y_0'"
            }
            PlotError::InvalidNumberError { .. } => {
                "Every data field must be a number; check the table for stray text"
            }
            PlotError::CsvError(_) | PlotError::ExtraFieldsError { .. } => {
                "A row may not have more whitespace-separated fields than the header"
            }
            PlotError::UnplottableRangeError { .. } => {
                "Check the table for overflowing values near the f64 limits"
            }
            PlotError::ConfigError { .. } | PlotError::ConfigValidationError { .. } => {
                "Check the TOML syntax of the configuration file"
            }
            PlotError::InvalidConfigValueError { .. } | PlotError::MissingConfigError { .. } => {
                "Fix the reported configuration value and run again"
            }
            PlotError::RenderError { .. } => {
                "Check that the output directory is writable and the image size is reasonable"
            }
            PlotError::IoError(_) => "Check file permissions and available disk space",
            PlotError::SerializationError(_) => "This is a bug; please report it",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlotError::InputNotFoundError { path } => {
                format!("Cannot find benchmark results at '{}'", path)
            }
            PlotError::MissingColumnError { file, column, .. } => {
                format!("'{}' has no column named '{}'", file, column)
            }
            PlotError::InvalidNumberError {
                file, row, value, ..
            } => format!("'{}' row {}: '{}' is not a number", file, row, value),
            PlotError::RenderError { message } => format!("Could not draw the chart: {}", message),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message_lists_available_columns() {
        let err = PlotError::MissingColumnError {
            file: "rhm-insert.txt".to_string(),
            column: "y_0".to_string(),
            available: vec!["x_0".to_string(), "y_1".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "Column 'y_0' not found in rhm-insert.txt (available: x_0, y_1)"
        );
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_exit_codes_are_never_zero() {
        let errors = vec![
            PlotError::ConfigError {
                message: "bad".to_string(),
            },
            PlotError::InputNotFoundError {
                path: "rhm-churn.txt".to_string(),
            },
            PlotError::RenderError {
                message: "boom".to_string(),
            },
            PlotError::IoError(std::io::Error::other("disk")),
        ];

        let codes: Vec<i32> = errors.iter().map(|e| e.severity().exit_code()).collect();
        assert_eq!(codes, vec![2, 1, 3, 3]);
    }

    #[test]
    fn test_user_friendly_message_for_invalid_number() {
        let err = PlotError::InvalidNumberError {
            file: "rhm-insert.txt".to_string(),
            column: "x_0".to_string(),
            row: 3,
            value: "abc".to_string(),
        };

        assert_eq!(
            err.user_friendly_message(),
            "'rhm-insert.txt' row 3: 'abc' is not a number"
        );
    }
}
