use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod codes;
pub mod help;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidJson,
    ConfigInvalidValue,

    ValidationMissingArgument,
    ValidationInvalidArgument,
    ValidationUnknownErrorCode,

    LauncherSourceNotFound,
    LauncherSourceNotText,

    ColumnsColumnMissing,
    ColumnsColumnExists,
    ColumnsRowCountMismatch,
    ColumnsInvalidTable,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationMissingArgument => "validation.missing_argument",
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",
            ErrorCode::ValidationUnknownErrorCode => "validation.unknown_error_code",

            ErrorCode::LauncherSourceNotFound => "launcher.source_not_found",
            ErrorCode::LauncherSourceNotText => "launcher.source_not_text",

            ErrorCode::ColumnsColumnMissing => "columns.column_missing",
            ErrorCode::ColumnsColumnExists => "columns.column_exists",
            ErrorCode::ColumnsRowCountMismatch => "columns.row_count_mismatch",
            ErrorCode::ColumnsInvalidTable => "columns.invalid_table",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
    pub retryable: Option<bool>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingArgumentDetails {
    pub args: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcePathDetails {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDetails {
    pub column: String,
    pub path: String,
    pub available: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowCountDetails {
    pub source_rows: usize,
    pub destination_rows: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidTableDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
            retryable: None,
        }
    }

    pub fn validation_missing_argument(args: Vec<String>) -> Self {
        Self::new(
            ErrorCode::ValidationMissingArgument,
            "Missing required argument",
            to_details(MissingArgumentDetails { args }),
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        id: Option<String>,
        tried: Option<Vec<String>>,
    ) -> Self {
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            id,
            tried,
        });

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn validation_unknown_error_code(code: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ValidationUnknownErrorCode,
            "Unknown error code",
            serde_json::json!({ "code": code.into() }),
        )
        .with_hint("Run 'batwrap error codes' to see known codes")
    }

    pub fn launcher_source_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::LauncherSourceNotFound,
            format!("Source script not found: {}", path),
            to_details(SourcePathDetails { path, error: None }),
        )
        .with_hint("Check the --input path; it must point to an existing file")
    }

    pub fn launcher_source_not_text(path: impl Into<String>, error: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::LauncherSourceNotText,
            format!("Source script is not valid UTF-8 text: {}", path),
            to_details(SourcePathDetails {
                path,
                error: Some(error.into()),
            }),
        )
        .with_hint("Re-save the script as UTF-8 before converting")
    }

    pub fn columns_column_missing(
        column: impl Into<String>,
        path: impl Into<String>,
        available: Vec<String>,
    ) -> Self {
        let column = column.into();
        Self::new(
            ErrorCode::ColumnsColumnMissing,
            format!("Column '{}' does not exist in the source file", column),
            to_details(ColumnDetails {
                column,
                path: path.into(),
                available,
            }),
        )
    }

    pub fn columns_column_exists(
        column: impl Into<String>,
        path: impl Into<String>,
        available: Vec<String>,
    ) -> Self {
        let column = column.into();
        Self::new(
            ErrorCode::ColumnsColumnExists,
            format!("Column '{}' already exists in the destination file", column),
            to_details(ColumnDetails {
                column,
                path: path.into(),
                available,
            }),
        )
        .with_hint("Remove or rename the destination column before copying")
    }

    pub fn columns_row_count_mismatch(source_rows: usize, destination_rows: usize) -> Self {
        Self::new(
            ErrorCode::ColumnsRowCountMismatch,
            format!(
                "Destination has fewer rows ({}) than the source ({})",
                destination_rows, source_rows
            ),
            to_details(RowCountDetails {
                source_rows,
                destination_rows,
            }),
        )
        .with_hint("Rows are aligned by position; the destination needs at least as many rows")
    }

    pub fn columns_invalid_table(path: impl Into<String>, error: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::ColumnsInvalidTable,
            format!("Could not parse delimited file: {}", path),
            to_details(InvalidTableDetails {
                path,
                error: error.into(),
            }),
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = to_details(ConfigInvalidValueDetails {
            key: key.into(),
            value,
            problem: problem.into(),
        });

        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid configuration value",
            details,
        )
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in configuration",
            serde_json::json!({ "path": path.into(), "error": err.to_string() }),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalIoErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalJsonErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::internal_unexpected(message)
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
