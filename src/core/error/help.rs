use super::{codes, ErrorCode, Hint};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHelpSummary {
    pub code: String,
    pub summary: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHelp {
    pub code: String,
    pub summary: String,
    pub details_schema: serde_json::Value,
    pub hints: Vec<Hint>,
}

pub fn list() -> Vec<ErrorHelpSummary> {
    codes::all_codes()
        .iter()
        .copied()
        .map(|code| {
            let help = explain(code);
            ErrorHelpSummary {
                code: help.code,
                summary: help.summary,
            }
        })
        .collect()
}

fn help(
    code: ErrorCode,
    summary: &str,
    details_schema: serde_json::Value,
    hint: &str,
) -> ErrorHelp {
    ErrorHelp {
        code: code.as_str().to_string(),
        summary: summary.to_string(),
        details_schema,
        hints: vec![Hint {
            message: hint.to_string(),
        }],
    }
}

pub fn explain(code: ErrorCode) -> ErrorHelp {
    match code {
        ErrorCode::ConfigInvalidJson => help(
            code,
            "batwrap.json is not valid JSON",
            serde_json::json!({"path":"string","error":"string"}),
            "Fix the JSON syntax or run 'batwrap config reset'",
        ),
        ErrorCode::ConfigInvalidValue => help(
            code,
            "Configuration value is invalid",
            serde_json::json!({"key":"string","value":"string?","problem":"string"}),
            "Correct the config value to match the expected type",
        ),
        ErrorCode::ValidationMissingArgument => help(
            code,
            "Missing required CLI argument",
            serde_json::json!({"args":"string[]"}),
            "Rerun the command with the required argument(s)",
        ),
        ErrorCode::ValidationInvalidArgument => help(
            code,
            "Invalid CLI argument",
            serde_json::json!({"field":"string","problem":"string","id":"string?","tried":"string[]?"}),
            "Verify the argument value and try again",
        ),
        ErrorCode::ValidationUnknownErrorCode => help(
            code,
            "Unknown error code",
            serde_json::json!({"code":"string"}),
            "Run 'batwrap error codes' to see known codes",
        ),
        ErrorCode::LauncherSourceNotFound => help(
            code,
            "Script to convert does not exist",
            serde_json::json!({"path":"string"}),
            "Check the --input path",
        ),
        ErrorCode::LauncherSourceNotText => help(
            code,
            "Script to convert is not UTF-8 text",
            serde_json::json!({"path":"string","error":"string"}),
            "Re-save the script as UTF-8",
        ),
        ErrorCode::ColumnsColumnMissing => help(
            code,
            "Column not present in the source file",
            serde_json::json!({"column":"string","path":"string","available":"string[]"}),
            "Pick one of the columns listed in details.available",
        ),
        ErrorCode::ColumnsColumnExists => help(
            code,
            "Column already present in the destination file",
            serde_json::json!({"column":"string","path":"string","available":"string[]"}),
            "Copying never overwrites an existing destination column",
        ),
        ErrorCode::ColumnsRowCountMismatch => help(
            code,
            "Destination has fewer rows than the source",
            serde_json::json!({"sourceRows":"number","destinationRows":"number"}),
            "Rows are aligned by position; add rows to the destination first",
        ),
        ErrorCode::ColumnsInvalidTable => help(
            code,
            "Delimited file could not be parsed",
            serde_json::json!({"path":"string","error":"string"}),
            "Check the file has a header row and the right --delimiter",
        ),
        ErrorCode::InternalIoError => help(
            code,
            "Internal IO error",
            serde_json::json!({"error":"string","context":"string?"}),
            "Check file permissions and that the target directory exists",
        ),
        ErrorCode::InternalJsonError => help(
            code,
            "Internal JSON error",
            serde_json::json!({"error":"string","context":"string?"}),
            "Report as a batwrap bug if persistent",
        ),
        ErrorCode::InternalUnexpected => help(
            code,
            "Unexpected internal error",
            serde_json::json!({}),
            "Report as a batwrap bug with steps to reproduce",
        ),
    }
}
