use super::ErrorCode;

pub fn all_codes() -> &'static [ErrorCode] {
    &[
        ErrorCode::ConfigInvalidJson,
        ErrorCode::ConfigInvalidValue,
        ErrorCode::ValidationMissingArgument,
        ErrorCode::ValidationInvalidArgument,
        ErrorCode::ValidationUnknownErrorCode,
        ErrorCode::LauncherSourceNotFound,
        ErrorCode::LauncherSourceNotText,
        ErrorCode::ColumnsColumnMissing,
        ErrorCode::ColumnsColumnExists,
        ErrorCode::ColumnsRowCountMismatch,
        ErrorCode::ColumnsInvalidTable,
        ErrorCode::InternalIoError,
        ErrorCode::InternalJsonError,
        ErrorCode::InternalUnexpected,
    ]
}

pub fn parse_code(code: &str) -> Option<ErrorCode> {
    all_codes()
        .iter()
        .copied()
        .find(|candidate| candidate.as_str() == code)
}
