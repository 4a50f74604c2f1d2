//! Input validation primitives.

use crate::error::{Error, Result};

/// Require an Option to contain a value, with hints for resolution.
pub fn require_with_hints<T>(
    opt: Option<T>,
    field: &str,
    message: &str,
    hints: Vec<String>,
) -> Result<T> {
    opt.ok_or_else(|| Error::validation_invalid_argument(field, message, None, Some(hints)))
}

/// Require a string to be non-empty after trimming.
///
/// Returns a reference to the trimmed string on success.
pub fn require_non_empty<'a>(value: &'a str, field: &str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::validation_invalid_argument(field, message, None, None))
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_with_hints_returns_value_when_some() {
        let result = require_with_hints(Some("value"), "field", "msg", vec![]);
        assert_eq!(result.unwrap(), "value");
    }

    #[test]
    fn require_with_hints_keeps_hints_in_details() {
        let err = require_with_hints::<&str>(None, "input", "Missing", vec!["try this".into()])
            .unwrap_err();
        assert_eq!(err.details["tried"][0], "try this");
    }

    #[test]
    fn require_non_empty_trims_whitespace() {
        assert_eq!(require_non_empty("  name ", "field", "msg").unwrap(), "name");
    }

    #[test]
    fn require_non_empty_rejects_blank() {
        assert!(require_non_empty("   ", "field", "msg").is_err());
    }
}
