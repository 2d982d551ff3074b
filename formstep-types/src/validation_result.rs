use serde::{Deserialize, Serialize};

/// The outcome of a validation check.
///
/// Validation failures are expected and user-correctable, so they are values
/// rather than errors. `error` is empty whenever `valid` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub error: String,
}

impl ValidationResult {
    /// A passing result.
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: String::new(),
        }
    }

    /// A failing result with a human-readable reason.
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_is_empty_exactly_when_valid() {
        let ok = ValidationResult::ok();
        assert!(ok.valid && ok.error.is_empty());

        let failed = ValidationResult::fail("Invalid email");
        assert!(!failed.valid);
        assert_eq!(failed.error, "Invalid email");
    }

    #[test]
    fn serializes_as_valid_and_error() {
        let json = serde_json::to_string(&ValidationResult::fail("This field is required")).unwrap();
        assert_eq!(json, r#"{"valid":false,"error":"This field is required"}"#);
    }
}
