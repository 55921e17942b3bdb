//! # Error Types
//!
//! Domain-level error types for mandi-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mandi-core errors (this file)                                         │
//! │  └── ValidationError  - Input contract failures, raised before I/O     │
//! │                                                                         │
//! │  mandi-db errors (separate crate)                                      │
//! │  └── DbError          - Storage failures; wraps ValidationError        │
//! │                                                                         │
//! │  Flow: ValidationError → DbError → caller                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, cap)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Input validation errors.
///
/// Raised by the repository layer before any statement is issued. These are
/// caller-contract violations, not storage failures: the database never saw
/// the request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value exceeds its storage cap.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// An update was requested with no fields set.
    ///
    /// Distinct from not-found: the statement was never built, so the caller
    /// cannot tell whether the row exists.
    #[error("no fields to update")]
    EmptyUpdate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "image_url".to_string(),
            max: 500,
        };
        assert_eq!(err.to_string(), "image_url must be at most 500 characters");

        assert_eq!(ValidationError::EmptyUpdate.to_string(), "no fields to update");
    }
}
