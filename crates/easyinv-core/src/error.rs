//! # Error Types
//!
//! Domain-specific error types for easyinv-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  easyinv-core errors (this file)                                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  easyinv-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures (wraps            │
//! │                         ValidationError for rejected input)           │
//! │                                                                         │
//! │  easyinv-backup errors (separate crate)                                │
//! │  ├── BackupError      - Snapshot/export failures                       │
//! │  ├── RestoreError     - Restore state-machine failures                 │
//! │  └── ImportError      - Bulk CSV import failures                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Not-found and empty-sale conditions surface from the data layer as
//! `DbError` variants; the core crate only ever rejects *input*.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, ID, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any row is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., not a decimal amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku".to_string(),
        };
        assert_eq!(err.to_string(), "sku is required");

        let err = ValidationError::TooLong {
            field: "description".to_string(),
            max: 255,
        };
        assert_eq!(err.to_string(), "description must be at most 255 characters");
    }
}
