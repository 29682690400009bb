//! # Error Types
//!
//! Domain-specific error types for bookwise-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookwise-core errors (this file)                                       │
//! │  ├── CoreError        - Structural draft errors (bad index, caps,      │
//! │  │                      malformed details payload)                     │
//! │  └── ValidationError  - Per-field input failures; rendered into the    │
//! │                         field → message ErrorMap the UI displays       │
//! │                                                                         │
//! │  Flow: ValidationError ──► ErrorMap ──► blocked submission + red field │
//! │        CoreError       ──► caller (a UI bug, not a user mistake)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (limits, indexes, amounts)
//! 3. Errors are enum variants, never bare Strings
//! 4. Each ValidationError variant IS the user-facing message
//! 5. Nothing here is fatal: the worst outcome is a blocked submission

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Structural errors from draft manipulation and payload parsing.
///
/// These indicate a caller bug (stale row index) or corrupted data (details
/// blob that no longer parses), not user input to re-enter.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A service-line index no longer exists in the draft.
    ///
    /// ## When This Occurs
    /// The UI held onto a row index across a remove; indexes shift down.
    #[error("Service line {index} does not exist (draft has {len} lines)")]
    LineIndexOutOfBounds { index: usize, len: usize },

    /// An additional-fee index no longer exists in the draft.
    #[error("Additional fee {index} does not exist (draft has {len} fees)")]
    FeeIndexOutOfBounds { index: usize, len: usize },

    /// Draft has reached the maximum number of service lines.
    #[error("Booking cannot have more than {max} service lines")]
    TooManyLines { max: usize },

    /// Draft has reached the maximum number of additional fees.
    #[error("Booking cannot have more than {max} additional fees")]
    TooManyFees { max: usize },

    /// The persisted details blob could not be parsed.
    ///
    /// ## When This Occurs
    /// A stored booking is reopened for editing and its JSON details column
    /// is malformed or from an incompatible schema version.
    #[error("Booking details payload is invalid: {0}")]
    DetailsPayload(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Per-field input validation errors.
///
/// These occur when user input doesn't meet requirements. They are never
/// thrown across the engine boundary; the validator collects them into an
/// [`ErrorMap`](crate::validation::ErrorMap) keyed by field name, and the
/// rendered message of each variant is what the user sees next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (unparseable date or time).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Booking end date falls before the start date.
    #[error("End date precedes start date")]
    EndDateBeforeStart,

    /// Same-day booking whose end time is not after its start time.
    #[error("End time must be after start time for a same-day booking")]
    EndTimeNotAfterStart,

    /// No service line references a service that exists in the catalog.
    #[error("At least one service must be selected")]
    NoServiceSelected,

    /// Fixed discount larger than the pre-discount subtotal.
    #[error("Discount cannot exceed the subtotal of {subtotal}")]
    DiscountExceedsSubtotal { subtotal: Money },

    /// Percentage discount above 100%.
    #[error("Percentage discount cannot exceed 100%")]
    DiscountOverHundredPercent,

    /// Partial payment above the down-payment cap.
    #[error("Down payment cannot exceed {max} (90% of the grand total)")]
    ExceedsDownPaymentCap { max: Money },

    /// Amount paid above the grand total.
    #[error("Amount paid cannot exceed the grand total of {max}")]
    ExceedsGrandTotal { max: Money },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_messages() {
        let err = CoreError::LineIndexOutOfBounds { index: 5, len: 2 };
        assert_eq!(
            err.to_string(),
            "Service line 5 does not exist (draft has 2 lines)"
        );

        let err = CoreError::TooManyLines { max: 100 };
        assert_eq!(
            err.to_string(),
            "Booking cannot have more than 100 service lines"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "start_date".to_string(),
        };
        assert_eq!(err.to_string(), "start_date is required");

        let err = ValidationError::ExceedsDownPaymentCap {
            max: Money::from_cents(900_000),
        };
        assert_eq!(
            err.to_string(),
            "Down payment cannot exceed 9000.00 (90% of the grand total)"
        );

        let err = ValidationError::EndDateBeforeStart;
        assert_eq!(err.to_string(), "End date precedes start date");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "location".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
