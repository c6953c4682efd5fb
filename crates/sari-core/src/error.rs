//! # Error Types
//!
//! Domain-specific error types for sari-core.
//!
//! ## Error Taxonomy
//! Every fallible operation in this system is a validation-rejection:
//! there are no retries and no fatal paths, and every failure is
//! recoverable by user correction. Errors fall into three families:
//!
//! - *Referential conflicts*: duplicate category/username, deleting a
//!   category that products still reference
//! - *Insufficient resource*: stock below the requested quantity, an
//!   empty cart at checkout, payment below the total
//! - *Not found*: surfaced by the store layer as explicit errors,
//!   never silent no-ops
//!
//! ## Design Principles
//! 1. `thiserror` derive macros, never manual impls
//! 2. Context in messages (product name, amounts)
//! 3. Errors are enum variants, never bare strings
//! 4. Credential failures stay generic to avoid username enumeration

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested quantity exceeds available stock. Raised by cart
    /// operations; note that checkout stock decrements clamp instead.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Cart operation referenced a product that has no line in the cart.
    #[error("Product {0} is not in the cart")]
    ProductNotInCart(String),

    /// Checkout or hold attempted on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cash tendered is below the sale total.
    #[error("Amount received {received} is less than total {total}")]
    InsufficientPayment { total: Money, received: Money },

    /// Held transactions can only be restored into an empty cart.
    #[error("Cart must be empty before retrieving a held transaction")]
    CartNotEmpty,

    /// Category already exists (post-trim, exact compare).
    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),

    /// Category still referenced by products cannot be deleted.
    #[error("Category '{category}' is still used by {product_count} product(s)")]
    CategoryInUse {
        category: String,
        product_count: usize,
    },

    /// Username collides case-insensitively with an existing account.
    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    /// Deliberately generic: the caller cannot tell an unknown
    /// username from a wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Operation requires a logged-in user.
    #[error("No user is logged in")]
    NotLoggedIn,

    /// A user cannot delete the account they are logged in as.
    #[error("Cannot delete the currently logged-in account")]
    CannotDeleteSelf,

    /// Input validation failure.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Coca-Cola 350ml".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Coca-Cola 350ml: available 3, requested 5"
        );
    }

    #[test]
    fn test_invalid_credentials_is_generic() {
        // The message must not reveal whether the username exists.
        assert_eq!(
            CoreError::InvalidCredentials.to_string(),
            "Invalid username or password"
        );
    }

    #[test]
    fn test_insufficient_payment_formats_amounts() {
        let err = CoreError::InsufficientPayment {
            total: Money::from_centavos(6750),
            received: Money::from_centavos(5000),
        };
        assert_eq!(
            err.to_string(),
            "Amount received ₱50.00 is less than total ₱67.50"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
