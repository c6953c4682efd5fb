//! # sari-core: Pure Business Logic for Sari POS
//!
//! This crate is the **heart** of Sari POS, a retail point-of-sale for
//! small Philippine businesses. It contains all business logic as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sari POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    sari-store (persistence)                     │   │
//! │  │    Catalog ──► Inventory ──► Sales Ledger ──► Users/Session    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sari-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ reporting │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ top sales │  │   │
//! │  │   │   Sale    │  │  VatRate  │  │ CartItem  │  │ daily agg │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, User, BusinessSettings, ...)
//! - [`money`] - Money type with integer centavo arithmetic (no floats!)
//! - [`cart`] - Cart state and checkout math
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`receipt`] - 40-column plain-text receipt rendering
//! - [`reporting`] - Read-only aggregations over the sales ledger
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic over its inputs
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are centavos (i64), never floats
//! 4. **Explicit Errors**: All failures are typed rejections, never panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod receipt;
pub mod reporting;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, Discount};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, VatRate};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Philippine VAT rate in basis points (12%).
///
/// VAT in this system is an informational component of an already
/// VAT-inclusive total; it is never added on top of a price.
pub const VAT_RATE_BPS: u32 = 1200;

/// Default low-stock warning threshold.
///
/// A product with `0 < stock <= threshold` shows up in the low-stock
/// report; `stock == 0` is reported separately as out of stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Receipt line width in characters (58mm thermal paper, 40 columns).
pub const RECEIPT_WIDTH: usize = 40;
