//! # Domain Types
//!
//! Core domain types used throughout Sari POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  category (str) │   │  receipt_number │   │  username       │       │
//! │  │  price, stock   │   │  items (frozen) │   │  role           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ StockAdjustment │   │ HeldTransaction │   │ BusinessSettings│       │
//! │  │  append-only    │   │  consumed once  │   │  singleton      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `CartItem` embeds a full value-copy of the `Product` at the moment it
//! enters a cart. A `Sale` embeds its `CartItem`s by value. Sales stay
//! immutable historical records even when the product is later edited or
//! deleted; they are never live references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{Money, VatRate};

// =============================================================================
// Product
// =============================================================================

/// A sellable catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to the cashier and on receipts.
    pub name: String,

    /// Category name; acts as a foreign-key-like reference into the
    /// category list. Renaming a category cascades into this field.
    pub category: String,

    /// VAT-inclusive selling price. Always positive.
    pub price: Money,

    /// Acquisition cost, for margin reporting.
    pub cost: Option<Money>,

    /// Current stock level. Never negative.
    pub stock: i64,

    /// Barcode (EAN-8 through EAN-13), digits only.
    pub barcode: Option<String>,

    /// Optional free-text description.
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// True when stock is low but not exhausted (`0 < stock <= threshold`).
    #[inline]
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.stock > 0 && self.stock <= threshold
    }

    /// True when the product is fully out of stock.
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }
}

/// Fields for creating a product; id and timestamps are assigned by the
/// catalog store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub cost: Option<Money>,
    pub stock: i64,
    pub barcode: Option<String>,
    pub description: Option<String>,
}

/// Partial product update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Money>,
    pub cost: Option<Option<Money>>,
    pub stock: Option<i64>,
    pub barcode: Option<Option<String>>,
    pub description: Option<Option<String>>,
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in a cart, a held transaction, or a completed sale.
///
/// The embedded product is a point-in-time snapshot; `subtotal` is
/// frozen as `quantity × product.price` at the moment the line was
/// created and is not recomputed if the catalog price changes later.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub product: Product,
    pub quantity: i64,
    pub subtotal: Money,
}

impl CartItem {
    /// Snapshots a product into a cart line.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            product_id: product.id.clone(),
            product: product.clone(),
            quantity,
            subtotal: product.price.multiply_quantity(quantity),
        }
    }

    /// Re-freezes the subtotal after a quantity change. The unit price
    /// stays whatever it was when the snapshot was taken.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
        self.subtotal = self.product.price.multiply_quantity(quantity);
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid. Cash is the only method with tendered-amount /
/// change handling; digital methods settle exactly at the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    GCash,
    Maya,
    Card,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl PaymentMethod {
    /// True for non-cash tender (GCash, Maya, card).
    #[inline]
    pub fn is_digital(&self) -> bool {
        !matches!(self, PaymentMethod::Cash)
    }

    /// Uppercase label for receipts ("CASH", "GCASH", ...).
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::GCash => "GCASH",
            PaymentMethod::Maya => "MAYA",
            PaymentMethod::Card => "CARD",
        }
    }
}

// =============================================================================
// Discount Type
// =============================================================================

/// Which discount rule produced a sale's discount amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale. Immutable once created: a return is a NEW sale
/// with negated monetary fields, never an edit of the original.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,

    /// Human-readable identifier, `YYMMDD-` plus the six trailing
    /// digits of a millisecond timestamp. Unique enough for a single
    /// store, not globally.
    pub receipt_number: String,

    /// Frozen line items, in cart insertion order.
    pub items: Vec<CartItem>,

    pub subtotal: Money,
    /// Discount amount actually applied (not the raw rate).
    pub discount: Money,
    pub discount_type: DiscountType,
    /// VAT component of `total` (informational; prices are inclusive).
    pub vat_amount: Money,
    pub total: Money,

    pub payment_method: PaymentMethod,
    pub amount_received: Money,
    pub change: Money,

    pub cashier_id: String,
    pub cashier_name: String,
    pub timestamp: DateTime<Utc>,

    /// Optional customer label for the receipt.
    pub customer: Option<String>,
}

impl Sale {
    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Stock Adjustment
// =============================================================================

/// Direction of a manual stock adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentType {
    Add,
    Remove,
}

/// An audited manual stock change, outside of any sale.
///
/// Append-only: adjustments are never mutated or deleted, regardless
/// of whether the remove direction was clamped at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustment {
    pub id: String,
    pub product_id: String,
    /// Product name at adjustment time, for audit display.
    pub product_name: String,
    pub adjustment_type: AdjustmentType,
    /// Requested quantity, which may exceed what the clamp applied.
    pub quantity: i64,
    pub reason: String,
    /// Acting user.
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Held Transaction
// =============================================================================

/// A parked cart awaiting resumption.
///
/// Lifecycle: created from a non-empty cart; destroyed exactly once on
/// retrieval (removal and return of the items are one atomic step, so a
/// held transaction can never be restored twice). No expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeldTransaction {
    pub id: String,
    pub items: Vec<CartItem>,
    pub timestamp: DateTime<Utc>,
    pub note: Option<String>,
}

// =============================================================================
// User
// =============================================================================

/// Account role. Admin implicitly satisfies any role requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Cashier,
}

impl Role {
    /// Role check used by route/action guards: exact match, except
    /// admin passes every requirement.
    #[inline]
    pub fn satisfies(&self, required: Role) -> bool {
        *self == Role::Admin || *self == required
    }
}

/// A POS account.
///
/// The password is stored in plaintext. That is a faithful carry-over
/// of the system being reimplemented and is a known weakness, not a
/// design to copy elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Unique case-insensitively; login matching is case-sensitive.
    pub username: String,
    pub password: String,
    pub role: Role,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    /// Inactive users cannot log in but remain in the list.
    pub is_active: bool,
}

/// Partial user update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub full_name: Option<String>,
    pub is_active: Option<bool>,
}

// =============================================================================
// Business Settings
// =============================================================================

/// Singleton store configuration, mutated wholesale via merge-update.
/// No history is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSettings {
    pub business_name: String,
    pub address: String,
    /// Taxpayer Identification Number.
    pub tin: String,
    pub bir_permit_number: String,
    pub contact_number: String,
    pub email: Option<String>,
    pub receipt_footer: String,
    pub vat_enabled: bool,
    pub vat_rate: VatRate,
}

impl Default for BusinessSettings {
    fn default() -> Self {
        BusinessSettings {
            business_name: "Sari-Sari Store POS".to_string(),
            address: "123 Barangay Street, Manila, Philippines".to_string(),
            tin: "123-456-789-000".to_string(),
            bir_permit_number: "FP-12345678".to_string(),
            contact_number: "+63 912 345 6789".to_string(),
            email: Some("store@example.com".to_string()),
            receipt_footer: "Salamat sa inyong pagbili!".to_string(),
            vat_enabled: true,
            vat_rate: VatRate::philippine(),
        }
    }
}

impl BusinessSettings {
    /// The rate used for VAT reporting: zero when VAT is disabled.
    pub fn effective_vat_rate(&self) -> VatRate {
        if self.vat_enabled {
            self.vat_rate
        } else {
            VatRate::from_bps(0)
        }
    }
}

/// Partial settings update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub business_name: Option<String>,
    pub address: Option<String>,
    pub tin: Option<String>,
    pub bir_permit_number: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<Option<String>>,
    pub receipt_footer: Option<String>,
    pub vat_enabled: Option<bool>,
    pub vat_rate: Option<VatRate>,
}

// =============================================================================
// Daily Sales Rollup
// =============================================================================

/// Per-day reporting rollup. Derived from the sales ledger on demand,
/// never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    /// Local calendar day, `YYYY-MM-DD`.
    pub date: String,
    pub total_sales: Money,
    pub total_transactions: usize,
    pub vat_collected: Money,
    pub cash_sales: Money,
    pub digital_sales: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
