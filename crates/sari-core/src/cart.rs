//! # Cart Module
//!
//! The in-progress transaction: an ordered list of frozen line items
//! plus discount and payment selections.
//!
//! ## Checkout Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Totals Pipeline                               │
//! │                                                                         │
//! │  subtotal        = Σ item.subtotal          (frozen at add time)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  discount_amount = percentage: subtotal × pct      (NOT clamped)        │
//! │                    fixed:      min(fixed, subtotal)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total           = max(₱0, subtotal - discount_amount)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  vat             = VAT component of total   (inclusive, informational)  │
//! │  change          = max(₱0, received - total)       (cash only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every figure is recomputed on read; nothing is cached.
//!
//! ## Stock Validation
//! `add_item` and `set_quantity` validate against the LIVE product the
//! caller passes in, not the frozen snapshot. A merge that would push a
//! line past available stock is rejected in full, with no partial fill.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, VatRate};
use crate::types::{CartItem, DiscountType, PaymentMethod, Product};
use crate::validation::validate_quantity;

// =============================================================================
// Discount
// =============================================================================

/// A discount selection, applied to the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Discount {
    /// Percentage in basis points (1000 = 10%). Values above 100% are
    /// honored as entered; the total is clamped at zero, the discount
    /// amount is not.
    Percentage(u32),
    /// Fixed peso amount, capped at the subtotal.
    Fixed(Money),
}

impl Discount {
    /// No discount.
    pub const fn none() -> Self {
        Discount::Percentage(0)
    }

    /// The peso amount this discount takes off a given subtotal.
    pub fn amount_off(&self, subtotal: Money) -> Money {
        match *self {
            Discount::Percentage(bps) => subtotal.percentage_of(bps),
            Discount::Fixed(amount) => amount.min(subtotal),
        }
    }

    /// The discount type recorded on the resulting sale.
    pub fn kind(&self) -> DiscountType {
        match self {
            Discount::Percentage(_) => DiscountType::Percentage,
            Discount::Fixed(_) => DiscountType::Fixed,
        }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::none()
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The current cart.
///
/// ## Invariants
/// - Lines are unique by `product_id`; adding an existing product merges
/// - Quantities are always >= 1 (quantity zero removes the line)
/// - Insertion order is display order and survives into the sale
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    pub discount: Discount,
    pub payment_method: PaymentMethod,
    /// Cash tendered. Ignored for digital methods, which settle at the
    /// exact total.
    pub amount_received: Option<Money>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// The cart lines, in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Adds a product, merging into an existing line when present.
    ///
    /// The merged quantity is validated against `product.stock` before
    /// anything is committed: an over-stock merge leaves the cart
    /// completely unchanged.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if let Some(line) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            let merged = line.quantity + quantity;
            if product.stock < merged {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.stock,
                    requested: merged,
                });
            }
            line.set_quantity(merged);
            return Ok(());
        }

        if product.stock < quantity {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        self.items.push(CartItem::from_product(product, quantity));
        Ok(())
    }

    /// Sets a line's quantity. Zero or negative removes the line;
    /// otherwise the new quantity is re-validated against live stock.
    pub fn set_quantity(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            self.remove_item(&product.id);
            return Ok(());
        }

        if product.stock < quantity {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(line) => {
                line.set_quantity(quantity);
                Ok(())
            }
            None => Err(CoreError::ProductNotInCart(product.id.clone())),
        }
    }

    /// Removes a line. Unconditional: removing an absent product is a
    /// no-op.
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Empties the cart and resets discount and payment selections.
    pub fn clear(&mut self) {
        self.items.clear();
        self.discount = Discount::none();
        self.payment_method = PaymentMethod::Cash;
        self.amount_received = None;
    }

    /// Replaces the cart contents with previously held items. Discount
    /// and payment selections reset; they were never part of the hold.
    pub fn restore(&mut self, items: Vec<CartItem>) {
        self.clear();
        self.items = items;
    }

    /// Hands the items over for holding or checkout, leaving the cart
    /// empty.
    pub fn take_items(&mut self) -> Vec<CartItem> {
        let items = std::mem::take(&mut self.items);
        self.clear();
        items
    }

    // -------------------------------------------------------------------------
    // Totals (pure functions of current state, recomputed on every read)
    // -------------------------------------------------------------------------

    /// Sum of the frozen line subtotals.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|i| i.subtotal).sum()
    }

    /// Peso amount the current discount takes off.
    pub fn discount_amount(&self) -> Money {
        self.discount.amount_off(self.subtotal())
    }

    /// Amount due: `max(₱0, subtotal - discount)`.
    pub fn total(&self) -> Money {
        (self.subtotal() - self.discount_amount()).max(Money::zero())
    }

    /// VAT component of the (inclusive) total.
    pub fn vat(&self, rate: VatRate) -> Money {
        self.total().vat_component(rate)
    }

    /// What the customer effectively pays: the tendered cash, or the
    /// exact total for digital tender.
    pub fn received(&self) -> Money {
        match self.payment_method {
            PaymentMethod::Cash => self.amount_received.unwrap_or_else(Money::zero),
            _ => self.total(),
        }
    }

    /// Change due: `max(₱0, received - total)`. Always zero for digital
    /// tender.
    pub fn change(&self) -> Money {
        match self.payment_method {
            PaymentMethod::Cash => (self.received() - self.total()).max(Money::zero()),
            _ => Money::zero(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
