//! # POS Facade
//!
//! The single entry point a terminal front-end drives. Owns every
//! collection store plus the active cart, and orchestrates the flows
//! that cross them:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                              Pos                                 │
//! │                                                                  │
//! │   cart ──checkout──► catalog (stock decrement)                   │
//! │                  └─► sales   (ledger append)                     │
//! │   cart ◄─retrieve─── held                                        │
//! │   checkout gated by  users   (session)                           │
//! │   VAT rate from      settings                                    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checkout validates everything up front and only then mutates, so a
//! rejected checkout leaves cart, stock, and ledger untouched.

use std::sync::Arc;

use chrono::Utc;
use sari_core::{receipt, CoreError, HeldTransaction, Money, Sale};
use tracing::info;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::error::{StoreError, StoreResult};
use crate::held::HeldQueue;
use crate::kv::KvStore;
use crate::sales::SalesLedger;
use crate::settings::SettingsStore;
use crate::users::UserStore;

pub struct Pos {
    pub catalog: Catalog,
    pub sales: SalesLedger,
    pub held: HeldQueue,
    pub users: UserStore,
    pub settings: SettingsStore,
    pub cart: sari_core::Cart,
}

impl Pos {
    /// Opens every store over the shared key-value backend.
    pub fn open(kv: Arc<dyn KvStore>) -> StoreResult<Self> {
        Ok(Pos {
            catalog: Catalog::load(kv.clone())?,
            sales: SalesLedger::load(kv.clone())?,
            held: HeldQueue::load(kv.clone())?,
            users: UserStore::load(kv.clone())?,
            settings: SettingsStore::load(kv)?,
            cart: sari_core::Cart::new(),
        })
    }

    // -------------------------------------------------------------------------
    // Cart operations (catalog-aware)
    // -------------------------------------------------------------------------

    /// Adds a catalog product to the cart, merging with an existing
    /// line and validating the merged quantity against live stock.
    pub fn add_to_cart(&mut self, product_id: &str, quantity: i64) -> StoreResult<()> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| StoreError::not_found("Product", product_id))?
            .clone();
        self.cart.add_item(&product, quantity)?;
        Ok(())
    }

    /// Sets a cart line to an absolute quantity. Zero and below
    /// removes the line.
    pub fn update_cart_quantity(&mut self, product_id: &str, quantity: i64) -> StoreResult<()> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| StoreError::not_found("Product", product_id))?
            .clone();
        self.cart.set_quantity(&product, quantity)?;
        Ok(())
    }

    pub fn remove_from_cart(&mut self, product_id: &str) {
        self.cart.remove_item(product_id);
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Completes the sale in the cart.
    ///
    /// Preconditions, checked in order before anything mutates: a user
    /// is logged in, the cart is non-empty, and the received amount
    /// covers the total. On success the sale is appended to the
    /// ledger, stock is decremented (clamped at zero), and the cart is
    /// reset.
    pub fn checkout(&mut self, customer: Option<String>) -> StoreResult<Sale> {
        let cashier = self
            .users
            .current_user()
            .ok_or(CoreError::NotLoggedIn)?
            .clone();
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let total = self.cart.total();
        let received = self.cart.received();
        if received < total {
            return Err(CoreError::InsufficientPayment { total, received }.into());
        }

        let vat_rate = self.settings.settings().effective_vat_rate();
        let now = Utc::now();
        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            receipt_number: receipt_number_at(now),
            items: self.cart.items().to_vec(),
            subtotal: self.cart.subtotal(),
            discount: self.cart.discount_amount(),
            discount_type: self.cart.discount.kind(),
            vat_amount: self.cart.vat(vat_rate),
            total,
            payment_method: self.cart.payment_method,
            amount_received: received,
            change: self.cart.change(),
            cashier_id: cashier.id,
            cashier_name: cashier.full_name,
            timestamp: now,
            customer,
        };

        self.catalog.apply_sale_items(&sale.items)?;
        self.sales.record(sale.clone())?;
        self.cart.clear();
        Ok(sale)
    }

    // -------------------------------------------------------------------------
    // Hold / resume
    // -------------------------------------------------------------------------

    /// Parks the current cart lines and resets the cart. Discount and
    /// payment selections are not held, only the lines.
    pub fn hold_cart(&mut self, note: Option<String>) -> StoreResult<HeldTransaction> {
        let items = self.cart.take_items();
        self.held.hold(items, note)
    }

    /// Restores a held transaction into the cart. Refused while the
    /// cart still has lines, so nothing is silently overwritten.
    pub fn retrieve_held(&mut self, id: &str) -> StoreResult<()> {
        if !self.cart.is_empty() {
            return Err(CoreError::CartNotEmpty.into());
        }
        let held = self.held.retrieve(id)?;
        self.cart.restore(held.items);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Returns
    // -------------------------------------------------------------------------

    /// Records a full return of a past sale as a new ledger entry with
    /// every amount negated, so reporting nets out naturally.
    ///
    /// Stock is NOT restored; returned goods go back to the shelf via
    /// a manual stock adjustment if they are resellable.
    pub fn process_return(&mut self, sale_id: &str) -> StoreResult<Sale> {
        let cashier = self
            .users
            .current_user()
            .ok_or(CoreError::NotLoggedIn)?
            .clone();
        let original = self
            .sales
            .get(sale_id)
            .ok_or_else(|| StoreError::not_found("Sale", sale_id))?
            .clone();

        let now = Utc::now();
        let refund = Sale {
            id: Uuid::new_v4().to_string(),
            receipt_number: receipt_number_at(now),
            items: original.items.clone(),
            subtotal: -original.subtotal,
            discount: -original.discount,
            discount_type: original.discount_type,
            vat_amount: -original.vat_amount,
            total: -original.total,
            payment_method: original.payment_method,
            amount_received: -original.total,
            change: Money::zero(),
            cashier_id: cashier.id,
            cashier_name: cashier.full_name,
            timestamp: now,
            customer: original.customer.clone(),
        };

        info!(original = %original.receipt_number, refund = %refund.receipt_number, "Return processed");
        self.sales.record(refund.clone())?;
        Ok(refund)
    }

    // -------------------------------------------------------------------------
    // Receipts
    // -------------------------------------------------------------------------

    /// Renders the printable receipt text for a recorded sale.
    pub fn receipt_text(&self, sale_id: &str) -> StoreResult<String> {
        let sale = self
            .sales
            .get(sale_id)
            .ok_or_else(|| StoreError::not_found("Sale", sale_id))?;
        Ok(receipt::render(sale, self.settings.settings()))
    }
}

/// `YYMMDD-` plus the six trailing digits of the millisecond
/// timestamp. Unique enough for one store's receipt roll.
fn receipt_number_at(at: chrono::DateTime<Utc>) -> String {
    format!(
        "{}-{:06}",
        at.format("%y%m%d"),
        at.timestamp_millis().rem_euclid(1_000_000)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use sari_core::{Discount, NewProduct, PaymentMethod};

    fn pos_with_product(price: i64, stock: i64) -> (Pos, String) {
        let mut pos = Pos::open(Arc::new(MemoryStore::new())).unwrap();
        pos.users.login("admin", "admin123").unwrap();
        let p = pos
            .catalog
            .add_product(NewProduct {
                name: "Coca-Cola 350ml".to_string(),
                category: "Beverages".to_string(),
                price: Money::from_centavos(price),
                cost: None,
                stock,
                barcode: None,
                description: None,
            })
            .unwrap();
        (pos, p.id)
    }

    #[test]
    fn test_receipt_number_shape() {
        let at = Utc::now();
        let number = receipt_number_at(at);
        assert_eq!(number.len(), 13);
        assert_eq!(&number[6..7], "-");
        assert!(number[7..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_checkout_requires_login() {
        let (mut pos, id) = pos_with_product(2500, 50);
        pos.add_to_cart(&id, 1).unwrap();
        pos.cart.amount_received = Some(Money::from_centavos(2500));
        pos.users.logout().unwrap();

        assert!(matches!(
            pos.checkout(None),
            Err(StoreError::Core(CoreError::NotLoggedIn))
        ));
    }

    #[test]
    fn test_checkout_rejects_empty_cart_and_short_payment() {
        let (mut pos, id) = pos_with_product(2500, 50);
        assert!(matches!(
            pos.checkout(None),
            Err(StoreError::Core(CoreError::EmptyCart))
        ));

        pos.add_to_cart(&id, 2).unwrap();
        pos.cart.amount_received = Some(Money::from_centavos(4000));
        let err = pos.checkout(None).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::InsufficientPayment { .. })
        ));
        // Nothing mutated by the rejection.
        assert_eq!(pos.cart.line_count(), 1);
        assert_eq!(pos.catalog.get(&id).unwrap().stock, 50);
        assert!(pos.sales.sales().is_empty());
    }

    #[test]
    fn test_checkout_happy_path() {
        let (mut pos, id) = pos_with_product(2500, 50);
        pos.add_to_cart(&id, 3).unwrap();
        pos.cart.discount = Discount::Percentage(1000); // 10%
        pos.cart.amount_received = Some(Money::from_centavos(10_000));

        let sale = pos.checkout(Some("Maria".to_string())).unwrap();

        assert_eq!(sale.subtotal.centavos(), 7500);
        assert_eq!(sale.discount.centavos(), 750);
        assert_eq!(sale.total.centavos(), 6750);
        assert_eq!(sale.vat_amount.centavos(), 723);
        assert_eq!(sale.change.centavos(), 3250);
        assert_eq!(sale.cashier_name, "Administrator");
        assert_eq!(sale.customer.as_deref(), Some("Maria"));

        assert_eq!(pos.catalog.get(&id).unwrap().stock, 47);
        assert_eq!(pos.sales.sales().len(), 1);
        assert!(pos.cart.is_empty());
    }

    #[test]
    fn test_digital_payment_settles_exactly() {
        let (mut pos, id) = pos_with_product(2500, 50);
        pos.add_to_cart(&id, 1).unwrap();
        pos.cart.payment_method = PaymentMethod::GCash;

        let sale = pos.checkout(None).unwrap();
        assert_eq!(sale.amount_received, sale.total);
        assert!(sale.change.is_zero());
    }

    #[test]
    fn test_hold_and_retrieve_round_trip() {
        let (mut pos, id) = pos_with_product(2500, 50);
        pos.add_to_cart(&id, 2).unwrap();
        let held = pos.hold_cart(Some("balik mamaya".to_string())).unwrap();
        assert!(pos.cart.is_empty());

        pos.retrieve_held(&held.id).unwrap();
        assert_eq!(pos.cart.total_quantity(), 2);

        // Exactly once.
        pos.clear_cart();
        assert!(pos.retrieve_held(&held.id).is_err());
    }

    #[test]
    fn test_hold_cart_drains_lines_and_selections() {
        let (mut pos, id) = pos_with_product(2500, 50);
        pos.add_to_cart(&id, 2).unwrap();
        pos.cart.discount = Discount::Percentage(500);
        pos.cart.amount_received = Some(Money::from_centavos(5000));

        pos.hold_cart(None).unwrap();
        assert!(pos.cart.is_empty());
        assert!(pos.cart.amount_received.is_none());
        assert!(pos.cart.discount_amount().is_zero());

        // Nothing left to hold.
        assert!(matches!(
            pos.hold_cart(None),
            Err(StoreError::Core(CoreError::EmptyCart))
        ));
    }

    #[test]
    fn test_retrieve_refused_over_nonempty_cart() {
        let (mut pos, id) = pos_with_product(2500, 50);
        pos.add_to_cart(&id, 1).unwrap();
        let held = pos.hold_cart(None).unwrap();

        pos.add_to_cart(&id, 1).unwrap();
        assert!(matches!(
            pos.retrieve_held(&held.id),
            Err(StoreError::Core(CoreError::CartNotEmpty))
        ));
        // Still parked after the refusal.
        assert_eq!(pos.held.held().len(), 1);
    }

    #[test]
    fn test_return_negates_without_restoring_stock() {
        let (mut pos, id) = pos_with_product(2500, 50);
        pos.add_to_cart(&id, 2).unwrap();
        pos.cart.amount_received = Some(Money::from_centavos(5000));
        let sale = pos.checkout(None).unwrap();
        assert_eq!(pos.catalog.get(&id).unwrap().stock, 48);

        let refund = pos.process_return(&sale.id).unwrap();
        assert_eq!(refund.total.centavos(), -5000);
        assert_eq!(refund.subtotal.centavos(), -5000);
        assert!(refund.change.is_zero());
        assert_ne!(refund.id, sale.id);

        // Ledger nets to zero; stock stays where the sale left it.
        assert_eq!(pos.sales.today_total().centavos(), 0);
        assert_eq!(pos.catalog.get(&id).unwrap().stock, 48);
    }

    #[test]
    fn test_receipt_text_for_recorded_sale() {
        let (mut pos, id) = pos_with_product(2500, 50);
        pos.add_to_cart(&id, 1).unwrap();
        pos.cart.amount_received = Some(Money::from_centavos(2500));
        let sale = pos.checkout(None).unwrap();

        let text = pos.receipt_text(&sale.id).unwrap();
        assert!(text.contains("Sari-Sari Store POS"));
        assert!(text.contains(&sale.receipt_number));
        assert!(pos.receipt_text("missing").is_err());
    }
}
