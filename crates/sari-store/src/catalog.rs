//! # Catalog Store
//!
//! Products, categories, and the stock-adjustment audit trail.
//!
//! ## Referential Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Category ◄──── Product.category (string reference)                     │
//! │                                                                         │
//! │  • delete category  → REJECTED while any product references it          │
//! │  • rename category  → cascades into every referencing product           │
//! │  • delete product   → unconditional (sales embed value-copies,          │
//! │                       so history is unaffected)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Clamp Policy
//! Removing more stock than available never errors and never goes
//! negative: the level is clamped at zero. This applies to manual
//! adjustments and to sale decrements alike. The audit record keeps
//! the REQUESTED quantity either way.

use std::sync::Arc;

use chrono::Utc;
use sari_core::validation::{
    validate_adjustment_reason, validate_barcode, validate_category_name, validate_price,
    validate_product_name, validate_quantity, validate_stock,
};
use sari_core::{
    AdjustmentType, CartItem, CoreError, NewProduct, Product, ProductUpdate, StockAdjustment,
    LOW_STOCK_THRESHOLD,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::kv::{keys, load_or, save, KvStore};

/// Categories seeded on first load, before the store has ever been
/// written.
const DEFAULT_CATEGORIES: &[&str] = &[
    "Beverages",
    "Snacks",
    "Instant Noodles",
    "Seasonings",
    "Personal Care",
    "Household",
    "Canned Goods",
    "Dairy",
    "Frozen",
    "Others",
];

/// The product catalog, category list, and inventory ledger.
///
/// All three collections live here because they mutate together:
/// category renames cascade into products, and stock adjustments touch
/// a product and append an audit record in one step.
pub struct Catalog {
    kv: Arc<dyn KvStore>,
    products: Vec<Product>,
    categories: Vec<String>,
    adjustments: Vec<StockAdjustment>,
}

impl Catalog {
    /// Loads the catalog from the store, seeding the default category
    /// list when the key has never been written.
    pub fn load(kv: Arc<dyn KvStore>) -> StoreResult<Self> {
        let products = load_or(kv.as_ref(), keys::PRODUCTS, Vec::new)?;
        let categories = load_or(kv.as_ref(), keys::CATEGORIES, || {
            DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
        })?;
        let adjustments = load_or(kv.as_ref(), keys::STOCK_ADJUSTMENTS, Vec::new)?;

        Ok(Catalog {
            kv,
            products,
            categories,
            adjustments,
        })
    }

    fn persist_products(&self) -> StoreResult<()> {
        save(self.kv.as_ref(), keys::PRODUCTS, &self.products)
    }

    fn persist_categories(&self) -> StoreResult<()> {
        save(self.kv.as_ref(), keys::CATEGORIES, &self.categories)
    }

    fn persist_adjustments(&self) -> StoreResult<()> {
        save(self.kv.as_ref(), keys::STOCK_ADJUSTMENTS, &self.adjustments)
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Exact barcode lookup, the scanner fast path.
    pub fn product_by_barcode(&self, barcode: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.barcode.as_deref() == Some(barcode))
    }

    /// Adds a product, assigning its id and timestamps.
    ///
    /// Rejected when the name is blank, the price is not strictly
    /// positive, the stock is negative, or the barcode is malformed.
    pub fn add_product(&mut self, new: NewProduct) -> StoreResult<Product> {
        validate_product_name(&new.name)?;
        validate_price(new.price)?;
        validate_stock(new.stock)?;
        if let Some(barcode) = &new.barcode {
            validate_barcode(barcode)?;
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            category: new.category,
            price: new.price,
            cost: new.cost,
            stock: new.stock,
            barcode: new.barcode,
            description: new.description,
            created_at: now,
            updated_at: now,
        };

        self.products.push(product.clone());
        self.persist_products()?;
        info!(id = %product.id, name = %product.name, "Product added");
        Ok(product)
    }

    /// Merges a partial update into a product and bumps `updated_at`.
    pub fn update_product(&mut self, id: &str, update: ProductUpdate) -> StoreResult<Product> {
        if let Some(name) = &update.name {
            validate_product_name(name)?;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
        }
        if let Some(stock) = update.stock {
            validate_stock(stock)?;
        }
        if let Some(Some(barcode)) = &update.barcode {
            validate_barcode(barcode)?;
        }

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(category) = update.category {
            product.category = category;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(cost) = update.cost {
            product.cost = cost;
        }
        if let Some(stock) = update.stock {
            product.stock = stock;
        }
        if let Some(barcode) = update.barcode {
            product.barcode = barcode;
        }
        if let Some(description) = update.description {
            product.description = description;
        }
        product.updated_at = Utc::now();

        let updated = product.clone();
        self.persist_products()?;
        debug!(id, "Product updated");
        Ok(updated)
    }

    /// Removes a product. Unconditional: completed sales embed their
    /// own product snapshots and are unaffected.
    pub fn delete_product(&mut self, id: &str) -> StoreResult<()> {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.products.len() == before {
            return Err(StoreError::not_found("Product", id));
        }
        self.persist_products()?;
        info!(id, "Product deleted");
        Ok(())
    }

    /// Case-insensitive substring search over name and category, plus
    /// raw substring match on the barcode. A blank query returns the
    /// whole catalog.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let raw = query.trim();
        let q = raw.to_lowercase();
        if q.is_empty() {
            return self.products.iter().collect();
        }

        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&q)
                    || p.category.to_lowercase().contains(&q)
                    || p.barcode.as_deref().is_some_and(|b| b.contains(raw))
            })
            .collect()
    }

    /// Products with `0 < stock <= threshold`.
    pub fn low_stock(&self, threshold: i64) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_low_stock(threshold))
            .collect()
    }

    /// Products with `0 < stock <= LOW_STOCK_THRESHOLD`.
    pub fn low_stock_default(&self) -> Vec<&Product> {
        self.low_stock(LOW_STOCK_THRESHOLD)
    }

    /// Products with zero stock.
    pub fn out_of_stock(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_out_of_stock())
            .collect()
    }

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Adds a category. The name is trimmed; blank or duplicate
    /// (exact-compare) names are rejected.
    pub fn add_category(&mut self, name: &str) -> StoreResult<String> {
        let name = validate_category_name(name)?;
        if self.categories.contains(&name) {
            return Err(CoreError::DuplicateCategory(name).into());
        }

        self.categories.push(name.clone());
        self.persist_categories()?;
        info!(category = %name, "Category added");
        Ok(name)
    }

    /// Renames a category and cascades the new name into every product
    /// that referenced the old one, bumping their `updated_at`.
    pub fn rename_category(&mut self, old: &str, new: &str) -> StoreResult<()> {
        let new = validate_category_name(new)?;
        if self.categories.contains(&new) {
            return Err(CoreError::DuplicateCategory(new).into());
        }
        let slot = self
            .categories
            .iter_mut()
            .find(|c| *c == old)
            .ok_or_else(|| StoreError::not_found("Category", old))?;
        *slot = new.clone();

        let now = Utc::now();
        let mut cascaded = 0usize;
        for product in self.products.iter_mut().filter(|p| p.category == old) {
            product.category = new.clone();
            product.updated_at = now;
            cascaded += 1;
        }

        self.persist_categories()?;
        if cascaded > 0 {
            self.persist_products()?;
        }
        info!(old, new = %new, cascaded, "Category renamed");
        Ok(())
    }

    /// Removes a category, provided no product still references it.
    pub fn delete_category(&mut self, name: &str) -> StoreResult<()> {
        if !self.categories.iter().any(|c| c == name) {
            return Err(StoreError::not_found("Category", name));
        }
        let product_count = self.products.iter().filter(|p| p.category == name).count();
        if product_count > 0 {
            return Err(CoreError::CategoryInUse {
                category: name.to_string(),
                product_count,
            }
            .into());
        }

        self.categories.retain(|c| c != name);
        self.persist_categories()?;
        info!(category = name, "Category deleted");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Inventory Ledger
    // -------------------------------------------------------------------------

    /// The full audit trail, oldest first.
    pub fn adjustments(&self) -> &[StockAdjustment] {
        &self.adjustments
    }

    /// Applies a manual stock adjustment and appends its audit record.
    ///
    /// `Add` increases stock without bound. `Remove` clamps at zero:
    /// removing more than available silently zeroes the stock, it does
    /// not fail. One `StockAdjustment` is appended per call regardless
    /// of direction or clamping.
    pub fn adjust_stock(
        &mut self,
        product_id: &str,
        quantity: i64,
        adjustment_type: AdjustmentType,
        reason: &str,
        user_id: &str,
    ) -> StoreResult<StockAdjustment> {
        validate_quantity(quantity)?;
        validate_adjustment_reason(reason)?;

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| StoreError::not_found("Product", product_id))?;

        product.stock = match adjustment_type {
            AdjustmentType::Add => product.stock + quantity,
            AdjustmentType::Remove => (product.stock - quantity).max(0),
        };
        product.updated_at = Utc::now();

        let adjustment = StockAdjustment {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            product_name: product.name.clone(),
            adjustment_type,
            quantity,
            reason: reason.to_string(),
            user_id: user_id.to_string(),
            timestamp: Utc::now(),
        };
        let new_stock = product.stock;

        self.adjustments.push(adjustment.clone());
        self.persist_products()?;
        self.persist_adjustments()?;
        info!(
            product_id,
            ?adjustment_type,
            quantity,
            new_stock,
            "Stock adjusted"
        );
        Ok(adjustment)
    }

    /// Decrements stock for a completed sale, clamping at zero.
    ///
    /// No audit record is appended: the sale itself is the record. A
    /// line whose product has since been deleted is skipped, since
    /// there is no stock left to decrement.
    pub(crate) fn apply_sale_items(&mut self, items: &[CartItem]) -> StoreResult<()> {
        for item in items {
            if let Some(product) = self.products.iter_mut().find(|p| p.id == item.product_id) {
                product.stock = (product.stock - item.quantity).max(0);
                product.updated_at = Utc::now();
            }
        }
        self.persist_products()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use sari_core::Money;

    fn catalog() -> Catalog {
        Catalog::load(Arc::new(MemoryStore::new())).unwrap()
    }

    fn new_product(name: &str, category: &str, price: i64, stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: category.to_string(),
            price: Money::from_centavos(price),
            cost: None,
            stock,
            barcode: None,
            description: None,
        }
    }

    #[test]
    fn test_add_product_assigns_identity() {
        let mut cat = catalog();
        let p = cat
            .add_product(new_product("Coca-Cola 350ml", "Beverages", 2500, 50))
            .unwrap();
        assert!(!p.id.is_empty());
        assert_eq!(cat.products().len(), 1);
        assert_eq!(cat.get(&p.id).unwrap().name, "Coca-Cola 350ml");
    }

    #[test]
    fn test_add_product_rejects_non_positive_price() {
        let mut cat = catalog();
        assert!(cat
            .add_product(new_product("Free Stuff", "Others", 0, 10))
            .is_err());
        assert!(cat
            .add_product(new_product("Negative", "Others", -100, 10))
            .is_err());
        assert!(cat.products().is_empty());
    }

    #[test]
    fn test_update_product_merges_and_bumps_timestamp() {
        let mut cat = catalog();
        let p = cat
            .add_product(new_product("Piattos", "Snacks", 1800, 30))
            .unwrap();

        let updated = cat
            .update_product(
                &p.id,
                ProductUpdate {
                    price: Some(Money::from_centavos(2000)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.price.centavos(), 2000);
        assert_eq!(updated.name, "Piattos"); // untouched
        assert!(updated.updated_at >= p.updated_at);
    }

    #[test]
    fn test_update_unknown_product_is_not_found() {
        let mut cat = catalog();
        let err = cat
            .update_product("missing", ProductUpdate::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_delete_product() {
        let mut cat = catalog();
        let p = cat
            .add_product(new_product("Piattos", "Snacks", 1800, 30))
            .unwrap();
        cat.delete_product(&p.id).unwrap();
        assert!(cat.products().is_empty());
        assert!(matches!(
            cat.delete_product(&p.id),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_search_matches_name_category_and_barcode() {
        let mut cat = catalog();
        let mut coke = new_product("Coca-Cola 350ml", "Beverages", 2500, 50);
        coke.barcode = Some("4902102119825".to_string());
        cat.add_product(coke).unwrap();
        cat.add_product(new_product("Piattos", "Snacks", 1800, 30))
            .unwrap();

        assert_eq!(cat.search("coca").len(), 1);
        assert_eq!(cat.search("beverages").len(), 1);
        assert_eq!(cat.search("490210").len(), 1); // partial barcode
        assert_eq!(cat.search("").len(), 2); // blank returns everything
        assert_eq!(cat.search("sardinas").len(), 0);
    }

    #[test]
    fn test_barcode_lookup_is_exact() {
        let mut cat = catalog();
        let mut coke = new_product("Coca-Cola 350ml", "Beverages", 2500, 50);
        coke.barcode = Some("4902102119825".to_string());
        let p = cat.add_product(coke).unwrap();

        assert_eq!(cat.product_by_barcode("4902102119825").unwrap().id, p.id);
        assert!(cat.product_by_barcode("490210").is_none());
    }

    #[test]
    fn test_low_and_out_of_stock_subsets() {
        let mut cat = catalog();
        cat.add_product(new_product("A", "Others", 100, 0)).unwrap();
        cat.add_product(new_product("B", "Others", 100, 5)).unwrap();
        cat.add_product(new_product("C", "Others", 100, 10))
            .unwrap();
        cat.add_product(new_product("D", "Others", 100, 11))
            .unwrap();

        let low: Vec<&str> = cat
            .low_stock_default()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(low, vec!["B", "C"]);

        let out: Vec<&str> = cat.out_of_stock().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(out, vec!["A"]);
    }

    #[test]
    fn test_category_add_rejects_blank_and_duplicate() {
        let mut cat = catalog();
        assert!(cat.add_category("  ").is_err());
        cat.add_category("Ice Candy").unwrap();
        assert!(matches!(
            cat.add_category("Ice Candy"),
            Err(StoreError::Core(CoreError::DuplicateCategory(_)))
        ));
        // Trimmed before the duplicate check.
        assert!(cat.add_category("  Ice Candy  ").is_err());
    }

    #[test]
    fn test_rename_category_cascades_to_products() {
        let mut cat = catalog();
        cat.add_product(new_product("Lucky Me Pancit Canton", "Instant Noodles", 1500, 40))
            .unwrap();
        cat.add_product(new_product("Coca-Cola 350ml", "Beverages", 2500, 50))
            .unwrap();

        cat.rename_category("Instant Noodles", "Noodles").unwrap();

        assert!(cat.categories().contains(&"Noodles".to_string()));
        assert!(!cat.categories().contains(&"Instant Noodles".to_string()));
        assert!(cat.products().iter().all(|p| p.category != "Instant Noodles"));
        assert_eq!(
            cat.products()
                .iter()
                .filter(|p| p.category == "Noodles")
                .count(),
            1
        );
    }

    #[test]
    fn test_delete_category_guarded_by_references() {
        let mut cat = catalog();
        cat.add_product(new_product("Coca-Cola 350ml", "Beverages", 2500, 50))
            .unwrap();

        let err = cat.delete_category("Beverages").unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::CategoryInUse { .. })
        ));
        // List unchanged after the failed delete.
        assert!(cat.categories().contains(&"Beverages".to_string()));

        // Unreferenced categories delete fine.
        cat.delete_category("Frozen").unwrap();
        assert!(!cat.categories().contains(&"Frozen".to_string()));
    }

    #[test]
    fn test_adjust_stock_add_and_remove() {
        let mut cat = catalog();
        let p = cat
            .add_product(new_product("Coca-Cola 350ml", "Beverages", 2500, 10))
            .unwrap();

        cat.adjust_stock(&p.id, 5, AdjustmentType::Add, "delivery", "u1")
            .unwrap();
        assert_eq!(cat.get(&p.id).unwrap().stock, 15);

        cat.adjust_stock(&p.id, 5, AdjustmentType::Remove, "breakage", "u1")
            .unwrap();
        assert_eq!(cat.get(&p.id).unwrap().stock, 10);
        assert_eq!(cat.adjustments().len(), 2);
    }

    #[test]
    fn test_adjust_stock_remove_clamps_at_zero() {
        let mut cat = catalog();
        let p = cat
            .add_product(new_product("Coca-Cola 350ml", "Beverages", 2500, 3))
            .unwrap();

        // Removing more than available zeroes the stock, no error.
        let adj = cat
            .adjust_stock(&p.id, 99, AdjustmentType::Remove, "spoilage", "u1")
            .unwrap();
        assert_eq!(cat.get(&p.id).unwrap().stock, 0);
        // The audit record keeps the requested quantity.
        assert_eq!(adj.quantity, 99);
    }

    #[test]
    fn test_adjust_stock_round_trip() {
        let mut cat = catalog();
        let p = cat
            .add_product(new_product("Coca-Cola 350ml", "Beverages", 2500, 20))
            .unwrap();

        cat.adjust_stock(&p.id, 7, AdjustmentType::Add, "delivery", "u1")
            .unwrap();
        cat.adjust_stock(&p.id, 7, AdjustmentType::Remove, "recount", "u1")
            .unwrap();
        assert_eq!(cat.get(&p.id).unwrap().stock, 20);
    }

    #[test]
    fn test_adjust_stock_requires_reason_and_quantity() {
        let mut cat = catalog();
        let p = cat
            .add_product(new_product("Coca-Cola 350ml", "Beverages", 2500, 20))
            .unwrap();

        assert!(cat
            .adjust_stock(&p.id, 0, AdjustmentType::Add, "x", "u1")
            .is_err());
        assert!(cat
            .adjust_stock(&p.id, 1, AdjustmentType::Add, "  ", "u1")
            .is_err());
        assert!(cat.adjustments().is_empty());
    }

    #[test]
    fn test_catalog_persists_across_reload() {
        let kv = Arc::new(MemoryStore::new());
        let mut cat = Catalog::load(kv.clone()).unwrap();
        let p = cat
            .add_product(new_product("Coca-Cola 350ml", "Beverages", 2500, 50))
            .unwrap();
        cat.add_category("Ice Candy").unwrap();

        let reloaded = Catalog::load(kv).unwrap();
        assert_eq!(reloaded.products().len(), 1);
        assert_eq!(reloaded.get(&p.id).unwrap().price.centavos(), 2500);
        assert!(reloaded.categories().contains(&"Ice Candy".to_string()));
    }
}
