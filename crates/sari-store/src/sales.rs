//! # Sales Ledger
//!
//! Append-only record of completed sales (and returns, which are sales
//! with negated amounts). Nothing here is ever updated or deleted;
//! reporting reads the ledger as-is.

use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};
use sari_core::reporting::{self, ProductSales};
use sari_core::{DailySales, Money, Sale};
use tracing::info;

use crate::error::StoreResult;
use crate::kv::{keys, load_or, save, KvStore};

/// The completed-sale history, oldest first.
pub struct SalesLedger {
    kv: Arc<dyn KvStore>,
    sales: Vec<Sale>,
}

impl SalesLedger {
    pub fn load(kv: Arc<dyn KvStore>) -> StoreResult<Self> {
        let sales = load_or(kv.as_ref(), keys::SALES, Vec::new)?;
        Ok(SalesLedger { kv, sales })
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn get(&self, id: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    /// Appends a completed sale and persists the ledger.
    pub fn record(&mut self, sale: Sale) -> StoreResult<()> {
        info!(
            receipt = %sale.receipt_number,
            total = %sale.total,
            method = sale.payment_method.label(),
            "Sale recorded"
        );
        self.sales.push(sale);
        save(self.kv.as_ref(), keys::SALES, &self.sales)
    }

    // -------------------------------------------------------------------------
    // Reporting views
    // -------------------------------------------------------------------------

    /// Sales whose timestamp falls on the local calendar day containing
    /// the current moment.
    pub fn today(&self) -> Vec<&Sale> {
        reporting::today_sales(&self.sales)
    }

    /// Sales on a specific local calendar day.
    pub fn on(&self, date: NaiveDate) -> Vec<&Sale> {
        reporting::sales_on(&self.sales, date)
    }

    /// Sales across an inclusive range of local calendar days.
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Sale> {
        reporting::sales_in_range(&self.sales, start, end)
    }

    /// Total revenue for the current local calendar day.
    pub fn today_total(&self) -> Money {
        reporting::daily_total(&self.sales, Local::now().date_naive())
    }

    /// Revenue for the given local month (1-based).
    pub fn monthly_revenue(&self, year: i32, month: u32) -> Money {
        reporting::monthly_revenue(&self.sales, year, month)
    }

    /// Single-day breakdown for a local calendar day.
    pub fn summary_for(&self, date: NaiveDate) -> DailySales {
        reporting::daily_summary(&self.sales, date)
    }

    /// Per-day breakdowns for the last `days` local calendar days
    /// ending today, most recent first. Days without sales are
    /// omitted.
    pub fn recent_daily_summaries(&self, days: usize) -> Vec<DailySales> {
        let today = Local::now().date_naive();
        (0..days as i64)
            .filter_map(|back| {
                let date = today - Duration::days(back);
                let summary = reporting::daily_summary(&self.sales, date);
                (summary.total_transactions > 0).then_some(summary)
            })
            .collect()
    }

    /// Best sellers by quantity, aggregated across the whole ledger.
    pub fn top_selling(&self, limit: usize) -> Vec<ProductSales> {
        reporting::top_selling_products(&self.sales, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use chrono::Utc;
    use sari_core::{DiscountType, PaymentMethod};

    fn sale(id: &str, total: i64) -> Sale {
        Sale {
            id: id.to_string(),
            receipt_number: format!("260829-{id:0>6}"),
            items: Vec::new(),
            subtotal: Money::from_centavos(total),
            discount: Money::zero(),
            discount_type: DiscountType::Percentage,
            vat_amount: Money::zero(),
            total: Money::from_centavos(total),
            payment_method: PaymentMethod::Cash,
            amount_received: Money::from_centavos(total),
            change: Money::zero(),
            cashier_id: "u1".to_string(),
            cashier_name: "Admin".to_string(),
            timestamp: Utc::now(),
            customer: None,
        }
    }

    #[test]
    fn test_record_appends_in_order() {
        let mut ledger = SalesLedger::load(Arc::new(MemoryStore::new())).unwrap();
        ledger.record(sale("1", 2500)).unwrap();
        ledger.record(sale("2", 1500)).unwrap();

        assert_eq!(ledger.sales().len(), 2);
        assert_eq!(ledger.sales()[0].id, "1");
        assert_eq!(ledger.get("2").unwrap().total.centavos(), 1500);
    }

    #[test]
    fn test_ledger_persists_across_reload() {
        let kv = Arc::new(MemoryStore::new());
        let mut ledger = SalesLedger::load(kv.clone()).unwrap();
        ledger.record(sale("1", 2500)).unwrap();

        let reloaded = SalesLedger::load(kv).unwrap();
        assert_eq!(reloaded.sales().len(), 1);
        assert_eq!(reloaded.today_total().centavos(), 2500);
    }
}
