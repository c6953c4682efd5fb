//! # Reporting
//!
//! Read-only aggregations over the sales ledger. Everything here is
//! derived on demand from `&[Sale]`; nothing is stored.
//!
//! ## Calendar Days, Not 24-Hour Windows
//! Daily filters compare the sale's LOCAL calendar day against the
//! requested date. A sale at 23:59 and one at 00:01 the next day land
//! in different buckets even though they are two minutes apart.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{DailySales, Sale};

/// One row of the top-selling-products report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product: String,
    pub quantity: i64,
    pub revenue: Money,
}

/// Aggregates sold quantities and revenue per product NAME and returns
/// the top `limit` rows by quantity.
///
/// Aggregation is by display name, not product id: two distinct
/// products that share a name are merged into one row. That matches
/// the system being reimplemented; treat it as a reporting caveat.
///
/// Sorting is stable, descending by quantity; ties keep first-seen
/// order.
pub fn top_selling_products(sales: &[Sale], limit: usize) -> Vec<ProductSales> {
    let mut rows: Vec<ProductSales> = Vec::new();

    for sale in sales {
        for item in &sale.items {
            match rows.iter_mut().find(|r| r.product == item.product.name) {
                Some(row) => {
                    row.quantity += item.quantity;
                    row.revenue += item.subtotal;
                }
                None => rows.push(ProductSales {
                    product: item.product.name.clone(),
                    quantity: item.quantity,
                    revenue: item.subtotal,
                }),
            }
        }
    }

    rows.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    rows.truncate(limit);
    rows
}

/// The local calendar day a sale happened on.
fn local_day(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

/// Sales recorded on a given local calendar day.
pub fn sales_on(sales: &[Sale], date: NaiveDate) -> Vec<&Sale> {
    sales
        .iter()
        .filter(|s| local_day(s.timestamp) == date)
        .collect()
}

/// Sales recorded today (local time).
pub fn today_sales(sales: &[Sale]) -> Vec<&Sale> {
    sales_on(sales, Local::now().date_naive())
}

/// Sales whose local calendar day falls in `[start, end]` inclusive.
pub fn sales_in_range<'a>(sales: &'a [Sale], start: NaiveDate, end: NaiveDate) -> Vec<&'a Sale> {
    sales
        .iter()
        .filter(|s| {
            let day = local_day(s.timestamp);
            day >= start && day <= end
        })
        .collect()
}

/// Sum of sale totals on a given local day.
pub fn daily_total(sales: &[Sale], date: NaiveDate) -> Money {
    sales_on(sales, date).iter().map(|s| s.total).sum()
}

/// Revenue for a local calendar month.
pub fn monthly_revenue(sales: &[Sale], year: i32, month: u32) -> Money {
    sales
        .iter()
        .filter(|s| {
            let day = local_day(s.timestamp);
            day.year() == year && day.month() == month
        })
        .map(|s| s.total)
        .sum()
}

/// Full per-day rollup used by the dashboard: totals, transaction
/// count, VAT collected, and the cash/digital split.
pub fn daily_summary(sales: &[Sale], date: NaiveDate) -> DailySales {
    let day_sales = sales_on(sales, date);

    let mut total_sales = Money::zero();
    let mut vat_collected = Money::zero();
    let mut cash_sales = Money::zero();
    let mut digital_sales = Money::zero();

    for sale in &day_sales {
        total_sales += sale.total;
        vat_collected += sale.vat_amount;
        if sale.payment_method.is_digital() {
            digital_sales += sale.total;
        } else {
            cash_sales += sale.total;
        }
    }

    DailySales {
        date: date.format("%Y-%m-%d").to_string(),
        total_sales,
        total_transactions: day_sales.len(),
        vat_collected,
        cash_sales,
        digital_sales,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CartItem, DiscountType, PaymentMethod, Product};
    use chrono::{Duration, TimeZone};

    fn product(id: &str, name: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: "Beverages".to_string(),
            price: Money::from_centavos(price),
            cost: None,
            stock: 100,
            barcode: None,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sale(items: Vec<CartItem>, method: PaymentMethod, timestamp: DateTime<Utc>) -> Sale {
        let subtotal: Money = items.iter().map(|i| i.subtotal).sum();
        Sale {
            id: format!("sale-{}", timestamp.timestamp_millis()),
            receipt_number: "260829-000001".to_string(),
            items,
            subtotal,
            discount: Money::zero(),
            discount_type: DiscountType::Percentage,
            vat_amount: subtotal.vat_component(crate::VatRate::philippine()),
            total: subtotal,
            payment_method: method,
            amount_received: subtotal,
            change: Money::zero(),
            cashier_id: "u1".to_string(),
            cashier_name: "Maria".to_string(),
            timestamp,
            customer: None,
        }
    }

    #[test]
    fn test_top_selling_aggregates_by_name() {
        let coke_a = product("p1", "Coca-Cola 350ml", 2500);
        let coke_b = product("p2", "Coca-Cola 350ml", 2600); // same name, other id
        let chips = product("p3", "Piattos", 1800);

        let now = Utc::now();
        let sales = vec![
            sale(
                vec![
                    CartItem::from_product(&coke_a, 2),
                    CartItem::from_product(&chips, 5),
                ],
                PaymentMethod::Cash,
                now,
            ),
            sale(
                vec![CartItem::from_product(&coke_b, 4)],
                PaymentMethod::Cash,
                now,
            ),
        ];

        let top = top_selling_products(&sales, 10);
        assert_eq!(top.len(), 2); // both cokes merged into one row
        assert_eq!(top[0].product, "Coca-Cola 350ml");
        assert_eq!(top[0].quantity, 6);
        assert_eq!(top[0].revenue.centavos(), 2 * 2500 + 4 * 2600);
        assert_eq!(top[1].product, "Piattos");
        assert_eq!(top[1].quantity, 5);
    }

    #[test]
    fn test_top_selling_stable_ties_and_limit() {
        let a = product("p1", "A", 100);
        let b = product("p2", "B", 100);
        let c = product("p3", "C", 100);

        let now = Utc::now();
        let sales = vec![sale(
            vec![
                CartItem::from_product(&a, 3),
                CartItem::from_product(&b, 3),
                CartItem::from_product(&c, 7),
            ],
            PaymentMethod::Cash,
            now,
        )];

        let top = top_selling_products(&sales, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].product, "C");
        // A and B tie on quantity; A was seen first and stays first.
        assert_eq!(top[1].product, "A");
    }

    #[test]
    fn test_sales_on_filters_by_local_day() {
        let p = product("p1", "A", 100);
        let today = Local::now();
        let yesterday = today - Duration::days(1);

        let sales = vec![
            sale(
                vec![CartItem::from_product(&p, 1)],
                PaymentMethod::Cash,
                today.with_timezone(&Utc),
            ),
            sale(
                vec![CartItem::from_product(&p, 1)],
                PaymentMethod::Cash,
                yesterday.with_timezone(&Utc),
            ),
        ];

        assert_eq!(sales_on(&sales, today.date_naive()).len(), 1);
        assert_eq!(sales_on(&sales, yesterday.date_naive()).len(), 1);
        assert_eq!(today_sales(&sales).len(), 1);
    }

    #[test]
    fn test_sales_in_range_inclusive() {
        let p = product("p1", "A", 100);
        let base = Local.with_ymd_and_hms(2026, 8, 10, 12, 0, 0).unwrap();

        let sales: Vec<Sale> = (0..5)
            .map(|d| {
                sale(
                    vec![CartItem::from_product(&p, 1)],
                    PaymentMethod::Cash,
                    (base + Duration::days(d)).with_timezone(&Utc),
                )
            })
            .collect();

        let start = NaiveDate::from_ymd_opt(2026, 8, 11).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 8, 13).unwrap();
        assert_eq!(sales_in_range(&sales, start, end).len(), 3);
    }

    #[test]
    fn test_daily_summary_splits_tender() {
        let p = product("p1", "A", 5000);
        let when = Local.with_ymd_and_hms(2026, 8, 12, 10, 0, 0).unwrap();
        let ts = when.with_timezone(&Utc);

        let sales = vec![
            sale(vec![CartItem::from_product(&p, 1)], PaymentMethod::Cash, ts),
            sale(
                vec![CartItem::from_product(&p, 2)],
                PaymentMethod::GCash,
                ts,
            ),
        ];

        let summary = daily_summary(&sales, when.date_naive());
        assert_eq!(summary.date, "2026-08-12");
        assert_eq!(summary.total_transactions, 2);
        assert_eq!(summary.total_sales.centavos(), 15_000);
        assert_eq!(summary.cash_sales.centavos(), 5000);
        assert_eq!(summary.digital_sales.centavos(), 10_000);
        assert!(summary.vat_collected.is_positive());
    }

    #[test]
    fn test_monthly_revenue() {
        let p = product("p1", "A", 1000);
        let aug = Local.with_ymd_and_hms(2026, 8, 5, 9, 0, 0).unwrap();
        let sep = Local.with_ymd_and_hms(2026, 9, 5, 9, 0, 0).unwrap();

        let sales = vec![
            sale(
                vec![CartItem::from_product(&p, 1)],
                PaymentMethod::Cash,
                aug.with_timezone(&Utc),
            ),
            sale(
                vec![CartItem::from_product(&p, 3)],
                PaymentMethod::Cash,
                sep.with_timezone(&Utc),
            ),
        ];

        assert_eq!(monthly_revenue(&sales, 2026, 8).centavos(), 1000);
        assert_eq!(monthly_revenue(&sales, 2026, 9).centavos(), 3000);
        assert_eq!(monthly_revenue(&sales, 2026, 10), Money::zero());
    }
}
