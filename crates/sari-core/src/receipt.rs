//! # Receipt Rendering
//!
//! Fixed-width (40 column) plain-text receipts for thermal printers.
//!
//! A receipt is regenerated on demand from a [`Sale`] and the current
//! [`BusinessSettings`]; it is never persisted. Layout:
//!
//! ```text
//! <business header: name, address, TIN, BIR permit, contact>
//! Receipt #: 260829-123456
//! Date: Aug 29, 2026, 02:41 PM
//! Cashier: Maria Santos
//! ========================================
//! ITEMS
//! ========================================
//! Coca-Cola 350ml
//!   3 x ₱25.00                     ₱75.00
//! ----------------------------------------
//! Subtotal:                         ₱75.00
//! Discount:                          ₱7.50
//! VAT (12%):                         ₱7.23
//! ========================================
//! TOTAL:                            ₱67.50
//! ========================================
//! Payment: CASH
//! Amount Received: ₱100.00
//! Change: ₱32.50
//! <footer>
//! ```

use chrono::Local;

use crate::types::{BusinessSettings, Sale};
use crate::RECEIPT_WIDTH;

/// Width of the `qty x unit-price` column on an item line.
const ITEM_QTY_COL: usize = 25;
/// Width of the right-aligned line-total column.
const ITEM_TOTAL_COL: usize = 10;
/// Totals-block values are right-aligned to this column.
const TOTALS_COL: usize = 39;

/// Renders the full receipt text for a sale.
pub fn render(sale: &Sale, settings: &BusinessSettings) -> String {
    let mut out = String::new();

    // Header block
    out.push_str(&settings.business_name);
    out.push('\n');
    out.push_str(&settings.address);
    out.push('\n');
    out.push_str(&format!("TIN: {}\n", settings.tin));
    out.push_str(&format!("BIR Permit: {}\n", settings.bir_permit_number));
    out.push_str(&format!("Contact: {}\n", settings.contact_number));
    out.push('\n');

    out.push_str(&format!("Receipt #: {}\n", sale.receipt_number));
    out.push_str(&format!(
        "Date: {}\n",
        sale.timestamp
            .with_timezone(&Local)
            .format("%b %-d, %Y, %I:%M %p")
    ));
    out.push_str(&format!("Cashier: {}\n", sale.cashier_name));
    if let Some(customer) = &sale.customer {
        out.push_str(&format!("Customer: {customer}\n"));
    }
    out.push('\n');

    // Itemized block
    out.push_str(&rule('='));
    out.push_str("ITEMS\n");
    out.push_str(&rule('='));

    for item in &sale.items {
        let qty_price = format!("{} x {}", item.quantity, item.product.price);
        out.push_str(&format!("{}\n", item.product.name));
        out.push_str(&format!(
            "  {} {}\n",
            pad_right(&qty_price, ITEM_QTY_COL),
            pad_left(&item.subtotal.to_string(), ITEM_TOTAL_COL)
        ));
    }

    // Totals block
    out.push('\n');
    out.push_str(&rule('-'));
    out.push_str(&totals_line("Subtotal:", &sale.subtotal.to_string()));
    if sale.discount.is_positive() {
        out.push_str(&totals_line("Discount:", &sale.discount.to_string()));
    }
    let rate = settings.effective_vat_rate();
    let vat = sale.total.vat_component(rate);
    out.push_str(&totals_line(
        &format!("VAT ({}):", percent_label(rate.bps())),
        &vat.to_string(),
    ));
    out.push_str(&rule('='));
    out.push_str(&totals_line("TOTAL:", &sale.total.to_string()));
    out.push_str(&rule('='));

    // Payment block
    out.push('\n');
    out.push_str(&format!("Payment: {}\n", sale.payment_method.label()));
    out.push_str(&format!("Amount Received: {}\n", sale.amount_received));
    out.push_str(&format!("Change: {}\n", sale.change));
    out.push('\n');

    out.push_str(&settings.receipt_footer);
    out.push('\n');
    out.push('\n');
    out.push_str("Thank you for your business!\n");

    out
}

/// One separator rule of the full receipt width, with newline.
fn rule(ch: char) -> String {
    let mut line: String = std::iter::repeat(ch).take(RECEIPT_WIDTH).collect();
    line.push('\n');
    line
}

/// A totals-block line: label left, value right-aligned to col 39.
fn totals_line(label: &str, value: &str) -> String {
    let width = TOTALS_COL.saturating_sub(label.chars().count());
    format!("{label}{}\n", pad_left(value, width))
}

fn pad_left(s: &str, width: usize) -> String {
    format!("{s:>width$}")
}

fn pad_right(s: &str, width: usize) -> String {
    format!("{s:<width$}")
}

/// "12%" for whole percentages, "12.5%" otherwise.
fn percent_label(bps: u32) -> String {
    if bps % 100 == 0 {
        format!("{}%", bps / 100)
    } else {
        format!("{}%", bps as f64 / 100.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
