//! # Totals Module
//!
//! Line-item pricing calculation for offers and contracts.
//!
//! ## Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Per-Line Calculation                               │
//! │                                                                         │
//! │  quantity × unit_price ──► subtotal                                     │
//! │                               │                                         │
//! │                               ▼                                         │
//! │  subtotal − round(subtotal × discount) ──► net                          │
//! │                               │                                         │
//! │                               ▼                                         │
//! │  round(net × vat_rate) ──► vat                                          │
//! │                               │                                         │
//! │                               ▼                                         │
//! │  net + vat ──► gross                                                    │
//! │                                                                         │
//! │  Rounding happens exactly once per derived amount. Document rollups    │
//! │  sum the already-rounded per-line values in input order, so the        │
//! │  preview shown before submission matches the saved record cent for    │
//! │  cent.                                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The backend runs the same arithmetic; these numbers must agree exactly.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::LineItem;

// =============================================================================
// Line Totals
// =============================================================================

/// Derived amounts for a single line item. Never stored; recomputed on
/// every preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineTotals {
    /// Amount after discount, before VAT.
    pub net_cents: i64,
    /// VAT amount on the net.
    pub vat_cents: i64,
    /// Net plus VAT.
    pub gross_cents: i64,
}

impl LineTotals {
    /// All-zero totals (empty document, zero-priced line).
    pub const fn zero() -> Self {
        LineTotals {
            net_cents: 0,
            vat_cents: 0,
            gross_cents: 0,
        }
    }

    /// Returns the net amount as Money.
    #[inline]
    pub fn net(&self) -> Money {
        Money::from_cents(self.net_cents)
    }

    /// Returns the VAT amount as Money.
    #[inline]
    pub fn vat(&self) -> Money {
        Money::from_cents(self.vat_cents)
    }

    /// Returns the gross amount as Money.
    #[inline]
    pub fn gross(&self) -> Money {
        Money::from_cents(self.gross_cents)
    }
}

impl LineItem {
    /// Computes net/VAT/gross for this line.
    ///
    /// Degenerate inputs (zero quantity, zero price) produce zero totals,
    /// never errors. Inputs are assumed validated upstream
    /// (see [`crate::validation`]); this function itself enforces nothing.
    pub fn totals(&self) -> LineTotals {
        let subtotal = self.unit_price().multiply_quantity(self.quantity);
        let discount_slice = subtotal.apply_rate(self.discount());
        let net = subtotal - discount_slice;
        let vat = net.apply_rate(self.vat_rate());
        let gross = net + vat;

        LineTotals {
            net_cents: net.cents(),
            vat_cents: vat.cents(),
            gross_cents: gross.cents(),
        }
    }
}

// =============================================================================
// Document Totals
// =============================================================================

/// Rollup totals for a whole offer or contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DocumentTotals {
    /// Number of line items.
    pub item_count: usize,
    pub net_cents: i64,
    pub vat_cents: i64,
    pub gross_cents: i64,
}

impl DocumentTotals {
    /// Sums per-line totals over `items`, accumulating in input order.
    ///
    /// Summation is over already-rounded line values, so the rollup is
    /// independent of how the backend groups or batches lines internally.
    pub fn of(items: &[LineItem]) -> Self {
        let mut net = Money::zero();
        let mut vat = Money::zero();
        let mut gross = Money::zero();

        for item in items {
            let line = item.totals();
            net += line.net();
            vat += line.vat();
            gross += line.gross();
        }

        DocumentTotals {
            item_count: items.len(),
            net_cents: net.cents(),
            vat_cents: vat.cents(),
            gross_cents: gross.cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, unit_price_cents: i64, discount_bps: u32, vat_rate_bps: u32) -> LineItem {
        LineItem {
            name: "Consulting".to_string(),
            description: None,
            quantity,
            unit: "day".to_string(),
            unit_price_cents,
            vat_rate_bps,
            discount_bps,
        }
    }

    #[test]
    fn test_reference_example() {
        // 2 × 100.00, 10% discount, 23% VAT
        let totals = item(2, 10000, 1000, 2300).totals();
        assert_eq!(totals.net_cents, 18000); // 180.00
        assert_eq!(totals.vat_cents, 4140); // 41.40
        assert_eq!(totals.gross_cents, 22140); // 221.40
    }

    #[test]
    fn test_zero_price_yields_zero_totals() {
        let totals = item(1, 0, 0, 2300).totals();
        assert_eq!(totals, LineTotals::zero());
    }

    #[test]
    fn test_zero_quantity_yields_zero_totals() {
        let totals = item(0, 10000, 1000, 2300).totals();
        assert_eq!(totals, LineTotals::zero());
    }

    #[test]
    fn test_no_discount_net_is_quantity_times_price() {
        let totals = item(7, 1299, 0, 1900).totals();
        assert_eq!(totals.net_cents, 7 * 1299);
    }

    #[test]
    fn test_gross_is_net_plus_vat() {
        // Awkward numbers that force rounding on both slices.
        for (qty, price, discount, vat) in [
            (3, 3333, 1250, 825),
            (1, 99, 3333, 1999),
            (13, 107, 1, 2300),
        ] {
            let totals = item(qty, price, discount, vat).totals();
            assert_eq!(
                totals.gross_cents,
                totals.net_cents + totals.vat_cents,
                "gross must equal net + vat for qty={} price={}",
                qty,
                price
            );
        }
    }

    #[test]
    fn test_discount_then_vat_order() {
        // 100.00 at 50% discount, 20% VAT: VAT applies to the discounted net.
        let totals = item(1, 10000, 5000, 2000).totals();
        assert_eq!(totals.net_cents, 5000);
        assert_eq!(totals.vat_cents, 1000); // 20% of 50.00, not of 100.00
    }

    #[test]
    fn test_document_rollup_equals_sum_of_lines() {
        let items = vec![
            item(2, 10000, 1000, 2300),
            item(3, 3333, 1250, 825),
            item(1, 0, 0, 2300),
        ];

        let rollup = DocumentTotals::of(&items);
        let net: i64 = items.iter().map(|i| i.totals().net_cents).sum();
        let vat: i64 = items.iter().map(|i| i.totals().vat_cents).sum();
        let gross: i64 = items.iter().map(|i| i.totals().gross_cents).sum();

        assert_eq!(rollup.item_count, 3);
        assert_eq!(rollup.net_cents, net);
        assert_eq!(rollup.vat_cents, vat);
        assert_eq!(rollup.gross_cents, gross);
        assert_eq!(rollup.gross_cents, rollup.net_cents + rollup.vat_cents);
    }

    #[test]
    fn test_empty_document() {
        let rollup = DocumentTotals::of(&[]);
        assert_eq!(rollup.item_count, 0);
        assert_eq!(rollup.net_cents, 0);
        assert_eq!(rollup.vat_cents, 0);
        assert_eq!(rollup.gross_cents, 0);
    }
}
