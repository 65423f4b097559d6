//! Invoice total calculation.
//!
//! Pure functions: no I/O, no failure modes. Missing optional fields
//! default to zero contributions. Negative quantities or prices are valid
//! credit/refund lines.

use crate::models::{Invoice, LineItem};
use rust_decimal::{Decimal, RoundingStrategy};

/// Round to 2 decimal places, half-up (midpoint away from zero).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Invoice-level monetary aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

/// Computes each item's displayed total and the invoice aggregates.
///
/// Item totals are rounded per item; the aggregates accumulate the
/// unrounded per-item values and are rounded once at the end. The displayed
/// sum of item totals can therefore differ from `total_amount` by a few
/// cents under adversarial inputs. That arithmetic is intentional and must
/// not be unified into single-stage rounding.
pub fn calculate_invoice_totals(items: &mut [LineItem]) -> InvoiceTotals {
    let mut subtotal = Decimal::ZERO;
    let mut tax_amount = Decimal::ZERO;

    for item in items.iter_mut() {
        let item_subtotal = item.quantity * item.unit_price;
        let item_tax = match item.tax_rate {
            Some(rate) => item_subtotal * rate / Decimal::ONE_HUNDRED,
            None => Decimal::ZERO,
        };

        subtotal += item_subtotal;
        tax_amount += item_tax;
        item.total = Some(round_money(item_subtotal + item_tax));
    }

    let subtotal = round_money(subtotal);
    let tax_amount = round_money(tax_amount);
    InvoiceTotals {
        subtotal,
        tax_amount,
        total_amount: round_money(subtotal + tax_amount),
    }
}

/// Recomputes the derived totals on an invoice from its line items. Runs on
/// every create and update; stored totals are never trusted from input.
pub fn recalculate(invoice: &mut Invoice) {
    let totals = calculate_invoice_totals(&mut invoice.line_items);
    invoice.subtotal = Some(totals.subtotal);
    invoice.tax_amount = Some(totals.tax_amount);
    invoice.total_amount = Some(totals.total_amount);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: &str, unit_price: &str, tax_rate: Option<&str>) -> LineItem {
        LineItem {
            description: "item".to_string(),
            quantity: quantity.parse().unwrap(),
            unit_price: unit_price.parse().unwrap(),
            tax_rate: tax_rate.map(|r| r.parse().unwrap()),
            total: None,
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn taxed_and_untaxed_items_aggregate() {
        let mut items = vec![item("40", "75", Some("8.5")), item("1", "15", Some("0"))];
        let totals = calculate_invoice_totals(&mut items);

        assert_eq!(totals.subtotal, dec("3015.00"));
        assert_eq!(totals.tax_amount, dec("255.00"));
        assert_eq!(totals.total_amount, dec("3270.00"));
        assert_eq!(items[0].total, Some(dec("3255.00")));
        assert_eq!(items[1].total, Some(dec("15.00")));
    }

    #[test]
    fn empty_item_list_yields_zero_totals() {
        let totals = calculate_invoice_totals(&mut []);
        assert_eq!(totals.subtotal, dec("0.00"));
        assert_eq!(totals.tax_amount, dec("0.00"));
        assert_eq!(totals.total_amount, dec("0.00"));
    }

    #[test]
    fn absent_tax_rate_contributes_no_tax() {
        let mut items = vec![item("2", "9.99", None)];
        let totals = calculate_invoice_totals(&mut items);
        assert_eq!(totals.subtotal, dec("19.98"));
        assert_eq!(totals.tax_amount, dec("0.00"));
        assert_eq!(totals.total_amount, dec("19.98"));
    }

    #[test]
    fn negative_quantity_is_a_credit_line() {
        let mut items = vec![item("1", "100", None), item("-1", "40", None)];
        let totals = calculate_invoice_totals(&mut items);
        assert_eq!(totals.subtotal, dec("60.00"));
        assert_eq!(totals.total_amount, dec("60.00"));
        assert_eq!(items[1].total, Some(dec("-40.00")));
    }

    #[test]
    fn calculator_is_idempotent() {
        let mut first = vec![item("3", "0.335", Some("7.25")), item("40", "75", Some("8.5"))];
        let mut second = first.clone();

        let a = calculate_invoice_totals(&mut first);
        let b = calculate_invoice_totals(&mut second);
        // And again over already-populated items.
        let c = calculate_invoice_totals(&mut first);

        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(first[0].total, second[0].total);
    }

    #[test]
    fn displayed_item_totals_may_disagree_with_aggregate_by_cents() {
        // Three items of 0.333 each: displayed 0.33 + 0.33 + 0.33 = 0.99,
        // while the aggregate rounds 0.999 to 1.00.
        let mut items = vec![
            item("1", "0.333", None),
            item("1", "0.333", None),
            item("1", "0.333", None),
        ];
        let totals = calculate_invoice_totals(&mut items);

        let displayed: Decimal = items.iter().map(|i| i.total.unwrap()).sum();
        assert_eq!(displayed, dec("0.99"));
        assert_eq!(totals.total_amount, dec("1.00"));
    }

    #[test]
    fn rounding_is_half_up() {
        let mut items = vec![item("1", "2.005", None)];
        let totals = calculate_invoice_totals(&mut items);
        assert_eq!(items[0].total, Some(dec("2.01")));
        assert_eq!(totals.subtotal, dec("2.01"));
    }
}
