//! End-to-end cart flow exercising the derived-total invariants.
//!
//! Every step asserts the determinism invariant: `subtotal` equals the sum of
//! line totals, `tax` equals 10% of the subtotal, and `total` equals
//! `subtotal + shipping + tax - discount`, clamped at zero.

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use tally::{items::LineItem, ledger::Ledger, products::ProductKey, variants::VariantKey};

fn assert_consistent(ledger: &Ledger<'_>) {
    let line_sum: i64 = ledger
        .items()
        .iter()
        .map(|line| line.unit_price().to_minor_units() * i64::from(line.quantity()))
        .sum();

    assert_eq!(
        ledger.subtotal().to_minor_units(),
        line_sum,
        "subtotal must equal the sum of line totals"
    );

    let expected_total = 0.max(
        ledger.subtotal().to_minor_units() + ledger.shipping().to_minor_units()
            + ledger.tax().to_minor_units()
            - ledger.discount().to_minor_units(),
    );

    assert_eq!(
        ledger.total().to_minor_units(),
        expected_total,
        "total must equal subtotal + shipping + tax - discount, clamped at zero"
    );
}

#[test]
fn full_checkout_sequence_keeps_totals_consistent() -> TestResult {
    let key = ProductKey::default();
    let mut ledger = Ledger::new(USD);

    ledger.add_item(LineItem::new(key, "Widget", Money::from_minor(100, USD), 2))?;
    assert_eq!(ledger.subtotal(), Money::from_minor(200, USD));
    assert_eq!(ledger.tax(), Money::from_minor(20, USD));
    assert_eq!(ledger.shipping(), Money::from_minor(0, USD));
    assert_eq!(ledger.discount(), Money::from_minor(0, USD));
    assert_eq!(ledger.total(), Money::from_minor(220, USD));
    assert_consistent(&ledger);

    ledger.update_shipping(Money::from_minor(10, USD))?;
    assert_eq!(ledger.total(), Money::from_minor(230, USD));
    assert_consistent(&ledger);

    ledger.apply_coupon("SAVE10", Money::from_minor(10, USD))?;
    assert_eq!(ledger.total(), Money::from_minor(220, USD));
    assert_consistent(&ledger);

    ledger.update_quantity(key, &VariantKey::none(), 1)?;
    assert_eq!(ledger.subtotal(), Money::from_minor(100, USD));
    assert_eq!(ledger.tax(), Money::from_minor(10, USD));
    assert_eq!(ledger.total(), Money::from_minor(110, USD));
    assert_consistent(&ledger);

    // Emptying the cart leaves shipping 10 and discount 10 in place; the
    // clamped combine resolves to zero rather than a negative amount due.
    ledger.remove_item(key, &VariantKey::none())?;
    assert!(ledger.is_empty());
    assert_eq!(ledger.subtotal(), Money::from_minor(0, USD));
    assert_eq!(ledger.tax(), Money::from_minor(0, USD));
    assert_eq!(ledger.total(), Money::from_minor(0, USD));
    assert_consistent(&ledger);

    Ok(())
}

#[test]
fn oversized_discount_clamps_the_total_to_zero() -> TestResult {
    let mut ledger = Ledger::new(USD);

    ledger.add_item(LineItem::new(
        ProductKey::default(),
        "Widget",
        Money::from_minor(100, USD),
        1,
    ))?;
    ledger.apply_coupon("EVERYTHING", Money::from_minor(10_000, USD))?;

    assert_eq!(ledger.total(), Money::from_minor(0, USD));
    assert_consistent(&ledger);

    Ok(())
}

#[test]
fn tax_rounds_half_away_from_zero() -> TestResult {
    let mut ledger = Ledger::new(USD);

    // 10% of 335 is 33.5, which rounds to 34.
    ledger.add_item(LineItem::new(
        ProductKey::default(),
        "Widget",
        Money::from_minor(335, USD),
        1,
    ))?;

    assert_eq!(ledger.tax(), Money::from_minor(34, USD));
    assert_consistent(&ledger);

    Ok(())
}

#[test]
fn interleaved_mutations_stay_consistent() -> TestResult {
    let widget = ProductKey::default();
    let mut ledger = Ledger::new(USD);

    ledger.add_item(LineItem::new(widget, "Widget", Money::from_minor(333, USD), 1))?;
    assert_consistent(&ledger);

    ledger.add_item(LineItem::with_variant(
        widget,
        VariantKey::from_strs(&["blue"]),
        "Widget",
        Money::from_minor(350, USD),
        2,
    ))?;
    assert_consistent(&ledger);

    ledger.update_shipping(Money::from_minor(499, USD))?;
    assert_consistent(&ledger);

    ledger.apply_coupon("FIRST", Money::from_minor(75, USD))?;
    assert_consistent(&ledger);

    ledger.update_quantity(widget, &VariantKey::from_strs(&["blue"]), 5)?;
    assert_consistent(&ledger);

    ledger.apply_coupon("SECOND", Money::from_minor(125, USD))?;
    assert_eq!(ledger.discount(), Money::from_minor(125, USD));
    assert_consistent(&ledger);

    ledger.remove_coupon()?;
    assert_eq!(ledger.discount(), Money::from_minor(0, USD));
    assert_consistent(&ledger);

    ledger.clear()?;
    assert!(ledger.is_empty());
    assert_consistent(&ledger);

    Ok(())
}
