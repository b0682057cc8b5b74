//! Order assembly and submission against the in-memory gateway.
//!
//! A failed submission must leave the cart intact so the customer can retry;
//! clearing only happens after an accepted order.

use rusty_money::{Money, iso::USD};
use slotmap::SlotMap;
use testresult::TestResult;

use tally::{
    checkout::{Address, CheckoutError, PaymentSelection, assemble},
    items::LineItem,
    ledger::Ledger,
    products::{Product, ProductKey},
    services::orders::{OrderGateway, OrderStatus, RecordingGateway, SubmitError},
};

fn catalog<'a>() -> (SlotMap<ProductKey, Product<'a>>, ProductKey) {
    let mut products = SlotMap::with_key();

    let key = products.insert(Product {
        sku: "beans-espresso".to_string(),
        name: "Espresso Beans 500g".to_string(),
        image: None,
        price: Money::from_minor(1099, USD),
    });

    (products, key)
}

fn address() -> Address {
    Address {
        id: "addr-1".to_string(),
        recipient: "Jo Castle".to_string(),
        line1: "12 Harbour Way".to_string(),
        line2: Some("Unit 4".to_string()),
        city: "Portland".to_string(),
        postcode: "97201".to_string(),
        country: "US".to_string(),
    }
}

fn payment() -> PaymentSelection {
    PaymentSelection::NewCard {
        holder: "Jo Castle".to_string(),
        last4: "4242".to_string(),
        expiry: "09/28".to_string(),
    }
}

#[test]
fn accepted_submission_then_clear() -> TestResult {
    let (products, key) = catalog();
    let mut ledger = Ledger::new(USD);
    let mut gateway = RecordingGateway::new();

    ledger.add_item(LineItem::new(
        key,
        "Espresso Beans 500g",
        Money::from_minor(1099, USD),
        2,
    ))?;
    ledger.update_shipping(Money::from_minor(500, USD))?;

    let snapshot = ledger.snapshot()?;
    let payload = assemble(&ledger, &snapshot, &products, &address(), &payment(), "idem-1")?;

    let confirmation = gateway.submit(&payload)?;

    assert_eq!(confirmation.status, OrderStatus::Accepted);
    assert_eq!(gateway.accepted().len(), 1);

    // Only after acceptance does the flow reset the cart.
    ledger.clear()?;
    assert!(ledger.is_empty());
    assert_eq!(ledger.total(), Money::from_minor(0, USD));

    Ok(())
}

#[test]
fn failed_submission_leaves_the_cart_intact_for_retry() -> TestResult {
    let (products, key) = catalog();
    let mut ledger = Ledger::new(USD);
    let mut gateway = RecordingGateway::new();

    ledger.add_item(LineItem::new(
        key,
        "Espresso Beans 500g",
        Money::from_minor(1099, USD),
        1,
    ))?;

    let revision = ledger.revision();
    let snapshot = ledger.snapshot()?;
    let payload = assemble(&ledger, &snapshot, &products, &address(), &payment(), "idem-2")?;

    gateway.fail_next_with(SubmitError::PaymentDeclined("insufficient funds".to_string()));

    let failure = gateway.submit(&payload);
    assert_eq!(
        failure,
        Err(SubmitError::PaymentDeclined(
            "insufficient funds".to_string()
        ))
    );

    // The ledger was never touched by the submission attempt.
    assert_eq!(ledger.revision(), revision);
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.total(), Money::from_minor(1209, USD));

    // The same payload can be retried as-is.
    let confirmation = gateway.submit(&payload)?;
    assert_eq!(confirmation.status, OrderStatus::Accepted);
    assert_eq!(gateway.accepted().len(), 1);

    Ok(())
}

#[test]
fn snapshot_taken_before_a_mutation_cannot_be_submitted() -> TestResult {
    let (products, key) = catalog();
    let mut ledger = Ledger::new(USD);

    ledger.add_item(LineItem::new(
        key,
        "Espresso Beans 500g",
        Money::from_minor(1099, USD),
        1,
    ))?;

    let snapshot = ledger.snapshot()?;

    // A coupon lands between render and submit.
    ledger.apply_coupon("SAVE1", Money::from_minor(100, USD))?;

    let result = assemble(&ledger, &snapshot, &products, &address(), &payment(), "idem-3");

    assert!(matches!(result, Err(CheckoutError::StaleSnapshot { .. })));

    // Re-snapshotting picks up the new totals and assembles cleanly.
    let fresh = ledger.snapshot()?;
    let payload = assemble(&ledger, &fresh, &products, &address(), &payment(), "idem-3")?;

    assert_eq!(payload.discount_minor, 100);
    assert_eq!(payload.total_minor, ledger.total().to_minor_units());

    Ok(())
}

#[test]
fn payload_serializes_with_minor_unit_amounts() -> TestResult {
    let (products, key) = catalog();
    let mut ledger = Ledger::new(USD);

    ledger.add_item(LineItem::new(
        key,
        "Espresso Beans 500g",
        Money::from_minor(1099, USD),
        1,
    ))?;

    let snapshot = ledger.snapshot()?;
    let payload = assemble(&ledger, &snapshot, &products, &address(), &payment(), "idem-4")?;

    let rendered = serde_norway::to_string(&payload)?;

    assert!(rendered.contains("idempotency_key: idem-4"), "{rendered}");
    assert!(rendered.contains("subtotal_minor: 1099"), "{rendered}");
    assert!(rendered.contains("sku: beans-espresso"), "{rendered}");

    Ok(())
}
