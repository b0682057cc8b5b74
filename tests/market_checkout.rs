//! Full checkout over the `market` fixture set, through every collaborator.

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use tally::{
    checkout::{Address, PaymentSelection, assemble},
    fixtures::Fixture,
    receipt::write_receipt,
    services::{
        coupons::{CouponBook, CouponOffer, CouponService, OfferAmount},
        orders::{OrderGateway, OrderStatus, RecordingGateway},
        shipping::{FlatRateTable, ShippingMethod, ShippingRateService},
        store::{AddressBook, Wallet},
    },
};

fn saved_address() -> Address {
    Address {
        id: "addr-1".to_string(),
        recipient: "Jo Castle".to_string(),
        line1: "12 Harbour Way".to_string(),
        line2: None,
        city: "Portland".to_string(),
        postcode: "97201".to_string(),
        country: "US".to_string(),
    }
}

#[test]
fn market_cart_checks_out_through_all_collaborators() -> TestResult {
    let fixture = Fixture::from_set("market")?;
    let mut ledger = fixture.ledger()?;

    // Saved records, as the account pages would have left them.
    let mut addresses = AddressBook::new();
    addresses.create("addr-1", saved_address())?;

    let mut wallet = Wallet::new();
    wallet.create(
        "pm-1",
        tally::checkout::PaymentMethod {
            id: "pm-1".to_string(),
            holder: "Jo Castle".to_string(),
            last4: "4242".to_string(),
            expiry: "09/28".to_string(),
        },
    )?;
    wallet.set_default("pm-1")?;

    // Shipping quoted for the default address.
    let rates = FlatRateTable::new(USD, "US").with_rate(ShippingMethod::Standard, 500);
    let address = addresses.fetch("addr-1")?.clone();
    ledger.update_shipping(rates.rate(&address, ShippingMethod::Standard)?)?;

    // Coupon validated against the live subtotal (25.97), then applied.
    let mut coupons = CouponBook::new();
    coupons.insert(
        "TENPCT",
        CouponOffer::new(OfferAmount::PercentOff(Percentage::from(0.1))),
    );

    let discount = coupons.validate("TENPCT", &ledger.subtotal())?;
    ledger.apply_coupon("TENPCT", discount)?;

    // 2597 subtotal + 500 shipping + 260 tax - 260 discount
    assert_eq!(ledger.total(), Money::from_minor(3097, USD));

    let snapshot = ledger.snapshot()?;

    let mut rendered = Vec::new();
    write_receipt(&mut rendered, &snapshot)?;
    let text = String::from_utf8(rendered)?;
    assert!(text.contains("Espresso Beans 500g"), "{text}");
    assert!(text.contains("Discount (TENPCT):"), "{text}");

    let default_payment = wallet.default_record().expect("wallet has a default");
    let payload = assemble(
        &ledger,
        &snapshot,
        fixture.products(),
        &address,
        &PaymentSelection::Saved {
            id: default_payment.id.clone(),
        },
        "market-0001",
    )?;

    assert_eq!(payload.lines.len(), 3);
    assert_eq!(payload.total_minor, 3097);
    assert_eq!(payload.coupon_code.as_deref(), Some("TENPCT"));

    let mut gateway = RecordingGateway::new();
    let confirmation = gateway.submit(&payload)?;

    assert_eq!(confirmation.status, OrderStatus::Accepted);

    ledger.clear()?;
    assert!(ledger.is_empty());

    Ok(())
}
