//! Checkout Demo
//!
//! Runs a full checkout against the in-memory collaborators: load a fixture
//! set, apply an optional coupon and a shipping method, print the receipt,
//! then assemble and submit the order payload.
//!
//! Use `-f` to load a fixture set by name
//! Use `-c` to apply a coupon code (`SAVE5` or `TENPCT` are registered)
//! Use `-s` to pick a shipping method (standard, express, collection)

use std::{
    io::{self, Write},
    time::Instant,
};

use anyhow::Result;
use clap::Parser;
use decimal_percentage::Percentage;
use humanize_duration::{Truncate, prelude::DurationExt};

use tally::{
    checkout::{Address, PaymentSelection, assemble},
    fixtures::Fixture,
    receipt::write_receipt,
    services::{
        coupons::{CouponBook, CouponOffer, CouponService, OfferAmount},
        orders::{OrderGateway, RecordingGateway},
        shipping::{FlatRateTable, ShippingMethod, ShippingRateService},
        store::AddressBook,
    },
    utils::DemoCheckoutArgs,
};

/// Checkout Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoCheckoutArgs::parse();

    let start = Instant::now();

    let fixture = Fixture::from_set(&args.fixture)?;
    let mut ledger = fixture.ledger()?;

    let mut addresses = AddressBook::new();
    addresses.create(
        "addr-1",
        Address {
            id: "addr-1".to_string(),
            recipient: "Jo Castle".to_string(),
            line1: "12 Harbour Way".to_string(),
            line2: None,
            city: "Portland".to_string(),
            postcode: "97201".to_string(),
            country: "US".to_string(),
        },
    )?;

    let address = addresses.fetch("addr-1")?.clone();

    let rates = FlatRateTable::new(ledger.currency(), "US")
        .with_rate(ShippingMethod::Standard, 500)
        .with_rate(ShippingMethod::Express, 1500)
        .with_rate(ShippingMethod::Collection, 0);

    let method: ShippingMethod = args.shipping.parse()?;
    ledger.update_shipping(rates.rate(&address, method)?)?;

    if let Some(code) = args.coupon.as_deref() {
        let mut coupons = CouponBook::new();
        coupons.insert("SAVE5", CouponOffer::new(OfferAmount::AmountOff(500)));
        coupons.insert(
            "TENPCT",
            CouponOffer::new(OfferAmount::PercentOff(Percentage::from(0.1))),
        );

        match coupons.validate(code, &ledger.subtotal()) {
            Ok(amount) => ledger.apply_coupon(code, amount)?,
            Err(rejection) => println!("coupon not applied: {rejection}"),
        }
    }

    let snapshot = ledger.snapshot()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_receipt(&mut handle, &snapshot)?;

    let payload = assemble(
        &ledger,
        &snapshot,
        fixture.products(),
        &address,
        &PaymentSelection::Saved {
            id: "pm-1".to_string(),
        },
        format!("demo-{}", args.fixture),
    )?;

    let mut gateway = RecordingGateway::new();
    let confirmation = gateway.submit(&payload)?;

    ledger.clear()?;

    let elapsed = start.elapsed();

    writeln!(
        handle,
        "\norder {} ({:?})",
        confirmation.order_id, confirmation.status
    )?;
    writeln!(
        handle,
        " {} ({}s)",
        elapsed.human(Truncate::Nano),
        elapsed.as_secs_f32()
    )?;

    Ok(())
}
