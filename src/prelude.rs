//! Tally prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    checkout::{
        Address, CheckoutError, OrderPayload, PayloadLine, PaymentMethod, PaymentSelection,
        assemble,
    },
    fixtures::{Fixture, FixtureError},
    items::LineItem,
    ledger::{Ledger, LedgerError, standard_tax_rate},
    pricing::PricingError,
    products::{Product, ProductKey},
    receipt::{ReceiptError, write_receipt},
    services::{
        coupons::{CouponBook, CouponOffer, CouponRejection, CouponService, OfferAmount},
        orders::{OrderConfirmation, OrderGateway, OrderStatus, RecordingGateway, SubmitError},
        shipping::{FlatRateTable, ShippingMethod, ShippingRateError, ShippingRateService},
        store::{AddressBook, RecordStore, StoreError, Wallet},
    },
    snapshot::{LedgerSnapshot, SnapshotLine},
    variants::VariantKey,
};
