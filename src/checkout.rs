//! Checkout
//!
//! The submission assembler: composes a ledger snapshot with a selected
//! address and payment into an immutable order payload. No totals are
//! recomputed here: the payload carries exactly the amounts the customer was
//! shown, and a snapshot that no longer matches the live ledger is refused.

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    ledger::Ledger,
    products::{Product, ProductKey},
    snapshot::LedgerSnapshot,
};

/// Errors from payload assembly.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// The snapshot predates the ledger's latest mutation.
    #[error("snapshot at revision {snapshot} is stale; ledger is at revision {ledger}")]
    StaleSnapshot {
        /// Revision the snapshot was taken at.
        snapshot: u64,
        /// Current ledger revision.
        ledger: u64,
    },

    /// A snapshot line's product is missing from the catalog.
    #[error("missing product")]
    MissingProduct(ProductKey),

    /// The snapshot holds no lines.
    #[error("refusing to assemble a payload for an empty cart")]
    EmptyOrder,
}

/// A saved delivery address, referenced by opaque id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Opaque record id
    pub id: String,

    /// Recipient name
    pub recipient: String,

    /// First address line
    pub line1: String,

    /// Second address line, if any
    pub line2: Option<String>,

    /// City
    pub city: String,

    /// Postal code
    pub postcode: String,

    /// ISO country code
    pub country: String,
}

/// A saved payment method, referenced by opaque id.
///
/// Only display-safe card data is ever held client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Opaque record id
    pub id: String,

    /// Cardholder name
    pub holder: String,

    /// Last four digits of the card number
    pub last4: String,

    /// Expiry in MM/YY form
    pub expiry: String,
}

/// The payment instrument selected at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaymentSelection {
    /// A saved payment method, by record id.
    Saved {
        /// Opaque record id of the saved method
        id: String,
    },

    /// A newly entered card, not yet saved.
    NewCard {
        /// Cardholder name
        holder: String,

        /// Last four digits of the card number
        last4: String,

        /// Expiry in MM/YY form
        expiry: String,
    },
}

/// One line of an order payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadLine {
    /// External product identifier
    pub sku: String,

    /// Display name frozen at add time
    pub name: String,

    /// Variant qualifiers, sorted
    pub variant: Vec<String>,

    /// Unit price in minor units
    pub unit_price_minor: i64,

    /// Quantity ordered
    pub quantity: u32,

    /// Extended line total in minor units
    pub line_total_minor: i64,
}

/// The immutable order submission payload.
///
/// Amounts are carried in minor units of `currency`; they are copied verbatim
/// from the snapshot the customer confirmed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPayload {
    /// Client-generated idempotency marker
    pub idempotency_key: String,

    /// ISO alpha code of the order currency
    pub currency: String,

    /// Ordered lines
    pub lines: Vec<PayloadLine>,

    /// Item subtotal in minor units
    pub subtotal_minor: i64,

    /// Tax in minor units
    pub tax_minor: i64,

    /// Shipping in minor units
    pub shipping_minor: i64,

    /// Coupon discount in minor units
    pub discount_minor: i64,

    /// Applied coupon code, if any
    pub coupon_code: Option<String>,

    /// Grand total in minor units
    pub total_minor: i64,

    /// Selected delivery address, by record id
    pub address_id: String,

    /// Selected payment instrument
    pub payment: PaymentSelection,
}

/// Assemble an order payload from a ledger snapshot.
///
/// SKUs are resolved from `products`; everything monetary is copied from the
/// snapshot without recomputation, so the submitted totals cannot drift from
/// what was rendered.
///
/// # Errors
///
/// - [`CheckoutError::StaleSnapshot`]: the ledger has mutated since the
///   snapshot was taken.
/// - [`CheckoutError::EmptyOrder`]: the snapshot holds no lines.
/// - [`CheckoutError::MissingProduct`]: a line's product is absent from the
///   catalog.
pub fn assemble<'a>(
    ledger: &Ledger<'a>,
    snapshot: &LedgerSnapshot<'a>,
    products: &SlotMap<ProductKey, Product<'a>>,
    address: &Address,
    payment: &PaymentSelection,
    idempotency_key: impl Into<String>,
) -> Result<OrderPayload, CheckoutError> {
    if snapshot.revision() != ledger.revision() {
        return Err(CheckoutError::StaleSnapshot {
            snapshot: snapshot.revision(),
            ledger: ledger.revision(),
        });
    }

    if snapshot.is_empty() {
        return Err(CheckoutError::EmptyOrder);
    }

    let lines = snapshot
        .lines()
        .iter()
        .map(|line| {
            let product = products
                .get(line.product)
                .ok_or(CheckoutError::MissingProduct(line.product))?;

            Ok(PayloadLine {
                sku: product.sku.clone(),
                name: line.name.clone(),
                variant: line.variant.qualifiers().to_vec(),
                unit_price_minor: line.unit_price.to_minor_units(),
                quantity: line.quantity,
                line_total_minor: line.line_total.to_minor_units(),
            })
        })
        .collect::<Result<Vec<_>, CheckoutError>>()?;

    Ok(OrderPayload {
        idempotency_key: idempotency_key.into(),
        currency: snapshot.currency().iso_alpha_code.to_string(),
        lines,
        subtotal_minor: snapshot.subtotal().to_minor_units(),
        tax_minor: snapshot.tax().to_minor_units(),
        shipping_minor: snapshot.shipping().to_minor_units(),
        discount_minor: snapshot.discount().to_minor_units(),
        coupon_code: snapshot.coupon_code().map(ToString::to_string),
        total_minor: snapshot.total().to_minor_units(),
        address_id: address.id.clone(),
        payment: payment.clone(),
    })
}
