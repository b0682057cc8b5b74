//! Snapshots

use rusty_money::{Money, iso::Currency};

use crate::{products::ProductKey, variants::VariantKey};

/// One cart line frozen into a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotLine<'a> {
    /// Product the line refers to
    pub product: ProductKey,

    /// Variant qualifiers of the line
    pub variant: VariantKey,

    /// Display name frozen at add time
    pub name: String,

    /// Unit price frozen at add time
    pub unit_price: Money<'a, Currency>,

    /// Quantity on the line
    pub quantity: u32,

    /// Extended line total
    pub line_total: Money<'a, Currency>,
}

/// An immutable view of a ledger at a specific revision.
///
/// Snapshots are only created by [`Ledger::snapshot`](crate::ledger::Ledger::snapshot),
/// so the revision stamp always corresponds to a state the ledger actually
/// held. The checkout assembler compares this stamp against the live ledger to
/// refuse submitting totals the customer never saw.
#[derive(Debug, Clone)]
pub struct LedgerSnapshot<'a> {
    revision: u64,
    lines: Vec<SnapshotLine<'a>>,
    subtotal: Money<'a, Currency>,
    tax: Money<'a, Currency>,
    shipping: Money<'a, Currency>,
    discount: Money<'a, Currency>,
    coupon_code: Option<String>,
    total: Money<'a, Currency>,
    currency: &'static Currency,
}

impl<'a> LedgerSnapshot<'a> {
    #[expect(clippy::too_many_arguments, reason = "crate-internal constructor")]
    pub(crate) fn new(
        revision: u64,
        lines: Vec<SnapshotLine<'a>>,
        subtotal: Money<'a, Currency>,
        tax: Money<'a, Currency>,
        shipping: Money<'a, Currency>,
        discount: Money<'a, Currency>,
        coupon_code: Option<String>,
        total: Money<'a, Currency>,
        currency: &'static Currency,
    ) -> Self {
        Self {
            revision,
            lines,
            subtotal,
            tax,
            shipping,
            discount,
            coupon_code,
            total,
            currency,
        }
    }

    /// The ledger revision this snapshot was taken at.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The frozen cart lines.
    #[must_use]
    pub fn lines(&self) -> &[SnapshotLine<'a>] {
        &self.lines
    }

    /// Item subtotal at snapshot time.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Tax at snapshot time.
    #[must_use]
    pub fn tax(&self) -> Money<'a, Currency> {
        self.tax
    }

    /// Shipping at snapshot time.
    #[must_use]
    pub fn shipping(&self) -> Money<'a, Currency> {
        self.shipping
    }

    /// Discount at snapshot time.
    #[must_use]
    pub fn discount(&self) -> Money<'a, Currency> {
        self.discount
    }

    /// Active coupon code at snapshot time, if any.
    #[must_use]
    pub fn coupon_code(&self) -> Option<&str> {
        self.coupon_code.as_deref()
    }

    /// Grand total at snapshot time.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Currency used for all monetary values.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Check whether the snapshot holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
