//! Ledger
//!
//! The authoritative in-memory cart for a single order in progress. Every
//! mutation rederives subtotal, tax and total before returning, so no caller
//! can observe totals that disagree with the items.

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    items::LineItem,
    pricing::{self, PricingError},
    products::ProductKey,
    snapshot::{LedgerSnapshot, SnapshotLine},
    variants::VariantKey,
};

/// The standard tax rate applied to the item subtotal (10%).
#[must_use]
pub fn standard_tax_rate() -> Percentage {
    Percentage::from(0.1)
}

/// Errors related to cart mutation or totals.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// An amount's currency differs from the ledger currency (amount currency, ledger currency).
    #[error("amount has currency {0}, but ledger has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// A line item was added with a quantity of zero.
    #[error("line item quantity must be at least 1")]
    ZeroQuantity,

    /// A negative amount was supplied as a discount.
    #[error("discount must not be negative, got {0} minor units")]
    NegativeDiscount(i64),

    /// A negative amount was supplied as shipping.
    #[error("shipping must not be negative, got {0} minor units")]
    NegativeShipping(i64),

    /// Errors bubbled up from totals derivation.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Ledger
///
/// Holds the ordered line items of an active cart together with the derived
/// monetary fields. Validation failures reject the mutation and leave the
/// ledger unchanged; the only post-validation failure is minor-unit overflow
/// during rederivation, after which the cart should be discarded.
#[derive(Debug)]
pub struct Ledger<'a> {
    items: Vec<LineItem<'a>>,
    tax_rate: Percentage,
    subtotal: Money<'a, Currency>,
    tax: Money<'a, Currency>,
    shipping: Money<'a, Currency>,
    discount: Money<'a, Currency>,
    coupon_code: Option<String>,
    total: Money<'a, Currency>,
    currency: &'static Currency,
    revision: u64,
}

impl<'a> Ledger<'a> {
    /// Create an empty ledger at the standard tax rate.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self::with_tax_rate(currency, standard_tax_rate())
    }

    /// Create an empty ledger with an explicit tax rate.
    #[must_use]
    pub fn with_tax_rate(currency: &'static Currency, tax_rate: Percentage) -> Self {
        let zero = Money::from_minor(0, currency);

        Ledger {
            items: Vec::new(),
            tax_rate,
            subtotal: zero,
            tax: zero,
            shipping: zero,
            discount: zero,
            coupon_code: None,
            total: zero,
            currency,
            revision: 0,
        }
    }

    /// Add a line item to the cart.
    ///
    /// If an entry with the same product and variant qualifiers already
    /// exists, its quantity is incremented by the incoming quantity and the
    /// existing entry's frozen unit price is kept; otherwise the item is
    /// appended. The unit price is whatever the caller supplied; the ledger
    /// never looks prices up.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::ZeroQuantity`]: the item's quantity is zero.
    /// - [`LedgerError::CurrencyMismatch`]: the item's price is in another currency.
    /// - [`LedgerError::Pricing`]: rederiving the totals failed.
    pub fn add_item(&mut self, item: LineItem<'a>) -> Result<(), LedgerError> {
        if item.quantity() == 0 {
            return Err(LedgerError::ZeroQuantity);
        }

        self.ensure_currency(item.unit_price())?;

        match self
            .items
            .iter_mut()
            .find(|line| line.merges_with(item.product(), item.variant()))
        {
            Some(line) => line.add_quantity(item.quantity()),
            None => self.items.push(item),
        }

        self.rederive()
    }

    /// Remove the entry matching `product` and `variant` from the cart.
    ///
    /// Removing an absent entry is a no-op, not an error: cart UIs commonly
    /// race removal against a re-render.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Pricing`] if rederiving the totals failed.
    pub fn remove_item(
        &mut self,
        product: ProductKey,
        variant: &VariantKey,
    ) -> Result<(), LedgerError> {
        let before = self.items.len();

        self.items
            .retain(|line| !line.merges_with(product, variant));

        if self.items.len() == before {
            return Ok(());
        }

        self.rederive()
    }

    /// Set the quantity of the entry matching `product` and `variant`.
    ///
    /// The quantity is set directly, not added. Setting it to zero removes the
    /// entry, matching cart-stepper behaviour. An absent entry is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Pricing`] if rederiving the totals failed.
    pub fn update_quantity(
        &mut self,
        product: ProductKey,
        variant: &VariantKey,
        quantity: u32,
    ) -> Result<(), LedgerError> {
        if quantity == 0 {
            return self.remove_item(product, variant);
        }

        let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.merges_with(product, variant))
        else {
            return Ok(());
        };

        line.set_quantity(quantity);

        self.rederive()
    }

    /// Apply a coupon with a pre-validated discount amount.
    ///
    /// Coupon legitimacy is established by the coupon collaborator before this
    /// is called; the ledger trusts the amount it is given. Only one coupon is
    /// ever active: re-applying overwrites the previous discount entirely.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NegativeDiscount`]: the amount is negative.
    /// - [`LedgerError::CurrencyMismatch`]: the amount is in another currency.
    /// - [`LedgerError::Pricing`]: rederiving the totals failed.
    pub fn apply_coupon(
        &mut self,
        code: impl Into<String>,
        amount: Money<'a, Currency>,
    ) -> Result<(), LedgerError> {
        let minor = amount.to_minor_units();

        if minor < 0 {
            return Err(LedgerError::NegativeDiscount(minor));
        }

        self.ensure_currency(&amount)?;

        self.discount = amount;
        self.coupon_code = Some(code.into());

        self.rederive()
    }

    /// Remove any active coupon, resetting the discount to zero.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Pricing`] if rederiving the totals failed.
    pub fn remove_coupon(&mut self) -> Result<(), LedgerError> {
        self.discount = Money::from_minor(0, self.currency);
        self.coupon_code = None;

        self.rederive()
    }

    /// Set the shipping cost supplied by the shipping-rate collaborator.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NegativeShipping`]: the amount is negative.
    /// - [`LedgerError::CurrencyMismatch`]: the amount is in another currency.
    /// - [`LedgerError::Pricing`]: rederiving the totals failed.
    pub fn update_shipping(&mut self, amount: Money<'a, Currency>) -> Result<(), LedgerError> {
        let minor = amount.to_minor_units();

        if minor < 0 {
            return Err(LedgerError::NegativeShipping(minor));
        }

        self.ensure_currency(&amount)?;

        self.shipping = amount;

        self.rederive()
    }

    /// Empty the cart and reset every amount and the coupon.
    ///
    /// Used after a successful order submission.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Pricing`] if rederiving the totals failed
    /// (cannot happen for an emptied cart; the signature matches the other
    /// mutations).
    pub fn clear(&mut self) -> Result<(), LedgerError> {
        self.items.clear();
        self.shipping = Money::from_minor(0, self.currency);
        self.discount = Money::from_minor(0, self.currency);
        self.coupon_code = None;

        self.rederive()
    }

    /// Take an immutable snapshot of the cart at its current revision.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Pricing`] if a line total cannot be derived.
    pub fn snapshot(&self) -> Result<LedgerSnapshot<'a>, LedgerError> {
        let lines = self
            .items
            .iter()
            .map(|item| {
                Ok(SnapshotLine {
                    product: item.product(),
                    variant: item.variant().clone(),
                    name: item.name().to_string(),
                    unit_price: *item.unit_price(),
                    quantity: item.quantity(),
                    line_total: item.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, PricingError>>()?;

        Ok(LedgerSnapshot::new(
            self.revision,
            lines,
            self.subtotal,
            self.tax,
            self.shipping,
            self.discount,
            self.coupon_code.clone(),
            self.total,
            self.currency,
        ))
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem<'a>] {
        &self.items
    }

    /// The derived item subtotal.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// The derived tax.
    #[must_use]
    pub fn tax(&self) -> Money<'a, Currency> {
        self.tax
    }

    /// The externally supplied shipping cost.
    #[must_use]
    pub fn shipping(&self) -> Money<'a, Currency> {
        self.shipping
    }

    /// The active coupon discount.
    #[must_use]
    pub fn discount(&self) -> Money<'a, Currency> {
        self.discount
    }

    /// The active coupon code, if any.
    #[must_use]
    pub fn coupon_code(&self) -> Option<&str> {
        self.coupon_code.as_deref()
    }

    /// The derived grand total.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// The tax rate applied to the item subtotal.
    #[must_use]
    pub fn tax_rate(&self) -> Percentage {
        self.tax_rate
    }

    /// The currency of the ledger.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The revision counter, bumped on every state-changing mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The number of line items in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the cart holds no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn ensure_currency(&self, amount: &Money<'_, Currency>) -> Result<(), LedgerError> {
        let currency = amount.currency();

        if currency == self.currency {
            Ok(())
        } else {
            Err(LedgerError::CurrencyMismatch(
                currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ))
        }
    }

    /// Rederive every dependent field from the items and supplied amounts.
    ///
    /// All three deriveds are computed before any is assigned, so a failure
    /// never leaves them disagreeing with each other.
    fn rederive(&mut self) -> Result<(), LedgerError> {
        let subtotal = pricing::subtotal(&self.items, self.currency)?;
        let tax = pricing::tax_on(&subtotal, &self.tax_rate)?;
        let total = pricing::grand_total(&subtotal, &self.shipping, &tax, &self.discount)?;

        self.subtotal = subtotal;
        self.tax = tax;
        self.total = total;
        self.revision += 1;

        Ok(())
    }
}
