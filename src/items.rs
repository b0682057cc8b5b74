//! Line Items

use rusty_money::{Money, iso::Currency};

use crate::{pricing::PricingError, products::ProductKey, variants::VariantKey};

/// One cart entry: a product (optionally variant-qualified) with a positive
/// quantity and a unit price frozen at the time it was added.
///
/// The display metadata (`name`, `image`) takes no part in any computation;
/// it is carried so snapshots and payloads can be rendered without re-querying
/// the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    product: ProductKey,
    variant: VariantKey,
    name: String,
    image: Option<String>,
    unit_price: Money<'a, Currency>,
    quantity: u32,
}

impl<'a> LineItem<'a> {
    /// Creates a new unqualified line item.
    #[must_use]
    pub fn new(
        product: ProductKey,
        name: impl Into<String>,
        unit_price: Money<'a, Currency>,
        quantity: u32,
    ) -> Self {
        Self::with_variant(product, VariantKey::none(), name, unit_price, quantity)
    }

    /// Creates a new line item with the given variant qualifiers.
    pub fn with_variant(
        product: ProductKey,
        variant: VariantKey,
        name: impl Into<String>,
        unit_price: Money<'a, Currency>,
        quantity: u32,
    ) -> Self {
        Self {
            product,
            variant,
            name: name.into(),
            image: None,
            unit_price,
            quantity,
        }
    }

    /// Attach an image URL for cart and order views.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Returns the product of the line item.
    pub fn product(&self) -> ProductKey {
        self.product
    }

    /// Returns the variant qualifiers of the line item.
    pub fn variant(&self) -> &VariantKey {
        &self.variant
    }

    /// Returns the display name of the line item.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the image URL of the line item, if any.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Returns the frozen unit price of the line item.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Returns the quantity of the line item.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Check whether another entry for `product`/`variant` merges into this one.
    pub fn merges_with(&self, product: ProductKey, variant: &VariantKey) -> bool {
        self.product == product && self.variant == *variant
    }

    /// Calculate the extended total for this line.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::AmountOverflow`] if the extended total leaves
    /// the minor-unit range.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, PricingError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or(PricingError::AmountOverflow)?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub(crate) fn add_quantity(&mut self, quantity: u32) {
        self.quantity = self.quantity.saturating_add(quantity);
    }
}
