//! Product Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{fixtures::FixtureError, products::Product};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of fixture key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Image URL shown in cart and order views
    #[serde(default)]
    pub image: Option<String>,

    /// Product price (e.g., "2.99 USD")
    pub price: String,
}

impl ProductFixture {
    /// Convert into a catalog product, taking the fixture key as the SKU.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the price string cannot be parsed.
    pub fn into_product(self, sku: String) -> Result<Product<'static>, FixtureError> {
        let (minor_units, currency) = parse_price(&self.price)?;

        Ok(Product {
            sku,
            name: self.name,
            image: self.image,
            price: Money::from_minor(minor_units, currency),
        })
    }
}

/// Parse a price string (e.g., "2.99 USD") into minor units and a currency.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if
/// the amount cannot be parsed as a decimal, or if the currency code is not
/// recognised.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let Some((amount, code)) = s.trim().split_once(' ') else {
        return Err(FixtureError::InvalidPrice(format!(
            "expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match code.trim() {
        "USD" => USD,
        "GBP" => GBP,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}
