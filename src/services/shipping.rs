//! Shipping Rates
//!
//! The ledger never computes shipping itself; a rate service resolves the cost
//! for a selected address and method, and the caller feeds the result into
//! [`Ledger::update_shipping`](crate::ledger::Ledger::update_shipping).

use std::str::FromStr;

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::checkout::Address;

/// Errors from shipping rate resolution.
#[derive(Debug, Error, PartialEq)]
pub enum ShippingRateError {
    /// The method is not offered by this rate table.
    #[error("shipping method {0:?} is not available")]
    MethodUnavailable(ShippingMethod),

    /// The method name could not be parsed.
    #[error("unknown shipping method name {0:?}")]
    UnknownMethod(String),
}

/// Delivery method selected at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingMethod {
    /// Tracked delivery, several working days.
    Standard,

    /// Next-day delivery.
    Express,

    /// Collection from a pickup point, free of charge.
    Collection,
}

impl FromStr for ShippingMethod {
    type Err = ShippingRateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(ShippingMethod::Standard),
            "express" => Ok(ShippingMethod::Express),
            "collection" => Ok(ShippingMethod::Collection),
            other => Err(ShippingRateError::UnknownMethod(other.to_string())),
        }
    }
}

/// Resolves the shipping cost for a selected address and method.
pub trait ShippingRateService {
    /// Look up the rate for delivering to `address` via `method`.
    ///
    /// # Errors
    ///
    /// Returns a [`ShippingRateError`] if the method is unavailable.
    fn rate(
        &self,
        address: &Address,
        method: ShippingMethod,
    ) -> Result<Money<'static, Currency>, ShippingRateError>;
}

/// In-memory [`ShippingRateService`] with one flat rate per method and a
/// surcharge for addresses outside the home country.
#[derive(Debug)]
pub struct FlatRateTable {
    currency: &'static Currency,
    home_country: String,
    rates: FxHashMap<ShippingMethod, i64>,
    international_surcharge_minor: i64,
}

impl FlatRateTable {
    /// Create a rate table with no methods registered.
    #[must_use]
    pub fn new(currency: &'static Currency, home_country: impl Into<String>) -> Self {
        Self {
            currency,
            home_country: home_country.into(),
            rates: FxHashMap::default(),
            international_surcharge_minor: 0,
        }
    }

    /// Register a flat rate for a method, in minor units.
    #[must_use]
    pub fn with_rate(mut self, method: ShippingMethod, minor: i64) -> Self {
        self.rates.insert(method, minor);
        self
    }

    /// Add a surcharge for addresses outside the home country, in minor units.
    #[must_use]
    pub fn with_international_surcharge(mut self, minor: i64) -> Self {
        self.international_surcharge_minor = minor;
        self
    }
}

impl ShippingRateService for FlatRateTable {
    fn rate(
        &self,
        address: &Address,
        method: ShippingMethod,
    ) -> Result<Money<'static, Currency>, ShippingRateError> {
        let base = *self
            .rates
            .get(&method)
            .ok_or(ShippingRateError::MethodUnavailable(method))?;

        let surcharge = if address.country == self.home_country {
            0
        } else {
            self.international_surcharge_minor
        };

        Ok(Money::from_minor(
            base.saturating_add(surcharge),
            self.currency,
        ))
    }
}
