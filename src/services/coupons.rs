//! Coupon Validation
//!
//! Coupon legitimacy is established here, outside the ledger: the ledger only
//! ever receives the resulting discount amount via
//! [`Ledger::apply_coupon`](crate::ledger::Ledger::apply_coupon).

use decimal_percentage::Percentage;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::pricing::{self, PricingError};

/// Reasons a coupon code is refused.
#[derive(Debug, Error, PartialEq)]
pub enum CouponRejection {
    /// The code is not recognised.
    #[error("coupon code {0:?} is not recognised")]
    UnknownCode(String),

    /// The code exists but is no longer redeemable.
    #[error("coupon code {0:?} has expired")]
    Expired(String),

    /// The cart subtotal is below the offer's minimum spend.
    #[error("subtotal of {subtotal} minor units is below the {required} minimum for this coupon")]
    MinimumSpendNotMet {
        /// Minimum subtotal the offer requires, in minor units.
        required: i64,
        /// Current cart subtotal, in minor units.
        subtotal: i64,
    },

    /// Errors bubbled up from discount derivation.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Validates a coupon code against the current cart subtotal.
pub trait CouponService {
    /// Resolve `code` to a discount amount for a cart at `subtotal`.
    ///
    /// # Errors
    ///
    /// Returns a [`CouponRejection`] explaining why the code cannot be
    /// redeemed.
    fn validate<'a>(
        &self,
        code: &str,
        subtotal: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, CouponRejection>;
}

/// The discount an offer grants once its conditions are met.
#[derive(Debug, Clone, Copy)]
pub enum OfferAmount {
    /// Subtract a fixed amount, in minor units of the cart currency.
    AmountOff(i64),

    /// Subtract a percentage of the cart subtotal.
    PercentOff(Percentage),
}

/// A single redeemable offer.
#[derive(Debug, Clone)]
pub struct CouponOffer {
    amount: OfferAmount,
    min_subtotal_minor: i64,
    redeemable: bool,
}

impl CouponOffer {
    /// Create an offer with no minimum spend.
    #[must_use]
    pub fn new(amount: OfferAmount) -> Self {
        Self {
            amount,
            min_subtotal_minor: 0,
            redeemable: true,
        }
    }

    /// Require a minimum cart subtotal, in minor units.
    #[must_use]
    pub fn with_minimum_spend(mut self, minor: i64) -> Self {
        self.min_subtotal_minor = minor;
        self
    }

    /// Mark the offer as expired.
    #[must_use]
    pub fn expired(mut self) -> Self {
        self.redeemable = false;
        self
    }
}

/// In-memory [`CouponService`] keyed by coupon code.
#[derive(Debug, Default)]
pub struct CouponBook {
    offers: FxHashMap<String, CouponOffer>,
}

impl CouponBook {
    /// Create an empty coupon book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an offer under `code`, replacing any previous offer.
    pub fn insert(&mut self, code: impl Into<String>, offer: CouponOffer) {
        self.offers.insert(code.into(), offer);
    }
}

impl CouponService for CouponBook {
    fn validate<'a>(
        &self,
        code: &str,
        subtotal: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, CouponRejection> {
        let offer = self
            .offers
            .get(code)
            .ok_or_else(|| CouponRejection::UnknownCode(code.to_string()))?;

        if !offer.redeemable {
            return Err(CouponRejection::Expired(code.to_string()));
        }

        let subtotal_minor = subtotal.to_minor_units();

        if subtotal_minor < offer.min_subtotal_minor {
            return Err(CouponRejection::MinimumSpendNotMet {
                required: offer.min_subtotal_minor,
                subtotal: subtotal_minor,
            });
        }

        let discount_minor = match offer.amount {
            OfferAmount::AmountOff(minor) => minor,
            OfferAmount::PercentOff(percent) => {
                pricing::percent_of_minor(&percent, subtotal_minor)?
            }
        };

        Ok(Money::from_minor(discount_minor, subtotal.currency()))
    }
}
