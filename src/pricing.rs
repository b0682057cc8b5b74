//! Pricing
//!
//! Shared helpers for deriving cart totals. All arithmetic happens in whole
//! minor units (pence/cents); percentages go through [`rust_decimal`] and round
//! half-away-from-zero before re-entering minor units.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::items::LineItem;

/// Errors that can occur while deriving totals.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// An amount left the representable minor-unit range.
    #[error("amount overflowed the representable minor-unit range")]
    AmountOverflow,

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculate the item subtotal for a set of line items.
///
/// An empty slice yields a zero subtotal in the given currency.
///
/// # Errors
///
/// - [`PricingError::AmountOverflow`]: a line total left the minor-unit range.
/// - [`PricingError::Money`]: money arithmetic or currency mismatch error.
pub fn subtotal<'a>(
    items: &[LineItem<'a>],
    currency: &'static Currency,
) -> Result<Money<'a, Currency>, PricingError> {
    items
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, item| {
            Ok(acc.add(item.line_total()?)?)
        })
}

/// Calculate a percentage of an amount in minor units.
///
/// Rounds to whole minor units, half away from zero.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the calculation overflows or
/// cannot be safely represented.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // `decimal_percentage` does not expose its inner Decimal
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::PercentConversion)
}

/// Calculate the tax due on a subtotal at the given rate.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the rate cannot be applied
/// within the minor-unit range.
pub fn tax_on<'a>(
    subtotal: &Money<'a, Currency>,
    rate: &Percentage,
) -> Result<Money<'a, Currency>, PricingError> {
    let tax_minor = percent_of_minor(rate, subtotal.to_minor_units())?;

    Ok(Money::from_minor(tax_minor, subtotal.currency()))
}

/// Combine the derived and supplied amounts into the grand total.
///
/// `total = subtotal + shipping + tax - discount`, clamped at zero: a discount
/// worth more than the rest of the order never produces a negative amount due.
///
/// # Errors
///
/// Returns [`PricingError::Money`] if money arithmetic fails (for example, due
/// to a currency mismatch between the amounts).
pub fn grand_total<'a>(
    subtotal: &Money<'a, Currency>,
    shipping: &Money<'a, Currency>,
    tax: &Money<'a, Currency>,
    discount: &Money<'a, Currency>,
) -> Result<Money<'a, Currency>, PricingError> {
    let combined = subtotal.add(*shipping)?.add(*tax)?.sub(*discount)?;

    Ok(Money::from_minor(
        0.max(combined.to_minor_units()),
        subtotal.currency(),
    ))
}
