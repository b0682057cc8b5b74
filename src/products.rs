//! Products

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Product
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Stable external identifier, carried into order payloads
    pub sku: String,

    /// Product name
    pub name: String,

    /// Image URL shown in cart and order views
    pub image: Option<String>,

    /// Product price
    pub price: Money<'a, Currency>,
}
