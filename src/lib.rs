//! Tally
//!
//! Tally is an in-memory checkout cart and order totals engine written in Rust.
//!
//! The [`ledger::Ledger`] holds the line items of an order in progress and
//! rederives subtotal, tax and total on every mutation; [`checkout::assemble`]
//! turns a confirmed [`snapshot::LedgerSnapshot`] into an order submission
//! payload. External collaborators (coupon validation, shipping rates, saved
//! records, the order endpoint) live behind the seams in [`services`].

pub mod checkout;
pub mod fixtures;
pub mod items;
pub mod ledger;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod services;
pub mod snapshot;
pub mod utils;
pub mod variants;
