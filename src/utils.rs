//! Utils

use clap::Parser;

/// Arguments for the checkout demo
#[derive(Debug, Parser)]
pub struct DemoCheckoutArgs {
    /// Fixture set to use for the catalog and cart
    #[clap(short, long, default_value = "market")]
    pub fixture: String,

    /// Coupon code to apply at checkout
    #[clap(short, long)]
    pub coupon: Option<String>,

    /// Shipping method (standard, express, collection)
    #[clap(short, long, default_value = "standard")]
    pub shipping: String,
}
