//! Fixtures
//!
//! YAML-defined catalog and cart sets for tests and demos. A set pairs a
//! product catalog (`fixtures/products/<name>.yml`) with a cart
//! (`fixtures/carts/<name>.yml`) referencing it by product key.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    fixtures::{carts::CartFixture, products::ProductsFixture},
    items::LineItem,
    ledger::{Ledger, LedgerError},
    products::{Product, ProductKey},
    variants::VariantKey,
};

pub mod carts;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// Currency mismatch between products
    #[error("currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("no products loaded yet; currency unknown")]
    NoCurrency,

    /// Ledger construction error
    #[error("failed to build ledger: {0}")]
    Ledger(#[from] LedgerError),
}

/// A cart line resolved against the loaded catalog.
#[derive(Debug, Clone)]
struct ResolvedLine {
    product: ProductKey,
    quantity: u32,
    variant: VariantKey,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog keyed by generated product key
    products: SlotMap<ProductKey, Product<'a>>,

    /// Fixture key -> product key lookup
    product_keys: FxHashMap<String, ProductKey>,

    /// Cart lines resolved against the catalog
    cart_lines: Vec<ResolvedLine>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with the default base path.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: SlotMap::with_key(),
            product_keys: FxHashMap::default(),
            cart_lines: Vec::new(),
            currency: None,
        }
    }

    /// Load a product catalog from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if products
    /// mix currencies.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for (key, product_fixture) in fixture.products {
            let product = product_fixture.into_product(key.clone())?;
            let currency = product.price.currency();

            if let Some(existing) = self.currency {
                if existing != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            let product_key = self.products.insert(product);
            self.product_keys.insert(key, product_key);
        }

        Ok(self)
    }

    /// Load a cart from a YAML fixture file, resolving it against the loaded
    /// catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a line
    /// references an unknown product.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        for line in fixture.lines {
            let product = *self
                .product_keys
                .get(&line.product)
                .ok_or_else(|| FixtureError::ProductNotFound(line.product.clone()))?;

            let qualifiers: Vec<&str> = line.variant.iter().map(String::as_str).collect();

            self.cart_lines.push(ResolvedLine {
                product,
                quantity: line.quantity,
                variant: VariantKey::from_strs(&qualifiers),
            });
        }

        Ok(self)
    }

    /// Load a complete fixture set (products and cart with the same name).
    ///
    /// # Errors
    ///
    /// Returns an error if either fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?.load_cart(name)?;

        Ok(fixture)
    }

    /// Build a ledger populated with the fixture's cart lines.
    ///
    /// # Errors
    ///
    /// Returns an error if no products are loaded or a line cannot be added.
    pub fn ledger(&self) -> Result<Ledger<'a>, FixtureError> {
        let currency = self.currency.ok_or(FixtureError::NoCurrency)?;
        let mut ledger = Ledger::new(currency);

        for line in &self.cart_lines {
            let product = self
                .products
                .get(line.product)
                .ok_or_else(|| FixtureError::ProductNotFound(format!("{:?}", line.product)))?;

            let mut item = LineItem::with_variant(
                line.product,
                line.variant.clone(),
                product.name.clone(),
                product.price,
                line.quantity,
            );

            if let Some(image) = &product.image {
                item = item.with_image(image.clone());
            }

            ledger.add_item(item)?;
        }

        Ok(ledger)
    }

    /// The loaded catalog keyed by product key.
    #[must_use]
    pub fn products(&self) -> &SlotMap<ProductKey, Product<'a>> {
        &self.products
    }

    /// Look up the product key for a fixture key.
    #[must_use]
    pub fn product_key(&self, key: &str) -> Option<ProductKey> {
        self.product_keys.get(key).copied()
    }

    /// The currency of the fixture set, if products are loaded.
    #[must_use]
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
