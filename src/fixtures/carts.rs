//! Cart Fixtures

use serde::Deserialize;

/// Wrapper for a cart in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Lines referencing products by fixture key
    pub lines: Vec<CartLineFixture>,
}

/// Cart Line Fixture
#[derive(Debug, Deserialize)]
pub struct CartLineFixture {
    /// Fixture key of the product
    pub product: String,

    /// Quantity, defaulting to 1
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Variant qualifiers, defaulting to none
    #[serde(default)]
    pub variant: Vec<String>,
}

fn default_quantity() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn cart_fixture_deserializes_with_defaults() -> TestResult {
        let yaml = "
lines:
  - product: soap
  - product: mug
    quantity: 2
    variant: [large, red]
";

        let fixture: CartFixture = serde_norway::from_str(yaml)?;

        assert_eq!(fixture.lines.len(), 2);
        assert_eq!(
            fixture.lines.first().map(|line| line.quantity),
            Some(1),
            "quantity defaults to 1"
        );
        assert_eq!(
            fixture.lines.get(1).map(|line| line.variant.len()),
            Some(2)
        );

        Ok(())
    }
}
