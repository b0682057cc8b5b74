//! Variant Qualifiers
//!
//! A line item may be qualified by variant attributes such as size or colour.
//! Two entries for the same product merge only when their qualifier sets match.

use smallvec::SmallVec;

/// A normalised set of variant qualifiers for a line item.
///
/// Qualifiers are sorted and deduplicated on construction, so equality is
/// independent of the order the caller supplied them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VariantKey {
    qualifiers: SmallVec<[String; 3]>,
}

impl VariantKey {
    /// Create a variant key from qualifier strings.
    #[must_use]
    pub fn new(qualifiers: SmallVec<[String; 3]>) -> Self {
        let mut key = Self { qualifiers };

        key.qualifiers.sort();
        key.qualifiers.dedup();

        key
    }

    /// Create a variant key from string slices.
    pub fn from_strs(qualifiers: &[&str]) -> Self {
        Self::new(
            qualifiers
                .iter()
                .map(ToString::to_string)
                .collect::<SmallVec<[String; 3]>>(),
        )
    }

    /// The key for an unqualified (base) product.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Check whether the key carries no qualifiers.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.qualifiers.is_empty()
    }

    /// The qualifiers in sorted order.
    #[must_use]
    pub fn qualifiers(&self) -> &[String] {
        &self.qualifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_order_independent() {
        let left = VariantKey::from_strs(&["large", "red"]);
        let right = VariantKey::from_strs(&["red", "large"]);

        assert_eq!(left, right);
    }

    #[test]
    fn duplicates_collapse() {
        let key = VariantKey::from_strs(&["red", "red", "large"]);

        assert_eq!(key.qualifiers(), ["large", "red"]);
    }

    #[test]
    fn none_is_empty() {
        assert!(VariantKey::none().is_none());
        assert!(!VariantKey::from_strs(&["red"]).is_none());
    }

    #[test]
    fn differs_from_base_product() {
        assert_ne!(VariantKey::from_strs(&["red"]), VariantKey::none());
    }
}
