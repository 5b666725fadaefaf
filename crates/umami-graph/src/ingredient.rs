//! Canonical ingredient tokens and the unordered pairs used as edge keys.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A canonical ingredient token.
///
/// Tokens are produced by a [`Canonicalizer`](crate::Canonicalizer) and
/// uniquely identify a node in the co-occurrence graph. Two raw strings that
/// canonicalize to the same token are the same ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ingredient(String);

impl Ingredient {
    /// Create a token, trimming surrounding whitespace.
    ///
    /// Returns `None` when nothing is left after trimming; an empty token is
    /// never a valid node.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.len() == token.len() {
            Some(Self(token))
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token, returning the owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ingredient {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Ingredient {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Unordered pair of distinct ingredients, stored in sorted order so that
/// `(a, b)` and `(b, a)` produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IngredientPair {
    low: Ingredient,
    high: Ingredient,
}

impl IngredientPair {
    /// Build the sorted pair. Returns `None` for a self pair.
    pub fn new(a: Ingredient, b: Ingredient) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The lexically smaller endpoint.
    pub fn first(&self) -> &Ingredient {
        &self.low
    }

    /// The lexically larger endpoint.
    pub fn second(&self) -> &Ingredient {
        &self.high
    }

    pub fn contains(&self, ingredient: &str) -> bool {
        self.low.as_str() == ingredient || self.high.as_str() == ingredient
    }

    pub fn into_parts(self) -> (Ingredient, Ingredient) {
        (self.low, self.high)
    }
}

impl fmt::Display for IngredientPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {}", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ing(token: &str) -> Ingredient {
        Ingredient::new(token).unwrap()
    }

    #[test]
    fn test_ingredient_trims_whitespace() {
        assert_eq!(ing("  beef ").as_str(), "beef");
    }

    #[test]
    fn test_ingredient_rejects_empty() {
        assert!(Ingredient::new("").is_none());
        assert!(Ingredient::new("   ").is_none());
        assert!(Ingredient::new("\u{3000}").is_none());
    }

    #[test]
    fn test_pair_is_order_independent() {
        let ab = IngredientPair::new(ing("beef"), ing("rice")).unwrap();
        let ba = IngredientPair::new(ing("rice"), ing("beef")).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.first().as_str(), "beef");
        assert_eq!(ab.second().as_str(), "rice");
    }

    #[test]
    fn test_pair_rejects_self_loop() {
        assert!(IngredientPair::new(ing("salt"), ing("salt")).is_none());
    }

    #[test]
    fn test_pair_contains() {
        let pair = IngredientPair::new(ing("onion"), ing("beef")).unwrap();
        assert!(pair.contains("onion"));
        assert!(pair.contains("beef"));
        assert!(!pair.contains("rice"));
        assert_eq!(pair.to_string(), "beef -- onion");
    }
}
