//! Cache keys.
//!
//! The default identity of a cached graph is the requested corpus size.
//! Content keys add a BLAKE3 fingerprint of the corpus so that a corpus of
//! the same size with different recipes gets its own entry.

use std::fmt;

use blake3::Hasher;
use serde::{Deserialize, Serialize};

use crate::Recipe;

/// How cache keys are derived from a build request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStrategy {
    /// Corpus size only.
    #[default]
    #[serde(rename = "size")]
    CorpusSize,
    /// Corpus size plus a content fingerprint of the source.
    Content,
}

/// String key of a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// `size-<n>`
    pub fn corpus_size(size: usize) -> Self {
        Self(format!("size-{size}"))
    }

    /// `content-<n>-<hex>`
    pub fn content(size: usize, fingerprint: &blake3::Hash) -> Self {
        Self(format!("content-{size}-{}", fingerprint.to_hex()))
    }

    /// Wrap a key read back from storage.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Corpus size encoded in the key, if it follows either scheme.
    pub fn corpus_size_hint(&self) -> Option<usize> {
        let rest = self
            .0
            .strip_prefix("size-")
            .or_else(|| self.0.strip_prefix("content-"))?;
        rest.split('-').next()?.parse().ok()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// BLAKE3 over the ingredient lines of `recipes`, in order.
pub fn fingerprint_recipes(recipes: &[Recipe]) -> blake3::Hash {
    let mut hasher = Hasher::new();
    for recipe in recipes {
        for line in recipe.ingredients() {
            hasher.update(line.name.as_bytes());
            hasher.update(b"\0");
            hasher.update(line.quantity.as_bytes());
            hasher.update(b"\0");
        }
        hasher.update(b"\n");
    }
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_formats() {
        assert_eq!(CacheKey::corpus_size(500).as_str(), "size-500");

        let hash = blake3::hash(b"corpus");
        let key = CacheKey::content(10, &hash);
        assert!(key.as_str().starts_with("content-10-"));
        assert_eq!(key.as_str().len(), "content-10-".len() + 64);
    }

    #[test]
    fn test_corpus_size_hint() {
        assert_eq!(CacheKey::corpus_size(42).corpus_size_hint(), Some(42));
        assert_eq!(
            CacheKey::content(7, &blake3::hash(b"x")).corpus_size_hint(),
            Some(7)
        );
        assert_eq!(CacheKey::from_raw("other").corpus_size_hint(), None);
    }

    #[test]
    fn test_fingerprint_depends_on_content_and_order() {
        let a = Recipe::from_names(["beef", "rice"]);
        let b = Recipe::from_names(["pork", "rice"]);

        let ab = fingerprint_recipes(&[a.clone(), b.clone()]);
        assert_eq!(ab, fingerprint_recipes(&[a.clone(), b.clone()]));
        assert_ne!(ab, fingerprint_recipes(&[b, a]));
    }

    #[test]
    fn test_strategy_serde_names() {
        assert_eq!(
            serde_json::to_string(&KeyStrategy::CorpusSize).unwrap(),
            "\"size\""
        );
        assert_eq!(
            serde_json::from_str::<KeyStrategy>("\"content\"").unwrap(),
            KeyStrategy::Content
        );
    }
}
