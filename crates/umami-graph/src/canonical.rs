//! Canonicalization of raw ingredient strings into [`Ingredient`] tokens.
//!
//! The graph builder treats canonicalization as a pure function. Returning
//! `None` is the sentinel for "unrepresentable": the builder drops that
//! ingredient from node and edge formation instead of failing the build.

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

use crate::Ingredient;

/// Maps a raw ingredient string to a canonical token.
///
/// Implementations must be deterministic for identical input within a
/// session.
pub trait Canonicalizer {
    /// Canonicalize `raw`, or return `None` if it cannot be represented.
    fn canonicalize(&self, raw: &str) -> Option<Ingredient>;
}

impl<F> Canonicalizer for F
where
    F: Fn(&str) -> Option<Ingredient>,
{
    fn canonicalize(&self, raw: &str) -> Option<Ingredient> {
        self(raw)
    }
}

/// Decorative markers recipe authors sprinkle over ingredient names.
const DECORATIONS: &[char] = &[
    '☆', '★', '●', '○', '◎', '◇', '◆', '■', '□', '▲', '△', '・', '*', '※', '♪',
];

/// Zero-width characters left behind by copy/paste and translation services.
const INVISIBLES: &[char] = &['\u{200b}', '\u{200c}', '\u{200d}', '\u{feff}'];

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Normalize a raw ingredient string without any dictionary lookup.
///
/// Cuts at the first parenthetical qualifier (`(` or `（`), removes
/// decorative markers and zero-width characters, lowercases, and collapses
/// whitespace.
pub fn clean(raw: &str) -> String {
    let head = raw.split(['(', '（']).next().unwrap_or_default();
    let stripped: String = head
        .chars()
        .filter(|c| !DECORATIONS.contains(c) && !INVISIBLES.contains(c))
        .collect();
    let lowered = stripped.to_lowercase();
    WHITESPACE.replace_all(lowered.trim(), " ").into_owned()
}

/// Default canonicalizer: [`clean`] followed by an alias dictionary and an
/// ignore list.
///
/// The alias dictionary is where translations live (`"牛肉" -> "beef"`).
/// Tokens in the ignore list, and strings that are empty after cleaning, are
/// reported as unrepresentable.
#[derive(Debug, Clone, Default)]
pub struct StandardCanonicalizer {
    aliases: HashMap<String, String>,
    ignored: HashSet<String>,
}

impl StandardCanonicalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `raw` (after cleaning) to `token`.
    pub fn with_alias(mut self, raw: &str, token: &str) -> Self {
        self.insert_alias(raw, token);
        self
    }

    pub fn with_aliases<I, K, V>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (raw, token) in aliases {
            self.insert_alias(raw.as_ref(), token.as_ref());
        }
        self
    }

    /// Treat `token` as unrepresentable.
    pub fn ignoring<I, T>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.ignored
            .extend(tokens.into_iter().map(|t| clean(t.as_ref())));
        self
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    fn insert_alias(&mut self, raw: &str, token: &str) {
        let key = clean(raw);
        let value = clean(token);
        if !key.is_empty() && !value.is_empty() {
            self.aliases.insert(key, value);
        }
    }
}

impl Canonicalizer for StandardCanonicalizer {
    fn canonicalize(&self, raw: &str) -> Option<Ingredient> {
        let cleaned = clean(raw);
        if cleaned.is_empty() {
            return None;
        }
        let token = match self.aliases.get(&cleaned) {
            Some(alias) => alias.clone(),
            None => cleaned,
        };
        if self.ignored.contains(&token) {
            return None;
        }
        Ingredient::new(token)
    }
}
