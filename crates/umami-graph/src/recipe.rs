//! Recipe records as delivered by a [`RecipeSource`](crate::RecipeSource).

use serde::{Deserialize, Serialize};

/// One ingredient line of a recipe: the raw name and its quantity text.
///
/// The quantity never participates in node identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    pub quantity: String,
}

impl IngredientLine {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
        }
    }
}

/// An immutable recipe: an ordered list of ingredient lines plus optional
/// identifying metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Option<String>,
    pub title: Option<String>,
    ingredients: Vec<IngredientLine>,
}

impl Recipe {
    pub fn new(ingredients: Vec<IngredientLine>) -> Self {
        Self {
            id: None,
            title: None,
            ingredients,
        }
    }

    /// Build a recipe from `(name, quantity)` pairs.
    pub fn from_pairs<I, N, Q>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, Q)>,
        N: Into<String>,
        Q: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, quantity)| IngredientLine::new(name, quantity))
                .collect(),
        )
    }

    /// Build a recipe from bare ingredient names with empty quantities.
    pub fn from_names<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self::from_pairs(names.into_iter().map(|name| (name, "")))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Ordered `(name, quantity)` lines as sourced.
    pub fn ingredients(&self) -> &[IngredientLine] {
        &self.ingredients
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}
