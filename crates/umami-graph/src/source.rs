//! Recipe sources and their open/close lifecycle.
//!
//! A [`RecipeSource`] may hold file handles or connections, so iteration
//! always happens through an [`OpenSource`] guard: it opens the source on
//! construction and closes it on [`OpenSource::close`] or when dropped,
//! including after early termination.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, IngredientLine, Recipe, Result};

/// Boxed recipe stream borrowed from an open source.
pub type RecipeStream<'a> = Box<dyn Iterator<Item = Result<Recipe>> + 'a>;

/// A lazy, finite, non-restartable producer of recipes.
pub trait RecipeSource {
    /// Human readable description used in logs.
    fn describe(&self) -> String;

    /// Acquire the underlying resource.
    fn open(&mut self) -> Result<()>;

    /// Stream recipes from an opened source.
    fn recipes(&mut self) -> Result<RecipeStream<'_>>;

    /// Release the underlying resource. Must be safe to call twice.
    fn close(&mut self) -> Result<()>;

    /// Content fingerprint of the corpus, when the source can compute one
    /// cheaply. Used for content-keyed caching.
    fn fingerprint(&mut self) -> Result<Option<blake3::Hash>> {
        Ok(None)
    }
}

/// Scoped acquisition guard for a [`RecipeSource`].
pub struct OpenSource<'a, S: RecipeSource + ?Sized> {
    source: &'a mut S,
    open: bool,
}

impl<'a, S: RecipeSource + ?Sized> OpenSource<'a, S> {
    /// Open `source`; it is closed again when the guard goes away.
    pub fn open(source: &'a mut S) -> Result<Self> {
        source.open()?;
        tracing::debug!(source = %source.describe(), "opened recipe source");
        Ok(Self { source, open: true })
    }

    /// Lazily stream every recipe the source has.
    pub fn load_all(&mut self) -> Result<RecipeStream<'_>> {
        self.source.recipes()
    }

    /// Pull exactly `count` recipes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorpusTooSmall`] if the source runs dry first, or the
    /// first error produced by the stream.
    pub fn take(&mut self, count: usize) -> Result<Vec<Recipe>> {
        self.take_with_progress(count, |_| {})
    }

    /// Like [`take`](Self::take), calling `on_recipe` with the running count
    /// after each recipe.
    pub fn take_with_progress<F>(&mut self, count: usize, mut on_recipe: F) -> Result<Vec<Recipe>>
    where
        F: FnMut(usize),
    {
        let mut recipes = Vec::with_capacity(count);
        for recipe in self.load_all()?.take(count) {
            recipes.push(recipe?);
            on_recipe(recipes.len());
        }
        if recipes.len() < count {
            return Err(Error::CorpusTooSmall {
                requested: count,
                available: recipes.len(),
            });
        }
        Ok(recipes)
    }

    /// Close the source explicitly, surfacing close errors.
    pub fn close(mut self) -> Result<()> {
        self.open = false;
        self.source.close()
    }
}

impl<S: RecipeSource + ?Sized> Drop for OpenSource<'_, S> {
    fn drop(&mut self) {
        if self.open {
            if let Err(err) = self.source.close() {
                tracing::warn!(source = %self.source.describe(), error = %err, "failed to close recipe source");
            }
        }
    }
}

/// Recipe record as written in a JSON-lines corpus.
#[derive(Debug, Deserialize)]
struct RawRecipe {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    ingredients: Vec<RawLine>,
}

/// Ingredient lines are accepted as `["name", "qty"]`, `{"name", "quantity"}`
/// or a bare `"name"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLine {
    Pair(String, String),
    Entry {
        name: String,
        #[serde(default)]
        quantity: String,
    },
    Name(String),
}

impl From<RawLine> for IngredientLine {
    fn from(raw: RawLine) -> Self {
        match raw {
            RawLine::Pair(name, quantity) | RawLine::Entry { name, quantity } => {
                IngredientLine::new(name, quantity)
            }
            RawLine::Name(name) => IngredientLine::new(name, ""),
        }
    }
}

impl From<RawRecipe> for Recipe {
    fn from(raw: RawRecipe) -> Self {
        let mut recipe = Recipe::new(raw.ingredients.into_iter().map(Into::into).collect());
        recipe.id = raw.id;
        recipe.title = raw.title;
        recipe
    }
}

/// Parse one JSON-lines record. `line_number` is 1-based.
pub fn parse_recipe_line(line: &str, line_number: usize) -> Result<Recipe> {
    serde_json::from_str::<RawRecipe>(line)
        .map(Recipe::from)
        .map_err(|e| Error::Source(format!("line {line_number}: {e}")))
}

/// Recipes stored one JSON object per line.
///
/// Blank lines are skipped; a malformed line fails the stream with its line
/// number.
#[derive(Debug)]
pub struct JsonLinesSource {
    path: PathBuf,
    reader: Option<BufReader<File>>,
}

impl JsonLinesSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            reader: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }
}

impl RecipeSource for JsonLinesSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&mut self) -> Result<()> {
        let file = File::open(&self.path)?;
        self.reader = Some(BufReader::new(file));
        Ok(())
    }

    fn recipes(&mut self) -> Result<RecipeStream<'_>> {
        let reader = self
            .reader
            .as_mut()
            .ok_or_else(|| Error::Source(format!("{} is not open", self.path.display())))?;

        let stream = reader
            .lines()
            .enumerate()
            .filter_map(|(index, line)| match line {
                Ok(line) if line.trim().is_empty() => None,
                Ok(line) => Some(parse_recipe_line(&line, index + 1)),
                Err(e) => Some(Err(Error::Io(e))),
            });
        Ok(Box::new(stream))
    }

    fn close(&mut self) -> Result<()> {
        self.reader = None;
        Ok(())
    }

    fn fingerprint(&mut self) -> Result<Option<blake3::Hash>> {
        let mut file = File::open(&self.path)?;
        let mut hasher = blake3::Hasher::new();
        let mut buffer = [0u8; 64 * 1024];
        loop {
            let read = file.read(&mut buffer)?;
            if read == 0 {
                break;
            }
            hasher.update(&buffer[..read]);
        }
        Ok(Some(hasher.finalize()))
    }
}

/// Recipes held in memory. Tracks lifecycle calls so callers can verify
/// scoped acquisition.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    recipes: Vec<Recipe>,
    is_open: bool,
    open_count: usize,
    close_count: usize,
}

impl InMemorySource {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes,
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open_count(&self) -> usize {
        self.open_count
    }

    pub fn close_count(&self) -> usize {
        self.close_count
    }
}

impl RecipeSource for InMemorySource {
    fn describe(&self) -> String {
        format!("in-memory corpus ({} recipes)", self.recipes.len())
    }

    fn open(&mut self) -> Result<()> {
        self.is_open = true;
        self.open_count += 1;
        Ok(())
    }

    fn recipes(&mut self) -> Result<RecipeStream<'_>> {
        if !self.is_open {
            return Err(Error::Source("in-memory corpus is not open".to_string()));
        }
        Ok(Box::new(self.recipes.iter().cloned().map(Ok)))
    }

    fn close(&mut self) -> Result<()> {
        if self.is_open {
            self.is_open = false;
            self.close_count += 1;
        }
        Ok(())
    }

    fn fingerprint(&mut self) -> Result<Option<blake3::Hash>> {
        Ok(Some(crate::cache::fingerprint_recipes(&self.recipes)))
    }
}
