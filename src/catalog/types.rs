use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Bundled catalog used when no file is given on the command line.
const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Errors raised while loading a catalog document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A single curated resource.
///
/// All fields are free-form text; the catalog is never validated, so a
/// missing field simply reads as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    #[serde(alias = "titulo")]
    pub title: String,
    #[serde(alias = "autor")]
    pub author: String,
    #[serde(alias = "editorial")]
    pub publisher: String,
    #[serde(alias = "edicion")]
    pub edition: String,
    #[serde(alias = "nivel")]
    pub level: String,
    #[serde(alias = "porQue")]
    pub rationale: String,
    #[serde(alias = "linkCompra")]
    pub resource_link: String,
}

/// A named group of items, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Category {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "libros", default)]
    pub items: Vec<Item>,
}

/// The full, immutable catalog: an ordered list of categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    #[serde(alias = "categorias", default)]
    categories: Vec<Category>,
}

// Documents either wrap the catalog in a `library` (or `libros`) object or
// carry `categories` at the top level.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Wrapped {
        #[serde(alias = "libros")]
        library: Catalog,
    },
    Bare(Catalog),
}

impl Catalog {
    pub const fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Parse a catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the text is not a catalog document.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(text)?;
        Ok(match document {
            CatalogDocument::Wrapped { library } => library,
            CatalogDocument::Bare(catalog) => catalog,
        })
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// The catalog shipped with the binary.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded document is malformed.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category names in catalog order.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|cat| cat.name.as_str())
    }

    pub fn contains_topic(&self, name: &str) -> bool {
        self.categories.iter().any(|cat| cat.name == name)
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|cat| cat.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}
