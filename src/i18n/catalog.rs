//! Translation catalogs: loading a resource and flattening its sections.
//!
//! A resource is a two-level document, `section -> key -> value`:
//!
//! ```json
//! {
//!   "menu":   { "play": "Play", "quit": "Quit" },
//!   "dialog": { "confirm": "Are you sure?" }
//! }
//! ```
//!
//! Sections only organize the file. Loading discards them and merges every
//! section into one flat [`Catalog`]; when two sections define the same key
//! the one that appears later in the document wins.

use crate::i18n::{LanguageCode, ResourceBundle, ResourceIndex};
use indexmap::IndexMap;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, error};

/// Parsed translation resource, sections kept in document order.
pub type RawCatalogDocument = IndexMap<String, IndexMap<String, String>>;

/// Errors that leave a language without a catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no translation resource for '{code}' at {locator}")]
    NotFound { code: LanguageCode, locator: String },

    #[error("translation resource for '{code}' is malformed: {source}")]
    Malformed {
        code: LanguageCode,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse resource text into its sectioned form.
pub fn parse_document(text: &str) -> Result<RawCatalogDocument, serde_json::Error> {
    serde_json::from_str(text)
}

/// Merge sections into a single key space.
///
/// Sections are visited in iteration order and later values overwrite
/// earlier ones, so the last section defining a key decides its value.
pub fn flatten<S, N, I, K, V>(sections: S) -> Catalog
where
    S: IntoIterator<Item = (N, I)>,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut entries = HashMap::new();
    for (_section, pairs) in sections {
        for (key, value) in pairs {
            entries.insert(key.into(), value.into());
        }
    }
    Catalog { entries }
}

/// Flat key -> string mapping for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for Catalog {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Catalog {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Loads catalogs out of a resource bundle.
///
/// Locators come from the [`ResourceIndex`]; a language the index does not
/// know is `NotFound` without touching the bundle.
pub struct CatalogLoader<'a> {
    bundle: &'a dyn ResourceBundle,
    index: &'a ResourceIndex,
}

impl<'a> CatalogLoader<'a> {
    pub fn new(bundle: &'a dyn ResourceBundle, index: &'a ResourceIndex) -> Self {
        Self { bundle, index }
    }

    /// Read the raw sectioned document for `code`.
    pub fn load_document(&self, code: &LanguageCode) -> Result<RawCatalogDocument, LoadError> {
        let (locator, text) = match self.index.locator(code) {
            Some(locator) => (locator.to_string(), self.bundle.read(locator)),
            None => (self.bundle.locate(code.as_str()), None),
        };
        let Some(text) = text else {
            error!("Missing translation file for '{}' ({})", code, locator);
            return Err(LoadError::NotFound {
                code: code.clone(),
                locator,
            });
        };

        parse_document(&text).map_err(|source| {
            error!("Translation file for '{}' is malformed: {}", code, source);
            LoadError::Malformed {
                code: code.clone(),
                source,
            }
        })
    }

    /// Load and flatten the catalog for `code`.
    pub fn load(&self, code: &LanguageCode) -> Result<Catalog, LoadError> {
        let document = self.load_document(code)?;
        let catalog = flatten(document);
        debug!("Loaded {} translations for '{}'", catalog.len(), code);
        Ok(catalog)
    }
}
