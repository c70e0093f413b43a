//! Resource registry: discovers which translation resources exist.
//!
//! Resources are reached through a [`ResourceBundle`], the abstract "list of
//! named resources" the host application provides. Each resource is named by
//! the language code it translates into. [`ResourceIndex::discover`] walks the
//! bundle once and maps every language code to the locator of its resource.

use crate::i18n::LanguageCode;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// File extension of translation resources in a [`DirectoryBundle`].
pub const RESOURCE_EXTENSION: &str = "json";

/// A collection of named translation resources.
pub trait ResourceBundle {
    /// Names of every resource in the bundle (one per language).
    fn names(&self) -> Vec<String>;

    /// Locator a resource named `name` would live at, whether or not it exists.
    fn locate(&self, name: &str) -> String;

    /// Text of the resource at `locator`, or `None` if nothing is there.
    fn read(&self, locator: &str) -> Option<String>;
}

/// Resources stored as `<language>.json` files in one directory.
#[derive(Debug, Clone)]
pub struct DirectoryBundle {
    root: PathBuf,
}

impl DirectoryBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceBundle for DirectoryBundle {
    fn names(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(
                    "Translation directory {} not readable: {}",
                    self.root.display(),
                    e
                );
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext == RESOURCE_EXTENSION)
                    .unwrap_or(false)
            })
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .collect();

        names.sort();
        names
    }

    fn locate(&self, name: &str) -> String {
        self.root
            .join(format!("{}.{}", name, RESOURCE_EXTENSION))
            .to_string_lossy()
            .into_owned()
    }

    fn read(&self, locator: &str) -> Option<String> {
        match fs::read_to_string(locator) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read translation resource {}: {}", locator, e);
                None
            }
        }
    }
}

/// Resources held in memory, e.g. embedded with `include_str!`.
#[derive(Debug, Clone, Default)]
pub struct MemoryBundle {
    resources: BTreeMap<String, String>,
}

impl MemoryBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the resource for `name`.
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.resources.insert(name.into(), text.into());
    }
}

impl ResourceBundle for MemoryBundle {
    fn names(&self) -> Vec<String> {
        self.resources.keys().cloned().collect()
    }

    fn locate(&self, name: &str) -> String {
        name.to_string()
    }

    fn read(&self, locator: &str) -> Option<String> {
        self.resources.get(locator).cloned()
    }
}

/// Mapping from language code to the locator of its translation resource.
///
/// Built in one pass by [`ResourceIndex::discover`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceIndex {
    entries: BTreeMap<LanguageCode, String>,
}

impl ResourceIndex {
    /// Enumerate every resource in `bundle`.
    ///
    /// An empty bundle yields an empty index; that is not an error.
    pub fn discover(bundle: &dyn ResourceBundle) -> Self {
        let mut entries = BTreeMap::new();
        for name in bundle.names() {
            let locator = bundle.locate(&name);
            if let Some(previous) = entries.insert(LanguageCode::new(name.clone()), locator) {
                warn!(
                    "Duplicate translation resource for '{}', ignoring {}",
                    name, previous
                );
            }
        }

        debug!("Discovered {} translation resources", entries.len());
        Self { entries }
    }

    pub fn contains(&self, code: &LanguageCode) -> bool {
        self.entries.contains_key(code)
    }

    pub fn locator(&self, code: &LanguageCode) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    /// All indexed languages, sorted by code.
    pub fn languages(&self) -> Vec<&LanguageCode> {
        self.entries.keys().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
