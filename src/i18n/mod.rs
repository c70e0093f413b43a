//! Runtime translation catalogs.
//!
//! This module loads per-language key -> string dictionaries, answers lookups
//! for the active language, persists the active-language choice behind an
//! integrity check, and notifies observers when the language changes.
//!
//! # Architecture
//!
//! - `registry`: Resource bundles and the language -> resource index
//! - `catalog`: Parsing, section flattening and catalog loading
//! - `store`: Snapshot persistence with a trust-anchor digest
//! - `manager`: The `LocaleManager` facade tying the above together
//! - `language`: `LanguageCode` and device-locale candidates
//! - `device`: Device locale sources
//! - `metrics`: Lookup outcome counters
//! - `validator`: Catalog authoring checks
//!
//! # Example
//!
//! ```rust,ignore
//! use locale_catalog::i18n::LocaleManager;
//!
//! let mut locale = LocaleManager::from_config(&config);
//! locale.subscribe(|locale| println!("now {}: {}", locale.active_language(), locale.lookup("hello")));
//!
//! locale.set_active_language("french");
//! assert_eq!(locale.lookup("hello"), "Bonjour");
//! locale.persist()?;
//! ```

mod catalog;
mod device;
mod language;
mod manager;
mod metrics;
mod registry;
mod store;
mod validator;

pub use catalog::{flatten, parse_document, Catalog, CatalogLoader, LoadError, RawCatalogDocument};
pub use device::{DeviceLocale, FixedLocale, SystemLocale};
pub use language::{english_name, LanguageCode};
pub use manager::{
    default_language, LazyLocaleManager, LocaleManager, ObserverId, Origin,
    KEY_NOT_ADDED_SUFFIX, NO_TRANSLATION_FILE_FOUND, VALUE_IS_EMPTY_SUFFIX,
};
pub use metrics::{LookupMetrics, LookupOutcome, MetricsReport};
pub use registry::{DirectoryBundle, MemoryBundle, ResourceBundle, ResourceIndex, RESOURCE_EXTENSION};
pub use store::{
    AnchorError, MemoryPrefs, PersistedSnapshot, PrefsFile, Restore, SnapshotStore, StoreError,
    TrustAnchor,
};
pub use validator::{CatalogValidator, ValidationReport};
