//! Locale manager: the single owner of the active language and its catalog.
//!
//! Construction runs the whole startup sequence: discover resources, try to
//! restore the persisted selection, otherwise pick the device language (or
//! the baseline when the device language has no resource), then load that
//! language's catalog. After that the manager answers lookups, switches
//! languages on request and tells observers when it does.
//!
//! Persisting the selection is always an explicit [`LocaleManager::persist`]
//! call; switching languages never writes to disk.
//!
//! Observers are `FnMut(&LocaleManager)` closures owned by the manager. They
//! run inline, in subscription order, before
//! [`LocaleManager::set_active_language`] returns, and see the manager with the
//! new language already active. They only get a shared reference, so they can
//! look up strings but cannot switch the language again mid-notification.

use crate::config::Config;
use crate::i18n::{
    Catalog, CatalogLoader, DeviceLocale, DirectoryBundle, FixedLocale, LanguageCode,
    LookupMetrics, LookupOutcome, PersistedSnapshot, PrefsFile, ResourceBundle, ResourceIndex,
    Restore, SnapshotStore, StoreError, SystemLocale,
};
use std::borrow::Cow;
use std::fmt;
use tracing::{debug, info, warn};

/// Returned by every lookup while no catalog is loaded.
pub const NO_TRANSLATION_FILE_FOUND: &str = "NO TRANSLATION FILE FOUND";

/// Appended to a key the active catalog does not define.
pub const KEY_NOT_ADDED_SUFFIX: &str = " IS NOT ADDED";

/// Appended to a key whose translation is blank.
pub const VALUE_IS_EMPTY_SUFFIX: &str = " IS EMPTY";

/// Where the language chosen at startup came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Read back from a trusted snapshot
    Restored,
    /// Device language or baseline, after no usable snapshot was found
    Default,
}

/// Handle returned by [`LocaleManager::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&LocaleManager)>;

struct ActiveState {
    language: LanguageCode,
    catalog: Option<Catalog>,
}

pub struct LocaleManager {
    bundle: Box<dyn ResourceBundle>,
    index: ResourceIndex,
    store: SnapshotStore,
    baseline: LanguageCode,
    origin: Origin,
    active: ActiveState,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
    metrics: LookupMetrics,
}

impl LocaleManager {
    /// Discover resources, restore or choose a language, and load it.
    pub fn initialize(
        bundle: Box<dyn ResourceBundle>,
        store: SnapshotStore,
        device: &dyn DeviceLocale,
        baseline: LanguageCode,
    ) -> Self {
        let index = ResourceIndex::discover(bundle.as_ref());

        let (language, origin) = match store.restore() {
            Restore::Restored(snapshot) => {
                info!("Restored language selection '{}'", snapshot.language);
                (snapshot.language, Origin::Restored)
            }
            Restore::Absent => {
                debug!("No persisted language selection, using default");
                (default_language(&index, device, &baseline), Origin::Default)
            }
            Restore::Corrupted => {
                warn!("Persisted language selection failed integrity check, using default");
                (default_language(&index, device, &baseline), Origin::Default)
            }
        };

        let catalog = CatalogLoader::new(bundle.as_ref(), &index)
            .load(&language)
            .ok();
        info!(
            "Active language '{}' ({} languages available)",
            language,
            index.len()
        );

        Self {
            bundle,
            index,
            store,
            baseline,
            origin,
            active: ActiveState { language, catalog },
            observers: Vec::new(),
            next_observer: 0,
            metrics: LookupMetrics::new(),
        }
    }

    /// Wire up directory resources, a prefs-file anchor and the device locale.
    pub fn from_config(config: &Config) -> Self {
        let bundle = DirectoryBundle::new(&config.resources_dir);
        let store = SnapshotStore::new(
            &config.data_dir,
            &config.snapshot_file,
            Box::new(PrefsFile::new(&config.prefs_file)),
            &config.anchor_key,
        );
        let device: Box<dyn DeviceLocale> = match &config.device_language {
            Some(tag) => Box::new(FixedLocale::new(tag.clone())),
            None => Box::new(SystemLocale),
        };

        Self::initialize(
            Box::new(bundle),
            store,
            device.as_ref(),
            LanguageCode::new(config.baseline_language.clone()),
        )
    }

    pub fn active_language(&self) -> &LanguageCode {
        &self.active.language
    }

    /// Switch to `code`, reload its catalog and notify observers.
    ///
    /// The code is not checked against the index: a language without a
    /// resource still becomes active, with no catalog loaded.
    pub fn set_active_language(&mut self, code: impl Into<LanguageCode>) {
        let code = code.into();
        let catalog = CatalogLoader::new(self.bundle.as_ref(), &self.index)
            .load(&code)
            .ok();

        info!(
            "Language changed from '{}' to '{}'",
            self.active.language, code
        );
        self.active = ActiveState {
            language: code,
            catalog,
        };
        self.metrics.record_switch();

        let mut observers = std::mem::take(&mut self.observers);
        for (_, observer) in observers.iter_mut() {
            observer(&*self);
        }
        self.observers = observers;
    }

    /// Translate `key` in the active language.
    ///
    /// Never fails. Problems are reported through the returned text:
    /// [`NO_TRANSLATION_FILE_FOUND`] when no catalog is loaded, otherwise the
    /// key followed by [`KEY_NOT_ADDED_SUFFIX`] or [`VALUE_IS_EMPTY_SUFFIX`].
    pub fn lookup(&self, key: &str) -> Cow<'_, str> {
        let (outcome, text) = match &self.active.catalog {
            None => (
                LookupOutcome::NoCatalog,
                Cow::Borrowed(NO_TRANSLATION_FILE_FOUND),
            ),
            Some(catalog) => match catalog.get(key) {
                None => (
                    LookupOutcome::MissingKey,
                    Cow::Owned(format!("{}{}", key, KEY_NOT_ADDED_SUFFIX)),
                ),
                Some(value) if value.trim().is_empty() => (
                    LookupOutcome::EmptyValue,
                    Cow::Owned(format!("{}{}", key, VALUE_IS_EMPTY_SUFFIX)),
                ),
                Some(value) => (LookupOutcome::Hit, Cow::Borrowed(value)),
            },
        };

        self.metrics.record(outcome);
        text
    }

    /// Write the active language to the snapshot store.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        let snapshot = PersistedSnapshot {
            language: self.active.language.clone(),
        };
        self.store.persist(&snapshot)
    }

    /// Register a callback run after every language switch.
    ///
    /// The callback receives the manager with the new language active.
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&LocaleManager) + 'static,
    {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a callback. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn available_languages(&self) -> Vec<&LanguageCode> {
        self.index.languages()
    }

    /// Index built at startup; catalogs only load through its locators.
    pub fn index(&self) -> &ResourceIndex {
        &self.index
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.active.catalog.as_ref()
    }

    pub fn has_catalog(&self) -> bool {
        self.active.catalog.is_some()
    }

    pub fn baseline(&self) -> &LanguageCode {
        &self.baseline
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn metrics(&self) -> &LookupMetrics {
        &self.metrics
    }

    /// Resource bundle the manager loads catalogs from.
    pub fn bundle(&self) -> &dyn ResourceBundle {
        self.bundle.as_ref()
    }
}

impl fmt::Debug for LocaleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleManager")
            .field("language", &self.active.language)
            .field("has_catalog", &self.has_catalog())
            .field("origin", &self.origin)
            .field("languages", &self.index.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Pick the startup language when nothing was restored.
///
/// Tries each candidate derived from the device locale tag in turn and falls
/// back to `baseline` when none of them has a resource.
pub fn default_language(
    index: &ResourceIndex,
    device: &dyn DeviceLocale,
    baseline: &LanguageCode,
) -> LanguageCode {
    let Some(tag) = device.locale_tag() else {
        debug!("Device reports no locale, using '{}'", baseline);
        return baseline.clone();
    };

    match LanguageCode::device_candidates(&tag)
        .into_iter()
        .find(|candidate| index.contains(candidate))
    {
        Some(code) => code,
        None => {
            debug!(
                "Device locale '{}' has no translation resource, using '{}'",
                tag, baseline
            );
            baseline.clone()
        }
    }
}

/// Builds the manager on first use.
///
/// The host application owns one of these and passes it (or the manager it
/// yields) to whoever needs translations.
pub struct LazyLocaleManager {
    init: Box<dyn FnMut() -> LocaleManager>,
    manager: Option<LocaleManager>,
}

impl LazyLocaleManager {
    pub fn new<F>(init: F) -> Self
    where
        F: FnMut() -> LocaleManager + 'static,
    {
        Self {
            init: Box::new(init),
            manager: None,
        }
    }

    pub fn from_config(config: Config) -> Self {
        Self::new(move || LocaleManager::from_config(&config))
    }

    pub fn is_initialized(&self) -> bool {
        self.manager.is_some()
    }

    /// The manager, initializing it if this is the first access.
    pub fn get(&mut self) -> &mut LocaleManager {
        let init = &mut self.init;
        self.manager.get_or_insert_with(|| init())
    }
}
