//! Device locale sources.

/// Reports the language the host device is configured for.
pub trait DeviceLocale {
    /// Raw locale tag as reported by the platform (e.g. "en-US"), if any.
    fn locale_tag(&self) -> Option<String>;
}

/// Locale reported by the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLocale;

impl DeviceLocale for SystemLocale {
    fn locale_tag(&self) -> Option<String> {
        sys_locale::get_locale()
    }
}

/// A fixed locale tag, used for configuration overrides and tests.
#[derive(Debug, Default, Clone)]
pub struct FixedLocale(pub Option<String>);

impl FixedLocale {
    pub fn new(tag: impl Into<String>) -> Self {
        FixedLocale(Some(tag.into()))
    }

    pub fn none() -> Self {
        FixedLocale(None)
    }
}

impl DeviceLocale for FixedLocale {
    fn locale_tag(&self) -> Option<String> {
        self.0.clone()
    }
}
