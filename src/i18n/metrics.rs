//! Lookup metrics for catalog authors.
//!
//! Counts how each lookup was resolved so missing or blank translations show
//! up without scanning logs. Each manager owns its own counters; like the
//! manager they are single-threaded.

use serde::Serialize;
use std::cell::Cell;

/// How a single lookup was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Key present with a non-blank value
    Hit,
    /// Key absent from the active catalog
    MissingKey,
    /// Key present but blank
    EmptyValue,
    /// No catalog loaded for the active language
    NoCatalog,
}

/// Per-manager lookup counters.
#[derive(Debug, Default)]
pub struct LookupMetrics {
    hits: Cell<usize>,
    missing_keys: Cell<usize>,
    empty_values: Cell<usize>,
    no_catalog: Cell<usize>,
    language_switches: Cell<usize>,
}

impl LookupMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record how a lookup was resolved.
    pub fn record(&self, outcome: LookupOutcome) {
        let counter = match outcome {
            LookupOutcome::Hit => &self.hits,
            LookupOutcome::MissingKey => &self.missing_keys,
            LookupOutcome::EmptyValue => &self.empty_values,
            LookupOutcome::NoCatalog => &self.no_catalog,
        };
        counter.set(counter.get() + 1);
    }

    /// Record a completed language switch.
    pub fn record_switch(&self) {
        self.language_switches.set(self.language_switches.get() + 1);
    }

    pub fn hits(&self) -> usize {
        self.hits.get()
    }

    pub fn missing_keys(&self) -> usize {
        self.missing_keys.get()
    }

    pub fn empty_values(&self) -> usize {
        self.empty_values.get()
    }

    pub fn no_catalog(&self) -> usize {
        self.no_catalog.get()
    }

    pub fn language_switches(&self) -> usize {
        self.language_switches.get()
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let missing_keys = self.missing_keys();
        let empty_values = self.empty_values();
        let no_catalog = self.no_catalog();
        let lookups = hits + missing_keys + empty_values + no_catalog;
        let hit_rate = if lookups > 0 {
            (hits as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups,
            hits,
            missing_keys,
            empty_values,
            no_catalog,
            hit_rate,
            language_switches: self.language_switches(),
        }
    }

    /// Reset all counters to zero.
    #[cfg(test)]
    pub fn reset(&self) {
        self.hits.set(0);
        self.missing_keys.set(0);
        self.empty_values.set(0);
        self.no_catalog.set(0);
        self.language_switches.set(0);
    }
}

/// Snapshot of lookup statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    /// Total lookups recorded
    pub lookups: usize,

    /// Lookups answered with a translation
    pub hits: usize,

    /// Lookups for keys the catalog lacks
    pub missing_keys: usize,

    /// Lookups for keys with blank values
    pub empty_values: usize,

    /// Lookups made while no catalog was loaded
    pub no_catalog: usize,

    /// Hit rate as a percentage (0-100)
    pub hit_rate: f64,

    /// Number of language switches
    pub language_switches: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_record_each_outcome() {
        let metrics = LookupMetrics::new();

        metrics.record(LookupOutcome::Hit);
        metrics.record(LookupOutcome::Hit);
        metrics.record(LookupOutcome::MissingKey);
        metrics.record(LookupOutcome::EmptyValue);
        metrics.record(LookupOutcome::NoCatalog);

        assert_eq!(metrics.hits(), 2);
        assert_eq!(metrics.missing_keys(), 1);
        assert_eq!(metrics.empty_values(), 1);
        assert_eq!(metrics.no_catalog(), 1);
    }

    #[test]
    fn test_record_switch() {
        let metrics = LookupMetrics::new();
        metrics.record_switch();
        assert_eq!(metrics.language_switches(), 1);
    }

    #[test]
    fn test_reset() {
        let metrics = LookupMetrics::new();
        metrics.record(LookupOutcome::Hit);
        metrics.record_switch();
        metrics.reset();

        assert_eq!(metrics.report().lookups, 0);
        assert_eq!(metrics.language_switches(), 0);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = LookupMetrics::new().report();

        assert_eq!(report.lookups, 0);
        assert_eq!(report.hits, 0);
        assert_eq!(report.hit_rate, 0.0);
    }

    #[test]
    fn test_report_hit_rate() {
        let metrics = LookupMetrics::new();

        // 3 hits, 1 miss = 75% hit rate
        metrics.record(LookupOutcome::Hit);
        metrics.record(LookupOutcome::Hit);
        metrics.record(LookupOutcome::Hit);
        metrics.record(LookupOutcome::MissingKey);

        let report = metrics.report();
        assert_eq!(report.lookups, 4);
        assert_eq!(report.hit_rate, 75.0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = LookupMetrics::new();
        metrics.record(LookupOutcome::EmptyValue);

        let json = serde_json::to_string(&metrics.report()).expect("Should serialize");
        assert!(json.contains("\"empty_values\":1"));
        assert!(json.contains("\"hit_rate\":0.0"));
    }
}
