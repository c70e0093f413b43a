//! Catalog quality validation module.
//!
//! Lookups never fail loudly, so authoring mistakes only surface as annotated
//! strings at runtime. This module finds them ahead of time: keys silently
//! overridden by a later section, blank values, and keys the reference
//! (baseline) language has but this one lacks.

use crate::i18n::{Catalog, RawCatalogDocument};
use std::collections::{BTreeSet, HashMap};

/// Validation report containing errors and warnings about a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that will show up as annotated keys at runtime
    pub errors: Vec<String>,

    /// Suspicious content that still resolves
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation catalogs.
pub struct CatalogValidator;

impl CatalogValidator {
    /// Audit a sectioned document, optionally against a reference catalog.
    ///
    /// - A key defined in more than one section is a warning (the later
    ///   section wins, the earlier value is dead).
    /// - A blank value is a warning (lookup reports it as empty, which may be
    ///   a translation still to come).
    /// - A key present in `reference` but absent here is an error (lookup
    ///   reports it as not added).
    pub fn validate(document: &RawCatalogDocument, reference: Option<&Catalog>) -> ValidationReport {
        let mut report = ValidationReport::new();

        let mut defined_in: HashMap<&str, &str> = HashMap::new();
        for (section, pairs) in document {
            for key in pairs.keys() {
                if let Some(previous) = defined_in.insert(key.as_str(), section.as_str()) {
                    report.warnings.push(format!(
                        "Key '{}' in section '{}' overrides section '{}'",
                        key, section, previous
                    ));
                }
            }
        }

        let mut blank: BTreeSet<&str> = BTreeSet::new();
        for pairs in document.values() {
            for (key, value) in pairs {
                if value.trim().is_empty() {
                    blank.insert(key.as_str());
                } else {
                    blank.remove(key.as_str());
                }
            }
        }
        for key in blank {
            report
                .warnings
                .push(format!("Key '{}' has an empty value", key));
        }

        if let Some(reference) = reference {
            let missing: BTreeSet<&str> = reference
                .keys()
                .filter(|key| !defined_in.contains_key(key))
                .collect();
            for key in missing {
                report
                    .errors
                    .push(format!("Key '{}' is missing (present in reference)", key));
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{flatten, parse_document};

    fn document(json: &str) -> RawCatalogDocument {
        parse_document(json).expect("Should parse")
    }

    // ==================== Section Override Tests ====================

    #[test]
    fn test_validate_clean_document() {
        let doc = document(r#"{"ui": {"hello": "Hello"}, "menu": {"play": "Play"}}"#);
        assert!(CatalogValidator::validate(&doc, None).is_clean());
    }

    #[test]
    fn test_validate_reports_override() {
        let doc = document(r#"{"ui": {"greeting": "Hi"}, "menu": {"greeting": "Hello"}}"#);
        let report = CatalogValidator::validate(&doc, None);

        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("'greeting'"));
        assert!(report.warnings[0].contains("'menu' overrides section 'ui'"));
    }

    // ==================== Blank Value Tests ====================

    #[test]
    fn test_validate_reports_blank_value() {
        let doc = document(r#"{"ui": {"bye": "   ", "hello": "Hello"}}"#);
        let report = CatalogValidator::validate(&doc, None);

        assert!(!report.has_errors());
        assert_eq!(report.warnings, vec!["Key 'bye' has an empty value"]);
    }

    #[test]
    fn test_validate_blank_value_against_reference_is_not_error() {
        let reference = flatten(document(r#"{"ui": {"hello": "Hello", "bye": "Bye"}}"#));
        let doc = document(r#"{"ui": {"hello": "Bonjour", "bye": ""}}"#);
        let report = CatalogValidator::validate(&doc, Some(&reference));

        assert!(!report.has_errors());
        assert_eq!(report.warnings, vec!["Key 'bye' has an empty value"]);
    }

    #[test]
    fn test_validate_blank_value_overridden_is_not_reported() {
        let doc = document(r#"{"ui": {"bye": ""}, "menu": {"bye": "Goodbye"}}"#);
        let report = CatalogValidator::validate(&doc, None);

        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("overrides"));
    }

    // ==================== Reference Tests ====================

    #[test]
    fn test_validate_reports_missing_reference_keys() {
        let reference = flatten(document(r#"{"ui": {"hello": "Hello", "bye": "Bye"}}"#));
        let doc = document(r#"{"ui": {"hello": "Bonjour"}}"#);
        let report = CatalogValidator::validate(&doc, Some(&reference));

        assert_eq!(report.errors, vec!["Key 'bye' is missing (present in reference)"]);
    }

    #[test]
    fn test_validate_extra_keys_are_fine() {
        let reference = flatten(document(r#"{"ui": {"hello": "Hello"}}"#));
        let doc = document(r#"{"ui": {"hello": "Bonjour", "extra": "En plus"}}"#);
        assert!(CatalogValidator::validate(&doc, Some(&reference)).is_clean());
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_validation_report_new() {
        let report = ValidationReport::new();
        assert!(report.is_clean());
        assert!(!report.has_errors());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_validation_report_with_error() {
        let mut report = ValidationReport::new();
        report.errors.push("Test error".to_string());

        assert!(!report.is_clean());
        assert!(report.has_errors());
        assert!(!report.has_warnings());
    }
}
