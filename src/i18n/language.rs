//! Language codes: opaque identifiers naming a translation resource.
//!
//! A `LanguageCode` is whatever name the resource was published under
//! (e.g. "english", "french" or "pt-br"). It is used both as the key into the
//! resource index and as the persisted selection, so no normalization is
//! applied on construction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a language, matching the name of its translation resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Self {
        LanguageCode(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Candidate resource names for an OS locale tag, most specific first.
    ///
    /// `"en_US.UTF-8"` yields `["en-us", "en", "english"]`: the full tag with
    /// any encoding suffix dropped, the primary subtag, and the lowercase
    /// English language name for resources named after the language itself.
    pub fn device_candidates(tag: &str) -> Vec<LanguageCode> {
        let tag = tag
            .split(|c: char| c == '.' || c == '@')
            .next()
            .unwrap_or_default()
            .trim()
            .replace('_', "-")
            .to_lowercase();

        if tag.is_empty() {
            return Vec::new();
        }
        let mut candidates = vec![tag.clone()];

        let primary = tag.split('-').next().unwrap_or_default().to_string();
        if !primary.is_empty() && !candidates.contains(&primary) {
            candidates.push(primary.clone());
        }

        if let Some(name) = english_name(&primary) {
            let name = name.to_lowercase();
            if !candidates.contains(&name) {
                candidates.push(name);
            }
        }

        candidates.into_iter().map(LanguageCode).collect()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        LanguageCode(code.to_string())
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        LanguageCode(code)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LanguageCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// English name of an ISO 639-1 code.
///
/// Covers the languages most commonly reported by operating systems.
pub fn english_name(code: &str) -> Option<&'static str> {
    match code {
        "en" => Some("English"),
        "es" => Some("Spanish"),
        "fr" => Some("French"),
        "de" => Some("German"),
        "it" => Some("Italian"),
        "pt" => Some("Portuguese"),
        "nl" => Some("Dutch"),
        "sv" => Some("Swedish"),
        "da" => Some("Danish"),
        "fi" => Some("Finnish"),
        "no" | "nb" => Some("Norwegian"),
        "pl" => Some("Polish"),
        "cs" => Some("Czech"),
        "hu" => Some("Hungarian"),
        "ro" => Some("Romanian"),
        "el" => Some("Greek"),
        "tr" => Some("Turkish"),
        "ru" => Some("Russian"),
        "uk" => Some("Ukrainian"),
        "ar" => Some("Arabic"),
        "he" => Some("Hebrew"),
        "hi" => Some("Hindi"),
        "th" => Some("Thai"),
        "vi" => Some("Vietnamese"),
        "id" => Some("Indonesian"),
        "ms" => Some("Malay"),
        "ja" => Some("Japanese"),
        "ko" => Some("Korean"),
        "zh" => Some("Chinese"),
        _ => None,
    }
}
