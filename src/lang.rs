//! Ordered language catalog and canonical-language selection.

use std::collections::BTreeSet;

/// Default priority catalog, most preferred first. The first entry is the
/// reference language that gates category and infobox derivation.
pub const DEFAULT_LANGUAGES: &[&str] = &[
    "en", "de", "fr", "nl", "it", "es", "ro", "pl", "ar", "fa",
];

/// An ordered catalog of supported language codes.
///
/// The order encodes translation priority: earlier entries are preferred
/// when choosing the canonical language of an item. The catalog is a
/// configuration value handed to the extractor, not process-wide state, so
/// different corpora can run with different priorities in one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCatalog {
    codes: Vec<String>,
}

impl LanguageCatalog {
    /// Builds a catalog from codes in priority order. Repeated codes keep
    /// their first (highest-priority) position.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let codes = codes
            .into_iter()
            .map(Into::into)
            .filter(|code| seen.insert(code.clone()))
            .collect();
        Self { codes }
    }

    /// The reference language: the catalog's first, most-preferred entry.
    pub fn reference(&self) -> Option<&str> {
        self.codes.first().map(String::as_str)
    }

    /// Whether a language code is part of the catalog.
    pub fn supports(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True when the catalog holds no languages at all.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Selects the most preferred catalog language present in `present`.
    ///
    /// Scans the catalog in priority order and returns the first hit, so the
    /// result is deterministic regardless of how `present` is ordered.
    /// Returns `None` when `present` is empty or disjoint from the catalog.
    pub fn most_preferred<'a>(&'a self, present: &BTreeSet<&str>) -> Option<&'a str> {
        self.codes
            .iter()
            .map(String::as_str)
            .find(|code| present.contains(code))
    }
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGES.iter().copied())
    }
}
