//! Construction of the identifier terms used in emitted facts.
//!
//! Each constructor is injective over distinct (name, language) pairs: the
//! language code is kept textually separate from the name, so two different
//! pairs can never render to the same term.

/// Identifier for an entity named in a foreign (or the reference) language.
pub fn foreign_entity(name: &str, lang: &str) -> String {
    format!("<{lang}/{name}>")
}

/// Identifier for a category named in a foreign language.
pub fn foreign_category(name: &str, lang: &str) -> String {
    format!("<{lang}/wikicategory_{name}>")
}

/// Identifier for a category in the reference language.
pub fn category(name: &str) -> String {
    format!("<wikicategory_{name}>")
}

/// A language-tagged string literal term.
pub fn string_with_language(value: &str, lang: &str) -> String {
    format!("\"{value}\"@{lang}")
}

/// A plain string literal term.
pub fn string(value: &str) -> String {
    format!("\"{value}\"")
}
