//! Triple value type and term-level parsing helpers.

use serde::Serialize;
use std::borrow::Cow;

/// Marker prefix identifying a category page name in the reference language.
pub const CATEGORY_MARKER: &str = "Category:";
/// Marker prefix identifying an infobox template name in the reference language.
pub const INFOBOX_MARKER: &str = "Template:Infobox_";

/// One subject–predicate–object triple, used both for input statements and
/// emitted dictionary facts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Fact {
    /// Subject term, usually a bracketed identifier.
    pub subject: String,
    /// Relation term.
    pub relation: String,
    /// Object term: a bracketed identifier or a quoted literal.
    pub object: String,
}

impl Fact {
    /// Builds a fact from the three term components.
    pub fn new(
        subject: impl Into<String>,
        relation: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            relation: relation.into(),
            object: object.into(),
        }
    }
}

/// Removes one pair of surrounding double quotes, if present.
///
/// Terms without surrounding quotes are returned unchanged; this is how the
/// object of a language-binding triple (`"en"`) becomes a bare language code.
pub fn strip_quotes(term: &str) -> &str {
    term.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(term)
}

/// Decodes percent-escapes (`%C3%A4` and friends) leniently.
///
/// Escapes that do not form valid UTF-8 leave the term untouched rather than
/// failing: the corpus contains the occasional stray `%` and the extraction
/// is best-effort.
pub fn decode_percent(term: &str) -> Cow<'_, str> {
    match urlencoding::decode(term) {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(term),
    }
}

/// Derives the local page name from a bracketed, percent-encoded subject.
///
/// The term is percent-decoded first, then the angle brackets and everything
/// up to the last `/` are stripped: `<http://de.wikipedia.org/wiki/Z%C3%BCrich>`
/// becomes `Zürich`.
pub fn local_name(subject: &str) -> String {
    let decoded = decode_percent(subject);
    let bare = decoded.trim_start_matches('<').trim_end_matches('>');
    match bare.rfind('/') {
        Some(cut) => bare[cut + 1..].to_string(),
        None => bare.to_string(),
    }
}

/// Splits a local category name at its first colon.
///
/// Returns the language's word for "category" (up to and including the
/// colon) and the bare category name after it, or `None` when the name
/// carries no colon at all.
pub fn split_category(name: &str) -> Option<(&str, &str)> {
    let cut = name.find(':')?;
    Some((&name[..=cut], &name[cut + 1..]))
}

/// Returns the template name after the first underscore of a local infobox
/// template name, or `None` when there is no underscore.
pub fn split_infobox(name: &str) -> Option<&str> {
    let cut = name.find('_')?;
    Some(&name[cut + 1..])
}

/// Returns the bare category name of a reference-language page name carrying
/// the `Category:` marker.
pub fn category_payload(name: &str) -> Option<&str> {
    name.strip_prefix(CATEGORY_MARKER)
}

/// Returns the bare template name of a reference-language page name carrying
/// the `Template:Infobox_` marker.
pub fn infobox_payload(name: &str) -> Option<&str> {
    name.strip_prefix(INFOBOX_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_surrounding_quotes_only() {
        assert_eq!(strip_quotes("\"en\""), "en");
        assert_eq!(strip_quotes("en"), "en");
        assert_eq!(strip_quotes("\"unterminated"), "\"unterminated");
    }

    #[test]
    fn decodes_percent_escapes_leniently() {
        assert_eq!(decode_percent("St%C3%A4dte"), "Städte");
        assert_eq!(decode_percent("plain"), "plain");
        // Invalid UTF-8 after decoding falls back to the raw term.
        assert_eq!(decode_percent("bad%FFescape"), "bad%FFescape");
    }

    #[test]
    fn local_name_decodes_then_strips() {
        assert_eq!(
            local_name("<http://de.wikipedia.org/wiki/Z%C3%BCrich>"),
            "Zürich"
        );
        assert_eq!(local_name("<http://en.wikipedia.org/wiki/Berlin>"), "Berlin");
        assert_eq!(local_name("Berlin"), "Berlin");
    }

    #[test]
    fn category_split_keeps_the_colon_on_the_word() {
        assert_eq!(
            split_category("Kategorie:Städte"),
            Some(("Kategorie:", "Städte"))
        );
        assert_eq!(split_category("NoColonHere"), None);
        // First colon wins when the bare name itself contains one.
        assert_eq!(
            split_category("Categoria:A:B"),
            Some(("Categoria:", "A:B"))
        );
    }

    #[test]
    fn infobox_split_cuts_at_first_underscore() {
        assert_eq!(split_infobox("Infobox_Stadt"), Some("Stadt"));
        assert_eq!(split_infobox("Infobox_Stadt_DE"), Some("Stadt_DE"));
        assert_eq!(split_infobox("Plain"), None);
    }

    #[test]
    fn marker_payloads() {
        assert_eq!(category_payload("Category:Cities"), Some("Cities"));
        assert_eq!(category_payload("Cities"), None);
        assert_eq!(infobox_payload("Template:Infobox_settlement"), Some("settlement"));
        assert_eq!(infobox_payload("Template:Navbox"), None);
    }
}
