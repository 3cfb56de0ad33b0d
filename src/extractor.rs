//! Streaming accumulation of per-item language bindings and derivation of
//! the four output dictionaries.

use crate::debug_log;
use crate::fact::{self, Fact};
use crate::ident;
use crate::lang::LanguageCatalog;
use crate::reader::ReadError;
use crate::sink::{Dictionary, Emission, FactSink, SinkError};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt;

/// Relation suffix identifying a language-binding triple.
pub const IN_LANGUAGE_SUFFIX: &str = "/inLanguage>";
/// Object suffix identifying an item-boundary (type-declaration) triple.
pub const ITEM_MARKER_SUFFIX: &str = "#Item>";
/// Relation of every translation fact.
pub const TRANSLATION_RELATION: &str = "<_hasTranslation>";
/// Relation of category-word facts.
pub const CATEGORY_WORD_RELATION: &str = "<_hasCategoryWord>";

/// Per-item mapping from language code to the item's local name in that
/// language.
///
/// Scoped to exactly one item between two boundary triples. The extractor
/// calls [`LanguageAccumulator::reset`] exactly once per flush; bindings for
/// a trailing item that never sees a boundary are discarded with the value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LanguageAccumulator {
    names: BTreeMap<String, String>,
}

impl LanguageAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a local name to a language, overwriting any earlier binding for
    /// the same language within the current item (last wins).
    pub fn bind(&mut self, lang: impl Into<String>, name: impl Into<String>) {
        self.names.insert(lang.into(), name.into());
    }

    /// True when no language has been bound since the last reset.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of bound languages.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// The local name bound to `lang`, if any.
    pub fn name(&self, lang: &str) -> Option<&str> {
        self.names.get(lang).map(String::as_str)
    }

    /// The set of languages currently bound.
    pub fn languages(&self) -> BTreeSet<&str> {
        self.names.keys().map(String::as_str).collect()
    }

    /// Iterates bindings in language order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(l, n)| (l.as_str(), n.as_str()))
    }

    /// Clears all bindings, returning the accumulator to its initial state.
    /// Invoked by the extractor exactly when an item is flushed.
    pub fn reset(&mut self) {
        self.names.clear();
    }
}

/// Single-pass extractor turning a triple stream into dictionary emissions.
///
/// Feed triples one at a time through [`DictionaryExtractor::observe`]; each
/// call returns the emissions triggered by that triple (usually none, a
/// whole item's worth when the triple is an item boundary).
#[derive(Debug)]
pub struct DictionaryExtractor {
    catalog: LanguageCatalog,
    names: LanguageAccumulator,
    // Languages whose "category" word has already been emitted. Grows
    // monotonically for the lifetime of one extraction run.
    category_words_seen: BTreeSet<String>,
}

impl DictionaryExtractor {
    /// Creates an extractor with the given priority catalog.
    pub fn new(catalog: LanguageCatalog) -> Self {
        Self {
            catalog,
            names: LanguageAccumulator::new(),
            category_words_seen: BTreeSet::new(),
        }
    }

    /// The number of languages currently accumulated for the in-progress item.
    pub fn pending_languages(&self) -> usize {
        self.names.len()
    }

    /// Processes one triple, returning any emissions it triggers.
    ///
    /// Language-binding triples for supported languages augment the current
    /// item's accumulator; an item-boundary triple flushes it; every other
    /// triple (including bindings for unsupported languages) is ignored.
    pub fn observe(&mut self, triple: &Fact) -> Vec<Emission> {
        if triple.relation.ends_with(IN_LANGUAGE_SUFFIX) {
            let lang = fact::strip_quotes(&triple.object);
            if self.catalog.supports(lang) {
                self.names.bind(lang, fact::local_name(&triple.subject));
            } else {
                debug_log!("unsupported language {lang}, skipping {triple:?}");
            }
            Vec::new()
        } else if triple.object.ends_with(ITEM_MARKER_SUFFIX) && !self.names.is_empty() {
            let emissions = self.flush();
            self.names.reset();
            emissions
        } else {
            Vec::new()
        }
    }

    /// Derives all facts for the accumulated item.
    fn flush(&mut self) -> Vec<Emission> {
        let mut out = Vec::new();
        let present = self.names.languages();
        let Some(canonical_lang) = self.catalog.most_preferred(&present) else {
            debug_log!("no catalog language present, dropping item");
            return out;
        };
        let Some(canonical_name) = self.names.name(canonical_lang) else {
            return out;
        };

        for (lang, name) in self.names.iter() {
            out.push(Emission {
                dictionary: Dictionary::Entity(lang.to_string()),
                fact: Fact::new(
                    ident::foreign_entity(name, lang),
                    TRANSLATION_RELATION,
                    ident::foreign_entity(canonical_name, canonical_lang),
                ),
            });
        }

        // Category and infobox derivation only make sense against the
        // reference language's naming conventions.
        if Some(canonical_lang) != self.catalog.reference() {
            return out;
        }

        if let Some(canonical_bare) = fact::category_payload(canonical_name) {
            for (lang, name) in self.names.iter() {
                let Some((category_word, bare_name)) = fact::split_category(name) else {
                    continue;
                };
                if self.category_words_seen.insert(lang.to_string()) {
                    out.push(Emission {
                        dictionary: Dictionary::CategoryWords,
                        fact: Fact::new(
                            ident::string(lang),
                            CATEGORY_WORD_RELATION,
                            ident::string(category_word),
                        ),
                    });
                }
                out.push(Emission {
                    dictionary: Dictionary::Category(lang.to_string()),
                    fact: Fact::new(
                        ident::foreign_category(bare_name, lang),
                        TRANSLATION_RELATION,
                        ident::category(canonical_bare),
                    ),
                });
            }
        }

        if let Some(canonical_bare) = fact::infobox_payload(canonical_name) {
            for (lang, name) in self.names.iter() {
                let Some(bare_name) = fact::split_infobox(name) else {
                    continue;
                };
                out.push(Emission {
                    dictionary: Dictionary::InfoboxTemplate(lang.to_string()),
                    fact: Fact::new(
                        ident::string_with_language(bare_name, lang),
                        TRANSLATION_RELATION,
                        ident::string(canonical_bare),
                    ),
                });
            }
        }

        out
    }
}

/// Counters describing one completed extraction run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Triples pulled from the source.
    pub triples_read: usize,
    /// Items flushed at a boundary.
    pub items_flushed: usize,
    /// Facts written across all dictionaries.
    pub facts_written: usize,
}

/// Errors surfaced while driving an extraction run.
#[derive(Debug)]
pub enum ExtractError {
    /// The triple source failed mid-stream.
    Read(ReadError),
    /// A dictionary sink rejected a write.
    Sink(SinkError),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "triple source failed: {err}"),
            Self::Sink(err) => write!(f, "dictionary sink failed: {err}"),
        }
    }
}

impl Error for ExtractError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) => Some(err),
            Self::Sink(err) => Some(err),
        }
    }
}

impl From<ReadError> for ExtractError {
    fn from(err: ReadError) -> Self {
        Self::Read(err)
    }
}

impl From<SinkError> for ExtractError {
    fn from(err: SinkError) -> Self {
        Self::Sink(err)
    }
}

/// Drives a full extraction: pulls every triple from `triples`, feeds it to
/// a [`DictionaryExtractor`], and forwards each emission to `sink`.
///
/// Bindings of a trailing item that the stream never terminates with a
/// boundary triple are discarded, not flushed. Any read or sink failure
/// aborts the run; facts already written stay written.
pub fn extract<I, S>(
    triples: I,
    catalog: LanguageCatalog,
    sink: &mut S,
) -> Result<ExtractionSummary, ExtractError>
where
    I: IntoIterator<Item = Result<Fact, ReadError>>,
    S: FactSink,
{
    let mut extractor = DictionaryExtractor::new(catalog);
    let mut summary = ExtractionSummary::default();
    for triple in triples {
        let triple = triple?;
        summary.triples_read += 1;
        let emissions = extractor.observe(&triple);
        if !emissions.is_empty() {
            summary.items_flushed += 1;
        }
        for emission in &emissions {
            sink.write(&emission.dictionary, &emission.fact)?;
            summary.facts_written += 1;
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn binding(page: &str, lang: &str) -> Fact {
        Fact::new(
            format!("<http://{lang}.wikipedia.org/wiki/{page}>"),
            "<http://www.wikidata.org/inLanguage>",
            format!("\"{lang}\""),
        )
    }

    fn boundary() -> Fact {
        Fact::new(
            "<http://www.wikidata.org/entity/Q1>",
            "<http://www.w3.org/1999/02/22-rdf-syntax-ns#type>",
            "<http://www.wikidata.org/ontology#Item>",
        )
    }

    fn catalog() -> LanguageCatalog {
        LanguageCatalog::new(["en", "de", "fr"])
    }

    #[test]
    fn boundary_flushes_one_entity_fact_per_language() {
        let mut extractor = DictionaryExtractor::new(catalog());
        assert!(extractor.observe(&binding("Berlin", "en")).is_empty());
        assert!(extractor.observe(&binding("Berlin_de", "de")).is_empty());

        let emissions = extractor.observe(&boundary());
        assert_eq!(
            emissions,
            vec![
                Emission {
                    dictionary: Dictionary::Entity("de".to_string()),
                    fact: Fact::new(
                        "<de/Berlin_de>",
                        TRANSLATION_RELATION,
                        "<en/Berlin>"
                    ),
                },
                Emission {
                    dictionary: Dictionary::Entity("en".to_string()),
                    fact: Fact::new("<en/Berlin>", TRANSLATION_RELATION, "<en/Berlin>"),
                },
            ]
        );
        assert_eq!(extractor.pending_languages(), 0);
    }

    #[test]
    fn boundary_with_empty_accumulator_is_a_no_op() {
        let mut extractor = DictionaryExtractor::new(catalog());
        assert!(extractor.observe(&boundary()).is_empty());
        assert!(extractor.observe(&boundary()).is_empty());
    }

    #[test]
    fn unsupported_languages_never_enter_the_accumulator() {
        let mut extractor = DictionaryExtractor::new(catalog());
        extractor.observe(&binding("Berlino", "it"));
        assert_eq!(extractor.pending_languages(), 0);
        assert!(extractor.observe(&boundary()).is_empty());
    }

    #[test]
    fn bindings_outside_the_catalog_leave_nothing_to_flush() {
        let mut extractor = DictionaryExtractor::new(LanguageCatalog::new(["en"]));
        // "de" is unsupported here, so the accumulator stays empty and the
        // boundary is a no-op.
        extractor.observe(&binding("Berlin_de", "de"));
        assert!(extractor.observe(&boundary()).is_empty());
    }

    #[test]
    fn priority_order_picks_the_most_preferred_present() {
        let mut extractor = DictionaryExtractor::new(catalog());
        extractor.observe(&binding("Berlin_fr", "fr"));
        extractor.observe(&binding("Berlin_de", "de"));

        let emissions = extractor.observe(&boundary());
        for emission in &emissions {
            assert_eq!(emission.fact.object, "<de/Berlin_de>");
        }
        assert_eq!(emissions.len(), 2);
    }

    #[test]
    fn duplicate_bindings_last_one_wins() {
        let mut extractor = DictionaryExtractor::new(catalog());
        extractor.observe(&binding("Old_name", "en"));
        extractor.observe(&binding("New_name", "en"));

        let emissions = extractor.observe(&boundary());
        assert_eq!(emissions.len(), 1);
        assert_eq!(emissions[0].fact.subject, "<en/New_name>");
    }

    #[test]
    fn category_items_emit_words_and_category_dictionary() {
        let mut extractor = DictionaryExtractor::new(catalog());
        extractor.observe(&binding("Category%3ACities", "en"));
        extractor.observe(&binding("Kategorie%3ASt%C3%A4dte", "de"));

        let emissions = extractor.observe(&boundary());
        let category_words: Vec<_> = emissions
            .iter()
            .filter(|e| e.dictionary == Dictionary::CategoryWords)
            .collect();
        assert_eq!(category_words.len(), 2);
        assert_eq!(
            category_words[0].fact,
            Fact::new("\"de\"", CATEGORY_WORD_RELATION, "\"Kategorie:\"")
        );
        assert_eq!(
            category_words[1].fact,
            Fact::new("\"en\"", CATEGORY_WORD_RELATION, "\"Category:\"")
        );

        let category_facts: Vec<_> = emissions
            .iter()
            .filter(|e| e.dictionary == Dictionary::Category("de".to_string()))
            .collect();
        assert_eq!(
            category_facts,
            vec![&Emission {
                dictionary: Dictionary::Category("de".to_string()),
                fact: Fact::new(
                    "<de/wikicategory_Städte>",
                    TRANSLATION_RELATION,
                    "<wikicategory_Cities>"
                ),
            }]
        );
    }

    #[test]
    fn category_words_are_emitted_once_per_language_across_items() {
        let mut extractor = DictionaryExtractor::new(catalog());
        for item in ["Cities", "Rivers"] {
            extractor.observe(&binding(&format!("Category%3A{item}"), "en"));
            extractor.observe(&binding(&format!("Kategorie%3A{item}_de"), "de"));
            let emissions = extractor.observe(&boundary());
            let words = emissions
                .iter()
                .filter(|e| e.dictionary == Dictionary::CategoryWords)
                .count();
            if item == "Cities" {
                assert_eq!(words, 2);
            } else {
                assert_eq!(words, 0);
            }
        }
    }

    #[test]
    fn category_names_without_colon_are_skipped() {
        let mut extractor = DictionaryExtractor::new(catalog());
        extractor.observe(&binding("Category%3ACities", "en"));
        extractor.observe(&binding("NoColon", "de"));

        let emissions = extractor.observe(&boundary());
        assert!(!emissions
            .iter()
            .any(|e| e.dictionary == Dictionary::Category("de".to_string())));
        // The entity dictionary still receives the German name.
        assert!(emissions
            .iter()
            .any(|e| e.dictionary == Dictionary::Entity("de".to_string())));
    }

    #[test]
    fn category_derivation_requires_the_reference_language() {
        // Canonical language is "de" (en absent), so no category derivation
        // even though the German name looks category-like.
        let mut extractor = DictionaryExtractor::new(catalog());
        extractor.observe(&binding("Kategorie%3ASt%C3%A4dte", "de"));

        let emissions = extractor.observe(&boundary());
        assert_eq!(emissions.len(), 1);
        assert_eq!(
            emissions[0].dictionary,
            Dictionary::Entity("de".to_string())
        );
    }

    #[test]
    fn infobox_items_emit_template_dictionary() {
        let mut extractor = DictionaryExtractor::new(catalog());
        extractor.observe(&binding("Template%3AInfobox_settlement", "en"));
        extractor.observe(&binding("Vorlage%3AInfobox_Ort", "de"));

        let emissions = extractor.observe(&boundary());
        let infobox: Vec<_> = emissions
            .iter()
            .filter(|e| matches!(e.dictionary, Dictionary::InfoboxTemplate(_)))
            .collect();
        assert_eq!(infobox.len(), 2);
        assert_eq!(
            infobox[0].fact,
            Fact::new("\"Ort\"@de", TRANSLATION_RELATION, "\"settlement\"")
        );
        assert_eq!(
            infobox[1].fact,
            Fact::new("\"settlement\"@en", TRANSLATION_RELATION, "\"settlement\"")
        );
    }

    #[test]
    fn infobox_names_without_underscore_are_skipped() {
        let mut extractor = DictionaryExtractor::new(catalog());
        extractor.observe(&binding("Template%3AInfobox_settlement", "en"));
        extractor.observe(&binding("Infoboks", "de"));

        let emissions = extractor.observe(&boundary());
        assert!(!emissions
            .iter()
            .any(|e| e.dictionary == Dictionary::InfoboxTemplate("de".to_string())));
    }

    #[test]
    fn extract_discards_a_trailing_unflushed_item() {
        let triples = vec![
            Ok(binding("Berlin", "en")),
            Ok(binding("Berlin_de", "de")),
            Ok(boundary()),
            Ok(binding("Paris", "en")),
        ];
        let mut sink = crate::sink::MemorySink::new();
        let summary = extract(triples, catalog(), &mut sink).expect("extraction runs");

        assert_eq!(summary.triples_read, 4);
        assert_eq!(summary.items_flushed, 1);
        assert_eq!(summary.facts_written, 2);
        assert!(sink
            .facts(&Dictionary::Entity("en".to_string()))
            .iter()
            .all(|f| !f.subject.contains("Paris")));
    }
}
