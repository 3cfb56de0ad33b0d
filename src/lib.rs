#![warn(missing_docs)]
//! Cross-lingual dictionary extraction from Wikidata-style triple streams.
//!
//! The crate consumes a forward-only stream of subject–predicate–object
//! triples in which all facts about one item are contiguous and terminated by
//! a type-declaration triple. A single pass accumulates per-language name
//! bindings, flushes them at each item boundary, and derives four output
//! dictionaries: entity translations, "category" word forms, category-name
//! translations, and infobox-template translations.

pub mod extractor;
pub mod fact;
pub mod ident;
pub mod lang;
pub mod reader;
pub mod relation_filter;
pub mod sink;

pub use extractor::{
    extract, DictionaryExtractor, ExtractError, ExtractionSummary, LanguageAccumulator,
    CATEGORY_WORD_RELATION, TRANSLATION_RELATION,
};
pub use fact::Fact;
pub use lang::{LanguageCatalog, DEFAULT_LANGUAGES};
pub use reader::{ReadError, TripleReader};
pub use relation_filter::RelationFilter;
pub use sink::{Dictionary, Emission, FactSink, JsonlSink, MemorySink, SinkError, TsvSink};

#[cfg(feature = "debug_logs")]
#[macro_export]
// This allows use of the `eprintln!` macro via `debug_log!` macro.
macro_rules! debug_log {
        ($($arg:tt)*) => {
            eprintln!($($arg)*);
        };
    }
#[cfg(not(feature = "debug_logs"))]
#[macro_export]
// This effectively disables the `eprintln!` macro, effectively removing it from the code during
// compilation.
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}
