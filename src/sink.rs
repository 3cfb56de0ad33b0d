//! Dictionary naming, emission events, and fact sinks.

use crate::fact::Fact;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// One of the four logical output dictionaries. Three of them are scoped to
/// a language; the category-word collection is a single unscoped store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Dictionary {
    /// Entity-name translations for one language.
    Entity(String),
    /// Words for "category", one fact per language, unscoped.
    CategoryWords,
    /// Category-name translations for one language.
    Category(String),
    /// Infobox-template-name translations for one language.
    InfoboxTemplate(String),
}

impl Dictionary {
    /// Stable name of the dictionary, language-qualified where scoped.
    pub fn name(&self) -> String {
        match self {
            Self::Entity(lang) => format!("entity_dictionary.{lang}"),
            Self::CategoryWords => "category_words".to_string(),
            Self::Category(lang) => format!("category_dictionary.{lang}"),
            Self::InfoboxTemplate(lang) => format!("infobox_template_dictionary.{lang}"),
        }
    }

    /// File name used by the TSV sink.
    pub fn file_name(&self) -> String {
        format!("{}.tsv", self.name())
    }
}

impl fmt::Display for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// A fact routed to one dictionary, produced by the extractor before any
/// sink gets involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    /// Target dictionary.
    pub dictionary: Dictionary,
    /// The fact to append.
    pub fact: Fact,
}

/// Errors surfaced while appending to a sink.
#[derive(Debug)]
pub enum SinkError {
    /// Writing or creating an output file failed.
    Io {
        /// Path of the file or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write '{}': {source}", path.display())
            }
        }
    }
}

impl Error for SinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Destination for extracted facts. Writes are append-only and assumed
/// durable once they return; failures abort the extraction run.
pub trait FactSink {
    /// Appends one fact to the named dictionary.
    fn write(&mut self, dictionary: &Dictionary, fact: &Fact) -> Result<(), SinkError>;
}

/// In-memory sink keyed by dictionary, for tests and small runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemorySink {
    facts: BTreeMap<Dictionary, Vec<Fact>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Facts appended to `dictionary`, in write order.
    pub fn facts(&self, dictionary: &Dictionary) -> &[Fact] {
        self.facts.get(dictionary).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dictionaries that received at least one fact.
    pub fn dictionaries(&self) -> impl Iterator<Item = &Dictionary> {
        self.facts.keys()
    }

    /// Total number of stored facts.
    pub fn len(&self) -> usize {
        self.facts.values().map(Vec::len).sum()
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl FactSink for MemorySink {
    fn write(&mut self, dictionary: &Dictionary, fact: &Fact) -> Result<(), SinkError> {
        self.facts
            .entry(dictionary.clone())
            .or_default()
            .push(fact.clone());
        Ok(())
    }
}

/// Sink writing one tab-separated file per dictionary under a root
/// directory. Files are opened lazily on first write and buffered;
/// [`TsvSink::finish`] flushes everything.
#[derive(Debug)]
pub struct TsvSink {
    root: PathBuf,
    writers: BTreeMap<Dictionary, BufWriter<File>>,
}

impl TsvSink {
    /// Creates the output directory (and parents) and an empty sink.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| SinkError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self {
            root,
            writers: BTreeMap::new(),
        })
    }

    fn writer(&mut self, dictionary: &Dictionary) -> Result<&mut BufWriter<File>, SinkError> {
        if !self.writers.contains_key(dictionary) {
            let path = self.root.join(dictionary.file_name());
            let file = File::create(&path).map_err(|source| SinkError::Io {
                path: path.clone(),
                source,
            })?;
            self.writers
                .insert(dictionary.clone(), BufWriter::new(file));
        }
        Ok(self
            .writers
            .get_mut(dictionary)
            .expect("writer inserted above"))
    }

    /// Flushes all per-dictionary writers.
    pub fn finish(mut self) -> Result<(), SinkError> {
        let root = self.root.clone();
        for writer in self.writers.values_mut() {
            writer.flush().map_err(|source| SinkError::Io {
                path: root.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

impl FactSink for TsvSink {
    fn write(&mut self, dictionary: &Dictionary, fact: &Fact) -> Result<(), SinkError> {
        let path = self.root.join(dictionary.file_name());
        let writer = self.writer(dictionary)?;
        writeln!(
            writer,
            "{}\t{}\t{}",
            fact.subject, fact.relation, fact.object
        )
        .map_err(|source| SinkError::Io { path, source })
    }
}

/// Record shape used by [`JsonlSink`], one JSON object per line.
#[derive(Debug, Serialize)]
struct EmissionRecord<'a> {
    dictionary: String,
    subject: &'a str,
    relation: &'a str,
    object: &'a str,
}

/// Sink serializing every fact as one JSON line to an arbitrary writer,
/// typically stdout.
#[derive(Debug)]
pub struct JsonlSink<W: Write> {
    out: W,
}

impl<W: Write> JsonlSink<W> {
    /// Wraps a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Flushes and returns the inner writer.
    pub fn finish(mut self) -> Result<W, SinkError> {
        self.out.flush().map_err(|source| SinkError::Io {
            path: PathBuf::from("<stream>"),
            source,
        })?;
        Ok(self.out)
    }
}

impl<W: Write> FactSink for JsonlSink<W> {
    fn write(&mut self, dictionary: &Dictionary, fact: &Fact) -> Result<(), SinkError> {
        let record = EmissionRecord {
            dictionary: dictionary.name(),
            subject: &fact.subject,
            relation: &fact.relation,
            object: &fact.object,
        };
        let stream_err = |source: io::Error| SinkError::Io {
            path: PathBuf::from("<stream>"),
            source,
        };
        serde_json::to_writer(&mut self.out, &record)
            .map_err(|err| stream_err(io::Error::new(io::ErrorKind::Other, err)))?;
        self.out.write_all(b"\n").map_err(stream_err)
    }
}
