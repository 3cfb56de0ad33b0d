//! Line-based reader for N-Triples-style dump files.
//!
//! One statement per line: `SUBJECT RELATION OBJECT .` with whitespace
//! between terms. The object may be a quoted literal (quotes are kept on the
//! term; the extractor strips them where it cares). Blank lines, `#`
//! comments, and lines that do not decompose into three terms are skipped —
//! the extraction is best-effort and only two statement shapes matter
//! downstream. I/O failures are fatal and end the iteration.

use crate::fact::Fact;
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Errors surfaced while opening or reading a triple source.
#[derive(Debug)]
pub enum ReadError {
    /// The input file could not be opened.
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Reading a line from the source failed mid-stream.
    Io(io::Error),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "failed to open '{}': {source}", path.display())
            }
            Self::Io(err) => write!(f, "read failed: {err}"),
        }
    }
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Io(err) => Some(err),
        }
    }
}

/// Lazy triple reader over any buffered byte source.
///
/// The reader owns its source; dropping it releases the underlying file on
/// every exit path, including early termination through a propagated error.
#[derive(Debug)]
pub struct TripleReader<R: BufRead> {
    source: R,
    line: String,
    done: bool,
}

impl TripleReader<BufReader<File>> {
    /// Opens a dump file for reading. A missing or unreadable file is a
    /// fatal error reported before any triple is processed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ReadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TripleReader<R> {
    /// Wraps an already-buffered source.
    pub fn new(source: R) -> Self {
        Self {
            source,
            line: String::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for TripleReader<R> {
    type Item = Result<Fact, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.line.clear();
            match self.source.read_line(&mut self.line) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    if let Some(fact) = parse_line(&self.line) {
                        return Some(Ok(fact));
                    }
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(ReadError::Io(err)));
                }
            }
        }
        None
    }
}

/// Decomposes one line into a triple, or `None` for blanks, comments, and
/// lines without three terms.
fn parse_line(line: &str) -> Option<Fact> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = match line.strip_suffix('.') {
        Some(rest) => rest.trim_end(),
        None => line,
    };
    let (subject, rest) = split_term(line)?;
    let (relation, object) = split_term(rest)?;
    if object.is_empty() {
        return None;
    }
    Some(Fact::new(subject, relation, object))
}

/// Cuts the first whitespace-delimited term off `input`, returning it and
/// the trimmed remainder. `None` when there is no remainder.
fn split_term(input: &str) -> Option<(&str, &str)> {
    let cut = input.find(char::is_whitespace)?;
    let rest = input[cut..].trim_start();
    if rest.is_empty() {
        return None;
    }
    Some((&input[..cut], rest))
}
