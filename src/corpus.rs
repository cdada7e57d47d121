//! Corpus loading from tab-separated document files.
//!
//! ## File format
//!
//! One document per line: `<non-negative integer>\t<free text>`. Each line is
//! trimmed and lowercased before it is split on its first tab; whitespace
//! around the id is ignored. A repeated id
//! replaces the earlier text but keeps the earlier position.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;
use log::info;

use crate::error::{Result, TermdexError};

/// Caller-supplied identifier of a document.
pub type DocumentId = u64;

/// An ordered collection of documents keyed by id.
///
/// Iteration follows first-insertion order of each id.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<(DocumentId, String)>,
    positions: AHashMap<DocumentId, usize>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a corpus file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(
            "Loading documents from {} to build inverted index...",
            path.display()
        );
        let file = File::open(path)?;
        let corpus = Self::from_reader(BufReader::new(file))?;
        info!("Loaded {} documents from {}", corpus.len(), path.display());
        Ok(corpus)
    }

    /// Read a corpus from any buffered line stream.
    ///
    /// The whole stream is rejected on the first malformed line.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut corpus = Corpus::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let (doc_id, text) = parse_record(&line, number + 1)?;
            corpus.insert(doc_id, text);
        }
        Ok(corpus)
    }

    /// Insert a document, replacing the text of an existing id in place.
    pub fn insert(&mut self, doc_id: DocumentId, text: impl Into<String>) {
        let text = text.into();
        match self.positions.get(&doc_id) {
            Some(&position) => self.documents[position].1 = text,
            None => {
                self.positions.insert(doc_id, self.documents.len());
                self.documents.push((doc_id, text));
            }
        }
    }

    /// Text of a document, if present.
    pub fn get(&self, doc_id: DocumentId) -> Option<&str> {
        self.positions
            .get(&doc_id)
            .map(|&position| self.documents[position].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Iterate documents in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DocumentId, &str)> {
        self.documents
            .iter()
            .map(|(doc_id, text)| (*doc_id, text.as_str()))
    }
}

impl PartialEq for Corpus {
    fn eq(&self, other: &Self) -> bool {
        self.documents == other.documents
    }
}

impl<S: Into<String>> FromIterator<(DocumentId, S)> for Corpus {
    fn from_iter<I: IntoIterator<Item = (DocumentId, S)>>(iter: I) -> Self {
        let mut corpus = Corpus::new();
        for (doc_id, text) in iter {
            corpus.insert(doc_id, text);
        }
        corpus
    }
}

/// Parse one `<id>\t<text>` line.
fn parse_record(line: &str, number: usize) -> Result<(DocumentId, String)> {
    let line = line.trim().to_lowercase();
    let (id, text) = line
        .split_once('\t')
        .ok_or_else(|| TermdexError::malformed_record(number, "missing tab delimiter"))?;
    let id = id.trim();

    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TermdexError::malformed_record(
            number,
            format!("document id '{id}' is not a non-negative integer"),
        ));
    }
    let doc_id = id.parse::<DocumentId>().map_err(|e| {
        TermdexError::malformed_record(number, format!("document id '{id}' is out of range: {e}"))
    })?;

    Ok((doc_id, text.to_string()))
}
