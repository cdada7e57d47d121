//! Building an [`InvertedIndex`] from a document stream.

use std::sync::Arc;

use ahash::AHashSet;
use log::info;

use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer};
use crate::corpus::{Corpus, DocumentId};
use crate::index::inverted::InvertedIndex;

/// Builds an inverted index from `(id, text)` pairs.
///
/// Documents are processed in input order, which fixes the order of every
/// posting list. Each id is appended to a term's list at most once.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    tokenizer: Arc<dyn Tokenizer>,
}

impl IndexBuilder {
    /// Create a builder using the default [`RegexTokenizer`].
    pub fn new() -> Self {
        IndexBuilder {
            tokenizer: Arc::new(RegexTokenizer::new()),
        }
    }

    /// Use a different tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Build an index from an ordered document sequence.
    pub fn build<I, S>(&self, documents: I) -> InvertedIndex
    where
        I: IntoIterator<Item = (DocumentId, S)>,
        S: AsRef<str>,
    {
        info!(
            "Building inverted index with the {} tokenizer...",
            self.tokenizer.name()
        );

        let mut index = InvertedIndex::new();
        // Membership sets parallel to the index entries, so dedup is O(1)
        // without disturbing append order.
        let mut members: Vec<AHashSet<DocumentId>> = Vec::new();
        let mut documents_seen = 0usize;

        for (doc_id, text) in documents {
            documents_seen += 1;
            for term in self.tokenizer.tokenize(text.as_ref()) {
                match index.position(&term) {
                    Some(position) => {
                        if members[position].insert(doc_id) {
                            index.postings_at_mut(position).push(doc_id);
                        }
                    }
                    None => {
                        index.push_entry(term, vec![doc_id]);
                        members.push(AHashSet::from_iter([doc_id]));
                    }
                }
            }
        }

        info!(
            "Indexed {} documents into {} terms ({} postings)",
            documents_seen,
            index.len(),
            index.total_postings()
        );
        index
    }

    /// Build an index from a loaded [`Corpus`].
    pub fn build_corpus(&self, corpus: &Corpus) -> InvertedIndex {
        self.build(corpus.iter())
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an index with the default tokenizer.
pub fn build<I, S>(documents: I) -> InvertedIndex
where
    I: IntoIterator<Item = (DocumentId, S)>,
    S: AsRef<str>,
{
    IndexBuilder::new().build(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::TermStream;

    fn scenario_corpus() -> Corpus {
        vec![
            (1, "first document info"),
            (2, "second doc information"),
            (3, "third document information"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_build_posting_lists() {
        let index = IndexBuilder::new().build_corpus(&scenario_corpus());

        assert_eq!(index.get("document"), Some(&[1, 3][..]));
        assert_eq!(index.get("information"), Some(&[2, 3][..]));
        assert_eq!(index.get("first"), Some(&[1][..]));
        assert_eq!(index.len(), 7);
    }

    #[test]
    fn test_query_built_index() {
        let index = build(scenario_corpus().iter());
        let result = index.query(&["document", "information"]);
        assert_eq!(result.len(), 1);
        assert!(result.contains(&3));
    }

    #[test]
    fn test_repeated_term_is_deduplicated() {
        let index = build(vec![(2u64, "doc second doc information doc")]);
        assert_eq!(index.get("doc"), Some(&[2][..]));
    }

    #[test]
    fn test_repeated_document_id_is_deduplicated() {
        let index = build(vec![(5u64, "alpha beta"), (6, "alpha"), (5, "alpha gamma")]);
        assert_eq!(index.get("alpha"), Some(&[5, 6][..]));
        assert_eq!(index.get("gamma"), Some(&[5][..]));
    }

    #[test]
    fn test_posting_order_follows_input_order() {
        let index = build(vec![(9u64, "shared"), (3, "shared"), (7, "shared")]);
        assert_eq!(index.get("shared"), Some(&[9, 3, 7][..]));
    }

    #[test]
    fn test_empty_terms_are_indexed() {
        let index = build(vec![(1u64, "trailing dot.")]);
        assert_eq!(index.get(""), Some(&[1][..]));
    }

    #[test]
    fn test_build_is_deterministic() {
        let corpus = scenario_corpus();
        let builder = IndexBuilder::new();
        assert_eq!(builder.build_corpus(&corpus), builder.build_corpus(&corpus));
    }

    #[derive(Debug)]
    struct WhitespaceTokenizer;

    impl Tokenizer for WhitespaceTokenizer {
        fn tokenize<'a>(&'a self, text: &'a str) -> TermStream<'a> {
            Box::new(text.split_whitespace().map(str::to_string))
        }

        fn name(&self) -> &'static str {
            "whitespace"
        }
    }

    #[test]
    fn test_custom_tokenizer() {
        let builder = IndexBuilder::new().with_tokenizer(Arc::new(WhitespaceTokenizer));
        assert_eq!(builder.tokenizer().name(), "whitespace");

        let index = builder.build(vec![(1u64, "Keep-Case intact")]);
        assert_eq!(index.get("Keep-Case"), Some(&[1][..]));
        assert_eq!(index.get("keep"), None);
    }
}
