//! The term to posting-list mapping and its AND query.
//!
//! An [`InvertedIndex`] is immutable once constructed: it is produced by
//! [`IndexBuilder`](crate::index::builder::IndexBuilder), by
//! [`InvertedIndex::from_postings`], or by decoding a persisted stream.
//! Rebuilding always produces a new instance, so a finished index can be
//! shared between readers without synchronization.

use ahash::{AHashMap, AHashSet};
use log::debug;

use crate::corpus::DocumentId;
use crate::error::{Result, TermdexError};
use crate::index::query::Query;

/// Document ids containing one term, in first-occurrence order.
pub type PostingList = Vec<DocumentId>;

/// Mapping from term to posting list.
///
/// Terms iterate in the order they were first inserted; the binary codec
/// writes records in that order.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    entries: Vec<(String, PostingList)>,
    lookup: AHashMap<String, usize>,
}

impl InvertedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from explicit `(term, postings)` pairs.
    ///
    /// Fails with `InvalidArgument` when a term repeats, a posting list is
    /// empty, or a posting list holds the same id twice.
    pub fn from_postings<I, S>(postings: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, PostingList)>,
        S: Into<String>,
    {
        Self::assemble(postings).map_err(TermdexError::invalid_argument)
    }

    /// Validating constructor shared with the decoders, which report the
    /// message as a corrupt stream instead.
    pub(crate) fn assemble<I, S>(postings: I) -> std::result::Result<Self, String>
    where
        I: IntoIterator<Item = (S, PostingList)>,
        S: Into<String>,
    {
        let mut index = InvertedIndex::new();
        for (term, list) in postings {
            let term = term.into();
            if index.lookup.contains_key(&term) {
                return Err(format!("term '{term}' appears more than once"));
            }
            if list.is_empty() {
                return Err(format!("term '{term}' has an empty posting list"));
            }
            let mut seen = AHashSet::with_capacity(list.len());
            if let Some(doc_id) = list.iter().find(|doc_id| !seen.insert(**doc_id)) {
                return Err(format!(
                    "posting list of term '{term}' contains document {doc_id} twice"
                ));
            }
            index.push_entry(term, list);
        }
        Ok(index)
    }

    /// Append a new term. The caller guarantees the term is not yet present.
    pub(crate) fn push_entry(&mut self, term: String, postings: PostingList) -> usize {
        let position = self.entries.len();
        self.lookup.insert(term.clone(), position);
        self.entries.push((term, postings));
        position
    }

    pub(crate) fn postings_at_mut(&mut self, position: usize) -> &mut PostingList {
        &mut self.entries[position].1
    }

    pub(crate) fn position(&self, term: &str) -> Option<usize> {
        self.lookup.get(term).copied()
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Posting list of `term`, or `None` if the term is not indexed.
    pub fn get(&self, term: &str) -> Option<&[DocumentId]> {
        self.position(term)
            .map(|position| self.entries[position].1.as_slice())
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.lookup.contains_key(term)
    }

    /// Terms in iteration order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(term, _)| term.as_str())
    }

    /// `(term, postings)` pairs in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DocumentId])> {
        self.entries
            .iter()
            .map(|(term, postings)| (term.as_str(), postings.as_slice()))
    }

    /// Sum of all posting list lengths.
    pub fn total_postings(&self) -> usize {
        self.entries.iter().map(|(_, postings)| postings.len()).sum()
    }

    /// Documents containing every one of `terms`.
    ///
    /// An empty query matches nothing, and so does a query naming any term
    /// that is not in the index. Repeated terms have no effect.
    pub fn query<S: AsRef<str>>(&self, terms: &[S]) -> AHashSet<DocumentId> {
        let mut lists = Vec::with_capacity(terms.len());
        for term in terms {
            match self.get(term.as_ref()) {
                Some(postings) => lists.push(postings),
                None => {
                    debug!("Term '{}' is not indexed, query has no matches", term.as_ref());
                    return AHashSet::new();
                }
            }
        }

        // Start from the shortest list so the working set only shrinks.
        lists.sort_by_key(|postings| postings.len());
        let Some((first, rest)) = lists.split_first() else {
            return AHashSet::new();
        };

        let mut result: AHashSet<DocumentId> = first.iter().copied().collect();
        for postings in rest {
            if result.is_empty() {
                break;
            }
            let other: AHashSet<DocumentId> = postings.iter().copied().collect();
            result.retain(|doc_id| other.contains(doc_id));
        }

        debug!("Query over {} terms matched {} documents", terms.len(), result.len());
        result
    }

    /// Evaluate a parsed [`Query`].
    pub fn search(&self, query: &Query) -> AHashSet<DocumentId> {
        self.query(query.terms())
    }
}

impl PartialEq for InvertedIndex {
    /// Mapping equality: same terms with equal posting lists, regardless of
    /// term iteration order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(term, postings)| other.get(term) == Some(postings))
    }
}

impl Eq for InvertedIndex {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> InvertedIndex {
        InvertedIndex::from_postings(vec![
            ("a", vec![1, 2]),
            ("b", vec![2]),
            ("c", vec![1, 3]),
            ("d", vec![2, 3]),
        ])
        .unwrap()
    }

    fn sorted(result: AHashSet<DocumentId>) -> Vec<DocumentId> {
        let mut ids: Vec<DocumentId> = result.into_iter().collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_single_term_query() {
        let index = sample_index();
        assert_eq!(sorted(index.query(&["a"])), vec![1, 2]);
        assert_eq!(sorted(index.query(&["b"])), vec![2]);
    }

    #[test]
    fn test_intersection() {
        let index = sample_index();
        assert_eq!(sorted(index.query(&["a", "b"])), vec![2]);
        assert_eq!(sorted(index.query(&["c", "d"])), vec![3]);
        assert!(index.query(&["b", "c"]).is_empty());
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let index = sample_index();
        let terms: [&str; 0] = [];
        assert!(index.query(&terms).is_empty());
    }

    #[test]
    fn test_unknown_term_short_circuits() {
        let index = sample_index();
        assert!(index.query(&["zzz"]).is_empty());
        assert!(index.query(&["a", "zzz"]).is_empty());
        assert!(index.query(&["zzz", "a"]).is_empty());
    }

    #[test]
    fn test_duplicate_terms_are_idempotent() {
        let index = sample_index();
        assert_eq!(index.query(&["a", "a", "a"]), index.query(&["a"]));
    }

    #[test]
    fn test_result_is_subset_of_first_term() {
        let index = sample_index();
        let queries: [&[&str]; 4] = [&["a", "b"], &["c", "d", "a"], &["d", "c"], &["a", "c"]];
        for terms in queries {
            let narrowed = index.query(terms);
            let first = index.query(&terms[..1]);
            assert!(narrowed.is_subset(&first), "query {terms:?}");
        }
    }

    #[test]
    fn test_lookup_accessors() {
        let index = sample_index();
        assert_eq!(index.len(), 4);
        assert!(!index.is_empty());
        assert_eq!(index.get("c"), Some(&[1, 3][..]));
        assert_eq!(index.get("x"), None);
        assert!(index.contains_term("d"));
        assert_eq!(index.terms().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
        assert_eq!(index.total_postings(), 7);
    }

    #[test]
    fn test_equality_ignores_term_order() {
        let forward = InvertedIndex::from_postings(vec![("x", vec![1]), ("y", vec![2, 1])]).unwrap();
        let backward = InvertedIndex::from_postings(vec![("y", vec![2, 1]), ("x", vec![1])]).unwrap();
        assert_eq!(forward, backward);

        let reordered = InvertedIndex::from_postings(vec![("x", vec![1]), ("y", vec![1, 2])]).unwrap();
        assert_ne!(forward, reordered);
    }

    #[test]
    fn test_from_postings_rejects_invalid_entries() {
        assert!(matches!(
            InvertedIndex::from_postings(vec![("a", vec![1]), ("a", vec![2])]),
            Err(TermdexError::InvalidArgument(_))
        ));
        assert!(matches!(
            InvertedIndex::from_postings(vec![("a", vec![])]),
            Err(TermdexError::InvalidArgument(_))
        ));
        assert!(matches!(
            InvertedIndex::from_postings(vec![("a", vec![4, 5, 4])]),
            Err(TermdexError::InvalidArgument(_))
        ));
    }
}
