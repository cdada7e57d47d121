//! Text (JSON) encoding.
//!
//! The stream is one JSON object, no envelope: keys are terms and values are
//! arrays of document ids as JSON numbers, e.g.
//! `{"document":[1,3],"information":[2,3]}`. Terms are written in index
//! iteration order and read back in stream order.

use std::fmt;
use std::io::{Read, Write};

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::IndexCodec;
use crate::error::Result;
use crate::index::inverted::{InvertedIndex, PostingList};

/// JSON object codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl IndexCodec for TextCodec {
    fn encode(&self, index: &InvertedIndex, writer: &mut dyn Write) -> Result<()> {
        serde_json::to_writer(writer, index)?;
        Ok(())
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<InvertedIndex> {
        Ok(serde_json::from_reader(reader)?)
    }
}

impl Serialize for InvertedIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (term, postings) in self.iter() {
            map.serialize_entry(term, postings)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for InvertedIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(IndexVisitor)
    }
}

struct IndexVisitor;

impl<'de> Visitor<'de> for IndexVisitor {
    type Value = InvertedIndex;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping terms to arrays of document ids")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut entries: Vec<(String, PostingList)> =
            Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((term, postings)) = access.next_entry::<String, PostingList>()? {
            entries.push((term, postings));
        }
        InvertedIndex::assemble(entries).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TermdexError;

    fn decode(data: &str) -> Result<InvertedIndex> {
        TextCodec.from_bytes(data.as_bytes())
    }

    #[test]
    fn test_encode_layout() {
        let index =
            InvertedIndex::from_postings(vec![("b", vec![2]), ("a", vec![1, 2])]).unwrap();
        let bytes = TextCodec.to_bytes(&index).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"b":[2],"a":[1,2]}"#);
    }

    #[test]
    fn test_round_trip() {
        let index = InvertedIndex::from_postings(vec![
            ("first", vec![1]),
            ("document", vec![1, 3]),
            ("текстовый", vec![11]),
            ("", vec![4, 2]),
            ("large", vec![u64::MAX, 0]),
        ])
        .unwrap();
        let bytes = TextCodec.to_bytes(&index).unwrap();
        let decoded = TextCodec.from_bytes(&bytes).unwrap();
        assert_eq!(decoded, index);
        assert_eq!(decoded.terms().collect::<Vec<_>>(), index.terms().collect::<Vec<_>>());
    }

    #[test]
    fn test_decode_empty_object() {
        assert!(decode("{}").unwrap().is_empty());
        assert!(decode(" {}\n").unwrap().is_empty());
    }

    #[test]
    fn test_decode_invalid_json() {
        assert!(matches!(decode("{\"a\": [1,"), Err(TermdexError::CorruptStream(_))));
        assert!(matches!(decode(""), Err(TermdexError::CorruptStream(_))));
        assert!(matches!(decode("[1, 2]"), Err(TermdexError::CorruptStream(_))));
    }

    #[test]
    fn test_decode_rejects_non_integer_ids() {
        assert!(matches!(decode(r#"{"a": ["1"]}"#), Err(TermdexError::CorruptStream(_))));
        assert!(matches!(decode(r#"{"a": [-1]}"#), Err(TermdexError::CorruptStream(_))));
        assert!(matches!(decode(r#"{"a": [1.5]}"#), Err(TermdexError::CorruptStream(_))));
    }

    #[test]
    fn test_decode_rejects_broken_invariants() {
        assert!(matches!(decode(r#"{"a": []}"#), Err(TermdexError::CorruptStream(_))));
        assert!(matches!(decode(r#"{"a": [1, 1]}"#), Err(TermdexError::CorruptStream(_))));
        assert!(matches!(
            decode(r#"{"a": [1], "a": [2]}"#),
            Err(TermdexError::CorruptStream(_))
        ));
    }
}
