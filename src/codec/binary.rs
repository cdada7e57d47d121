//! Binary encoding.
//!
//! ## File format
//!
//! One record per term in index iteration order, with no header, length
//! prefix or trailer. All integers are big-endian `u16`:
//!
//! ```text
//! [u16: term byte length][term bytes, UTF-8]
//! [u16: posting count][u16: doc id] * posting count
//! ```
//!
//! The decoder reads records until the stream is exhausted. A stream that
//! ends inside a record is corrupt. Terms longer than 65535 bytes, posting
//! lists longer than 65535 entries and ids above 65535 cannot be encoded.

use std::io::{self, Cursor, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::codec::IndexCodec;
use crate::corpus::DocumentId;
use crate::error::{Result, TermdexError};
use crate::index::inverted::{InvertedIndex, PostingList};

/// Largest value of every length and id field.
pub const MAX_FIELD_VALUE: usize = u16::MAX as usize;

/// Fixed-width big-endian record codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec;

impl BinaryCodec {
    /// Check that every field of every record fits in a `u16`.
    fn validate(index: &InvertedIndex) -> Result<()> {
        for (term, postings) in index.iter() {
            if term.len() > MAX_FIELD_VALUE {
                return Err(TermdexError::encoding_overflow(format!(
                    "term of {} bytes exceeds {MAX_FIELD_VALUE} bytes",
                    term.len()
                )));
            }
            if postings.len() > MAX_FIELD_VALUE {
                return Err(TermdexError::encoding_overflow(format!(
                    "posting list of term '{term}' has {} entries, more than {MAX_FIELD_VALUE}",
                    postings.len()
                )));
            }
            if let Some(doc_id) = postings
                .iter()
                .find(|doc_id| **doc_id > MAX_FIELD_VALUE as DocumentId)
            {
                return Err(TermdexError::encoding_overflow(format!(
                    "document id {doc_id} of term '{term}' exceeds {MAX_FIELD_VALUE}"
                )));
            }
        }
        Ok(())
    }

    fn read_record(cursor: &mut Cursor<&[u8]>) -> io::Result<(String, PostingList)> {
        let term_len = cursor.read_u16::<BigEndian>()? as usize;
        let mut term_bytes = vec![0u8; term_len];
        cursor.read_exact(&mut term_bytes)?;
        let term = String::from_utf8(term_bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let count = cursor.read_u16::<BigEndian>()? as usize;
        let mut postings = Vec::with_capacity(count);
        for _ in 0..count {
            postings.push(cursor.read_u16::<BigEndian>()? as DocumentId);
        }
        Ok((term, postings))
    }
}

impl IndexCodec for BinaryCodec {
    fn encode(&self, index: &InvertedIndex, writer: &mut dyn Write) -> Result<()> {
        Self::validate(index)?;

        for (term, postings) in index.iter() {
            writer.write_u16::<BigEndian>(term.len() as u16)?;
            writer.write_all(term.as_bytes())?;
            writer.write_u16::<BigEndian>(postings.len() as u16)?;
            for &doc_id in postings {
                writer.write_u16::<BigEndian>(doc_id as u16)?;
            }
        }
        Ok(())
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<InvertedIndex> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        let total = bytes.len() as u64;
        let mut cursor = Cursor::new(bytes.as_slice());
        let mut entries = Vec::new();
        while cursor.position() < total {
            let offset = cursor.position();
            let entry = Self::read_record(&mut cursor).map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => TermdexError::corrupt_stream(format!(
                    "stream ends inside the record starting at byte {offset}"
                )),
                _ => TermdexError::corrupt_stream(format!(
                    "invalid record at byte {offset}: {e}"
                )),
            })?;
            entries.push(entry);
        }

        InvertedIndex::assemble(entries).map_err(TermdexError::corrupt_stream)
    }
}
