//! # termdex
//!
//! A small single-node inverted-index engine.
//!
//! ## Features
//!
//! - Corpus loading from tab-separated `id\ttext` files
//! - Unicode-aware tokenization into lowercase terms
//! - Conjunctive (AND) term queries
//! - Persistence as JSON text or as compact big-endian binary records
//!
//! ```
//! use termdex::{IndexBuilder, IndexFormat, InvertedIndex};
//!
//! let index = IndexBuilder::new().build(vec![
//!     (1, "first document info"),
//!     (2, "second doc information"),
//!     (3, "third document information"),
//! ]);
//! let hits = index.query(&["document", "information"]);
//! assert!(hits.contains(&3) && hits.len() == 1);
//!
//! let mut bytes = Vec::new();
//! index.save(&mut bytes, IndexFormat::Binary).unwrap();
//! assert_eq!(InvertedIndex::load(bytes.as_slice(), IndexFormat::Binary).unwrap(), index);
//! ```

pub mod analysis;
pub mod codec;
pub mod corpus;
mod error;
pub mod index;

// Re-exports for the public API
pub use analysis::tokenizer::{RegexTokenizer, Tokenizer};
pub use codec::{IndexCodec, IndexFormat};
pub use corpus::{Corpus, DocumentId};
pub use error::{Result, TermdexError};
pub use index::builder::{IndexBuilder, build};
pub use index::inverted::{InvertedIndex, PostingList};
pub use index::query::Query;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
