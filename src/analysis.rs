//! Text analysis: turning document text into terms.

pub mod tokenizer;
