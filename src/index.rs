//! Inverted index construction and conjunctive querying.

pub mod builder;
pub mod inverted;
pub mod query;
