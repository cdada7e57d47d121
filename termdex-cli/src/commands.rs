pub mod build;
pub mod query;
