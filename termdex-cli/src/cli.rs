use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use termdex::IndexFormat;

/// termdex - inverted index CLI
#[derive(Parser)]
#[command(name = "termdex", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build an inverted index from a dataset and save it to disk.
    Build(BuildCommand),
    /// Run queries against a saved inverted index.
    Query(QueryCommand),
}

// --- Build ---

#[derive(Args)]
pub struct BuildCommand {
    /// Path to the tab-separated dataset to index.
    #[arg(short = 'd', long = "dataset")]
    pub dataset: PathBuf,

    /// Path to store the inverted index.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Format to store the inverted index in: text (json) or binary (struct).
    #[arg(
        short = 's',
        long = "format",
        alias = "strategy",
        env = "TERMDEX_FORMAT",
        default_value_t = IndexFormat::Binary
    )]
    pub format: IndexFormat,
}

// --- Query ---

#[derive(Args)]
pub struct QueryCommand {
    /// Path to read the inverted index from.
    #[arg(short = 'i', long = "index")]
    pub index: PathBuf,

    /// Format the inverted index was stored in: text (json) or binary (struct).
    #[arg(
        short = 's',
        long = "format",
        alias = "strategy",
        env = "TERMDEX_FORMAT",
        default_value_t = IndexFormat::Binary
    )]
    pub format: IndexFormat,

    #[command(flatten)]
    pub source: QuerySourceArgs,
}

/// Where queries come from. Without any of these, UTF-8 queries are read from stdin.
#[derive(Args)]
#[group(multiple = false)]
pub struct QuerySourceArgs {
    /// Query to run; repeat the flag to run several queries.
    #[arg(long = "query", value_name = "WORD", num_args = 1.., action = ArgAction::Append)]
    pub query: Vec<Vec<String>>,

    /// Query given as a JSON array of terms; repeatable.
    #[arg(long = "query-json", value_name = "JSON", action = ArgAction::Append)]
    pub query_json: Vec<String>,

    /// UTF-8 file with one whitespace-separated query per line ("-" for stdin).
    #[arg(long = "query-file-utf8", value_name = "PATH")]
    pub query_file_utf8: Option<PathBuf>,

    /// Windows-1251 file with one whitespace-separated query per line ("-" for stdin).
    #[arg(long = "query-file-cp1251", value_name = "PATH")]
    pub query_file_cp1251: Option<PathBuf>,
}
