use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use termdex::{InvertedIndex, Query};

use crate::cli::{QueryCommand, QuerySourceArgs};
use crate::encoding::TextEncoding;
use crate::output;

/// Execute a query command.
pub fn run(cmd: QueryCommand) -> Result<()> {
    let format = cmd.format;
    let index = InvertedIndex::load_from_path(&cmd.index, format)
        .with_context(|| format!("Failed to load index from {}", cmd.index.display()))?;

    let queries = collect_queries(&cmd.source)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_queries(&index, &queries, &mut out)?;
    out.flush()?;

    Ok(())
}

/// Evaluate each query and print one result line per query.
pub fn run_queries<W: Write>(index: &InvertedIndex, queries: &[Query], out: &mut W) -> Result<()> {
    for query in queries {
        info!("Get documents ids for query {query}...");
        output::write_ids(out, index.search(query))?;
    }
    Ok(())
}

/// Gather queries from the selected source.
fn collect_queries(source: &QuerySourceArgs) -> Result<Vec<Query>> {
    if !source.query.is_empty() {
        return Ok(source.query.iter().map(Query::new).collect());
    }

    if !source.query_json.is_empty() {
        return source
            .query_json
            .iter()
            .map(|raw| -> Result<Query> {
                let value: serde_json::Value = serde_json::from_str(raw)
                    .with_context(|| format!("Failed to parse query JSON '{raw}'"))?;
                Ok(Query::from_json(&value)?)
            })
            .collect();
    }

    let (path, encoding) = match (&source.query_file_utf8, &source.query_file_cp1251) {
        (Some(path), _) => (path.as_path(), TextEncoding::Utf8),
        (None, Some(path)) => (path.as_path(), TextEncoding::Cp1251),
        (None, None) => (Path::new("-"), TextEncoding::Utf8),
    };
    let contents = encoding.decode(&read_input(path)?)?;
    Ok(parse_query_lines(&contents))
}

/// One query per line; blank lines are empty queries.
fn parse_query_lines(contents: &str) -> Vec<Query> {
    contents.lines().map(Query::parse).collect()
}

/// Read a whole file, or stdin for `-`.
fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buffer)
            .context("Failed to read queries from stdin")?;
        Ok(buffer)
    } else {
        fs::read(path).with_context(|| format!("Failed to read query file {}", path.display()))
    }
}
