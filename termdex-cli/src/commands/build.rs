use anyhow::{Context, Result};
use termdex::{Corpus, IndexBuilder};

use crate::cli::BuildCommand;

/// Execute a build command.
pub fn run(cmd: BuildCommand) -> Result<()> {
    let format = cmd.format;

    let corpus = Corpus::open(&cmd.dataset)
        .with_context(|| format!("Failed to load dataset {}", cmd.dataset.display()))?;
    let index = IndexBuilder::new().build_corpus(&corpus);

    index
        .save_to_path(&cmd.output, format)
        .with_context(|| format!("Failed to store index at {}", cmd.output.display()))?;

    Ok(())
}
