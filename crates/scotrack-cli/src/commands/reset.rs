//! The `scotrack reset` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub fn execute(store: PathBuf) -> Result<()> {
    // Write an empty store rather than deleting the file, so a reset
    // works even on a corrupt store.
    std::fs::write(&store, "{}\n")
        .with_context(|| format!("failed to reset store {}", store.display()))?;
    println!("Reset {}", store.display());
    Ok(())
}
