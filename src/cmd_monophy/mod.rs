pub mod check;
pub mod root;
pub mod tips;

use anyhow::Context;
use std::path::PathBuf;

/// Creates the output directory if needed.
pub fn outdir(dir: &str) -> anyhow::Result<PathBuf> {
    let path = PathBuf::from(dir);
    std::fs::create_dir_all(&path)
        .with_context(|| format!("could not create output directory {}", dir))?;
    Ok(path)
}
