// src/store.rs

use anyhow::{Context, Result};
use glob::{glob, Pattern};
use std::{collections::HashSet, fs, io::Write, path::Path};
use tempfile::NamedTempFile;

/// Create the output directory and any missing parents.
pub fn prepare(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating output directory {:?}", dir))
}

/// Stems of the `*.csv` files directly inside `dir`.
pub fn existing_stems(dir: &Path) -> Result<HashSet<String>> {
    let pattern = format!("{}/*.csv", Pattern::escape(&dir.display().to_string()));
    let mut stems = HashSet::new();
    for entry in glob(&pattern).with_context(|| format!("bad scan pattern {}", pattern))? {
        let path = entry.with_context(|| format!("scanning {:?}", dir))?;
        if !path.is_file() {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            stems.insert(stem.to_string());
        }
    }
    Ok(stems)
}

/// Write `text` to `path` through a sibling temp file so a crash never
/// leaves a truncated CSV behind.
pub fn write_utf8(path: &Path, text: &str) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(text.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
