//! Filesystem helpers for task bodies

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use globset::Glob;

/// Copy a file, creating the destination's parent directories as needed
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    fs::copy(src, dst).with_context(|| {
        format!("Failed to copy {} to {}", src.display(), dst.display())
    })?;
    Ok(())
}

/// Remove a directory tree. A missing directory is not an error.
pub fn remove_dir(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}

/// Remove the files directly under `dir` whose names match the glob pattern.
/// Returns how many files were removed.
pub fn remove_glob(dir: &Path, pattern: &str) -> Result<usize> {
    let matcher = Glob::new(pattern)
        .with_context(|| format!("Invalid glob pattern '{}'", pattern))?
        .compile_matcher();

    let mut removed = 0;
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?
    {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if matcher.is_match(Path::new(&entry.file_name())) {
            fs::remove_file(entry.path())
                .with_context(|| format!("Failed to remove {}", entry.path().display()))?;
            removed += 1;
        }
    }

    Ok(removed)
}
