use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use migrator_logging::migrator_debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} is not a valid file")]
    NotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Read every line of `path` (newline-stripped, blank lines included), in
/// file order.
pub fn read_lines(path: &Path) -> Result<Vec<String>, StoreError> {
    if !path.is_file() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path)?;
    Ok(contents.lines().map(ToOwned::to_owned).collect())
}

/// Overwrite `path` with `lines` joined by newlines (no trailing newline),
/// writing a temp file first and renaming so readers never see a partial file.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(lines.join("\n").as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    // Replace existing file if present to keep determinism.
    if path.exists() {
        fs::remove_file(path)?;
    }
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

/// Checkpoint location for `path`: the same file name with `.tmp` appended.
pub fn checkpoint_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// The set-mode input as loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumableList {
    pub lines: Vec<String>,
    /// True when the lines came from an in-progress checkpoint.
    pub resumed: bool,
}

/// Load the set-mode input, preferring an in-progress checkpoint over the
/// original file when one exists.
pub fn load_resumable(path: &Path) -> Result<ResumableList, StoreError> {
    let checkpoint = checkpoint_path(path);
    if checkpoint.exists() {
        migrator_debug!("found checkpoint {}", checkpoint.display());
        Ok(ResumableList {
            lines: read_lines(&checkpoint)?,
            resumed: true,
        })
    } else {
        migrator_debug!("opening {}", path.display());
        Ok(ResumableList {
            lines: read_lines(path)?,
            resumed: false,
        })
    }
}

/// Snapshot the remaining links next to the input file. Best effort: only
/// called when a set run is interrupted with save-progress enabled.
pub fn write_checkpoint(path: &Path, remaining: &[String]) -> Result<(), StoreError> {
    write_lines(&checkpoint_path(path), remaining)
}

/// Remove a checkpoint left by an earlier interrupted run, if any.
pub fn clear_checkpoint(path: &Path) -> Result<(), StoreError> {
    let checkpoint = checkpoint_path(path);
    if checkpoint.exists() {
        fs::remove_file(&checkpoint)?;
    }
    Ok(())
}
