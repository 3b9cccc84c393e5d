//! Input reads and the atomic `--output` write

use crate::{Error, NormalizedPath, Result};
use fs2::FileExt;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Replace `path` with `content` in one step.
///
/// The bytes go to a locked temp file next to the target, which is renamed
/// over it once synced. The temp file is deleted on every failure path, so
/// an aborted `--output` write leaves the previous file and nothing else.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let target = path.to_native();
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;

    let prefix = format!(".{}.", path.file_name().unwrap_or("output"));
    let mut staged = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(|e| Error::io(&dir, e))?;

    staged
        .as_file()
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: target.clone(),
        })?;
    staged
        .write_all(content)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| Error::io(staged.path(), e))?;

    // Dropping the returned handle releases the lock.
    staged
        .persist(&target)
        .map_err(|e| Error::io(&target, e.error))?;

    tracing::debug!(path = %path, bytes = content.len(), "Replaced output file");
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    tracing::trace!(path = %path, "Reading file");
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
