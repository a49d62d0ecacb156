//! Saving archives to disk.
//!
//! Writes go to a `.part` temp file next to the destination, are synced,
//! then atomically renamed to the final name.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Persists archive bytes under a file name chosen by the caller.
#[async_trait]
pub trait FileSaver: Send + Sync {
    /// Returns the path the bytes were written to.
    async fn save(&self, bytes: Vec<u8>, file_name: &str) -> Result<PathBuf>;
}

/// Saves into a fixed directory, replacing any existing file of the same name.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl FileSaver for DirectorySaver {
    async fn save(&self, bytes: Vec<u8>, file_name: &str) -> Result<PathBuf> {
        let final_path = destination(&self.dir, file_name)?;
        tokio::task::spawn_blocking(move || {
            write_atomically(&final_path, &bytes)?;
            Ok(final_path)
        })
        .await
        .context("save task failed")?
    }
}

/// Resolves `file_name` inside `dir`, rejecting anything that is not a plain name.
pub fn destination(dir: &Path, file_name: &str) -> Result<PathBuf> {
    if file_name.is_empty()
        || file_name == "."
        || file_name == ".."
        || file_name.contains(['/', '\\', '\0'])
    {
        bail!("invalid file name: {:?}", file_name);
    }
    Ok(dir.join(file_name))
}

/// Writes `bytes` to `final_path` through a synced temp file and a rename.
///
/// Each call gets its own temp file (`.<name>.XXXXXX.part` in the same
/// directory), so concurrent saves under one name never share it; the last
/// rename wins.
pub fn write_atomically(final_path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match final_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let prefix = format!(
        ".{}.",
        final_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default()
    );
    let mut tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;

    tmp.write_all(bytes)
        .and_then(|_| tmp.as_file().sync_all())
        .with_context(|| format!("failed to write {}", tmp.path().display()))?;

    tmp.persist(final_path).with_context(|| {
        format!("failed to rename temp file to {}", final_path.display())
    })?;
    tracing::debug!(path = %final_path.display(), bytes = bytes.len(), "saved archive");
    Ok(())
}
