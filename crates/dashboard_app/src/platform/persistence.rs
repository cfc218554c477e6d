use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum PersistError {
    #[error("directory {path:?} missing or not writable: {source}")]
    Dir { path: PathBuf, source: io::Error },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Replaces whole files by writing a sibling temp file and renaming it
/// over the target, so readers never observe a half-written file.
pub(crate) struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    /// Writer for the directory holding `target`.
    pub(crate) fn beside(target: &Path) -> Self {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self { dir }
    }

    pub(crate) fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        fs::create_dir_all(&self.dir).map_err(|source| PersistError::Dir {
            path: self.dir.clone(),
            source,
        })?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|source| PersistError::Dir {
            path: self.dir.clone(),
            source,
        })?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|err| PersistError::Io(err.error))?;
        Ok(target)
    }
}
