//! Destination file guard.
//!
//! Exports are written to a staging file next to the destination and renamed
//! over it on commit. A save that fails at any step leaves the destination
//! exactly as it was, whether it existed before or not.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::util::Result;

const STAGING_PREFIX: &str = ".partial-";

/// Staging sibling of `path`. Keeps the file name last so extension-sensitive
/// sinks still see the destination's extension.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(STAGING_PREFIX);
    if let Some(file_name) = path.file_name() {
        name.push(file_name);
    }
    path.with_file_name(name)
}

/// Owns the staging file of one save. Dropping it without
/// [`PendingOutput::commit`] removes the staging file only.
pub(crate) struct PendingOutput {
    path: PathBuf,
    staging: PathBuf,
    committed: bool,
}

impl PendingOutput {
    /// Guard for a staging file some other writer creates (see [`Self::staging`]).
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            staging: staging_path(path),
            committed: false,
        }
    }

    /// Create (truncate) the staging file for `path`.
    pub fn create(path: &Path) -> Result<(Self, File)> {
        let staging = staging_path(path);
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&staging)?;
        Ok((
            Self {
                path: path.to_path_buf(),
                staging,
                committed: false,
            },
            file,
        ))
    }

    /// Final destination.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the export is written before commit.
    pub fn staging(&self) -> &Path {
        &self.staging
    }

    /// Move the staging file over the destination. All handles to the
    /// staging file must be closed first.
    pub fn commit(mut self) -> Result<()> {
        std::fs::rename(&self.staging, &self.path)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PendingOutput {
    fn drop(&mut self) {
        if !self.committed && self.staging.exists() {
            if let Err(e) = std::fs::remove_file(&self.staging) {
                tracing::warn!("failed to remove partial output {}: {}", self.staging.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_staging_keeps_extension() {
        let staging = staging_path(Path::new("/tmp/out/capture.opt"));
        assert_eq!(staging, Path::new("/tmp/out/.partial-capture.opt"));
        assert_eq!(staging.extension().unwrap(), "opt");
    }

    #[test]
    fn test_uncommitted_output_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        {
            let (guard, mut file) = PendingOutput::create(&path).unwrap();
            file.write_all(b"partial").unwrap();
            assert!(guard.staging().exists());
        }
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_uncommitted_output_keeps_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, b"previous").unwrap();
        {
            let (_guard, mut file) = PendingOutput::create(&path).unwrap();
            file.write_all(b"partial").unwrap();
        }
        assert_eq!(std::fs::read(&path).unwrap(), b"previous");
    }

    #[test]
    fn test_committed_output_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, b"previous").unwrap();
        let (guard, mut file) = PendingOutput::create(&path).unwrap();
        file.write_all(b"done").unwrap();
        drop(file);
        guard.commit().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"done");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_commit_keeps_destination() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory cannot be replaced by a file.
        let path = dir.path().join("out.csv");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep.txt"), b"keep").unwrap();

        let (guard, file) = PendingOutput::create(&path).unwrap();
        drop(file);
        assert!(guard.commit().is_err());

        assert_eq!(std::fs::read(path.join("keep.txt")).unwrap(), b"keep");
        assert!(!staging_path(&path).exists());
    }
}
