//! Replaces a destination directory with a fresh copy of a source directory.
//!
//! The replacement is two plain steps: remove whatever directory sits at the
//! destination, then copy the source tree into its place. Nothing is merged
//! and nothing is rolled back. A failure during the copy (including a missing
//! source) leaves the destination removed.

mod copy;
mod error;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub use copy::copy_tree;
pub use error::ReplaceError;

/// Kind of an entry written to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File { bytes: u64 },
}

/// One entry written to the destination, relative to the destination root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedEntry {
    pub relative: PathBuf,
    pub kind: EntryKind,
}

/// What a successful replacement did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceSummary {
    /// Whether a previous destination tree was deleted.
    pub removed_previous: bool,
    /// Subdirectories created below the destination root.
    pub directories: usize,
    pub files: usize,
    pub bytes: u64,
}

pub struct DirectoryReplacer<'a> {
    observer: Option<Box<dyn FnMut(&CopiedEntry) + 'a>>,
}

impl Default for DirectoryReplacer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> DirectoryReplacer<'a> {
    pub fn new() -> Self {
        Self { observer: None }
    }

    /// Calls `observer` for every directory and file written to the destination.
    pub fn with_observer(mut self, observer: impl FnMut(&CopiedEntry) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Deletes `destination` if it is a directory, then copies `source` to it.
    pub fn replace(
        &mut self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> Result<ReplaceSummary, ReplaceError> {
        let (source, destination) = (source.as_ref(), destination.as_ref());

        let removed_previous = remove_destination(destination)?;

        let mut ignore = |_: &CopiedEntry| {};
        let observer: &mut dyn FnMut(&CopiedEntry) = match self.observer.as_mut() {
            Some(observer) => observer.as_mut(),
            None => &mut ignore,
        };

        let summary = copy_tree(source, destination, observer)?;
        Ok(ReplaceSummary {
            removed_previous,
            ..summary
        })
    }
}

/// Replaces `destination` with a copy of `source`. See [`DirectoryReplacer::replace`].
pub fn replace(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
) -> Result<ReplaceSummary, ReplaceError> {
    DirectoryReplacer::new().replace(source, destination)
}

/// Recursively deletes `destination` without following symlinks.
///
/// Returns `false` when there was nothing to delete. A path that exists but
/// is not a directory is left alone; the copy step reports it as a conflict.
pub fn remove_destination(destination: &Path) -> Result<bool, ReplaceError> {
    let meta = match fs::symlink_metadata(destination) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(ReplaceError::remove(destination, e)),
    };

    if !meta.is_dir() {
        return Ok(false);
    }

    match fs::remove_dir_all(destination) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ReplaceError::remove(destination, e)),
    }
}

#[cfg(test)]
#[path = "test_replace.rs"]
mod tests;
