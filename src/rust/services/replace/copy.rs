use std::fs::{self, File, FileTimes, Metadata};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::error::ReplaceError;
use super::{CopiedEntry, EntryKind, ReplaceSummary};

/// Copies the tree under `source` into a freshly created `destination`.
///
/// Symlinks inside `source` are followed and their targets copied as plain
/// content. File permissions and timestamps are carried over; directory
/// permissions and timestamps are applied once the whole tree has been
/// written so that read-only directories do not block their own contents.
/// Sockets, fifos and device nodes cannot be copied and fail the run.
pub fn copy_tree(
    source: &Path,
    destination: &Path,
    observer: &mut dyn FnMut(&CopiedEntry),
) -> Result<ReplaceSummary, ReplaceError> {
    let root_meta = match fs::metadata(source) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ReplaceError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }
        Err(e) => return Err(ReplaceError::copy(source, e)),
    };
    if !root_meta.is_dir() {
        return Err(ReplaceError::SourceNotDirectory {
            path: source.to_path_buf(),
        });
    }

    create_root(destination)?;

    let mut summary = ReplaceSummary::default();
    let mut dir_stats: Vec<(PathBuf, Metadata)> = vec![(destination.to_path_buf(), root_meta)];

    let walker = WalkDir::new(source)
        .follow_links(true)
        .min_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        let relative = entry.path().strip_prefix(source).map_err(|_| {
            ReplaceError::copy(
                entry.path(),
                io::Error::new(ErrorKind::InvalidInput, "entry outside of source tree"),
            )
        })?;
        let target = destination.join(relative);
        let meta = entry.metadata()?;

        if meta.is_dir() {
            fs::create_dir(&target).map_err(|e| ReplaceError::copy(&target, e))?;
            dir_stats.push((target, meta));
            summary.directories += 1;
            observer(&CopiedEntry {
                relative: relative.to_path_buf(),
                kind: EntryKind::Directory,
            });
        } else if meta.is_file() {
            let bytes = copy_file(entry.path(), &target, &meta)?;
            summary.files += 1;
            summary.bytes += bytes;
            observer(&CopiedEntry {
                relative: relative.to_path_buf(),
                kind: EntryKind::File { bytes },
            });
        } else {
            return Err(ReplaceError::SpecialFile {
                path: entry.path().to_path_buf(),
            });
        }
    }

    // deepest first
    for (dir, meta) in dir_stats.into_iter().rev() {
        fs::set_permissions(&dir, meta.permissions()).map_err(|e| ReplaceError::copy(&dir, e))?;
        set_dir_times(&dir, &meta).map_err(|e| ReplaceError::copy(&dir, e))?;
    }

    Ok(summary)
}

fn create_root(destination: &Path) -> Result<(), ReplaceError> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ReplaceError::copy(parent, e))?;
        }
    }

    match fs::create_dir(destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(ReplaceError::DestinationConflict {
            path: destination.to_path_buf(),
        }),
        Err(e) => Err(ReplaceError::copy(destination, e)),
    }
}

fn copy_file(from: &Path, to: &Path, meta: &Metadata) -> Result<u64, ReplaceError> {
    let mut reader = File::open(from).map_err(|e| ReplaceError::copy(from, e))?;
    let mut writer = File::create(to).map_err(|e| ReplaceError::copy(to, e))?;
    let bytes = io::copy(&mut reader, &mut writer).map_err(|e| ReplaceError::copy(to, e))?;

    // Times go through the open handle: the copied permissions may make the
    // file read-only.
    writer
        .set_times(file_times(meta))
        .map_err(|e| ReplaceError::copy(to, e))?;
    drop(writer);

    fs::set_permissions(to, meta.permissions()).map_err(|e| ReplaceError::copy(to, e))?;
    Ok(bytes)
}

#[cfg(unix)]
fn set_dir_times(dir: &Path, meta: &Metadata) -> io::Result<()> {
    File::open(dir)?.set_times(file_times(meta))
}

// Directories cannot be opened as plain files here.
#[cfg(not(unix))]
fn set_dir_times(_dir: &Path, _meta: &Metadata) -> io::Result<()> {
    Ok(())
}

fn file_times(meta: &Metadata) -> FileTimes {
    let mut times = FileTimes::new();
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = meta.modified() {
        times = times.set_modified(modified);
    }
    times
}
