use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of a directory replacement. None of them are recovered from.
#[derive(Debug, Error)]
pub enum ReplaceError {
    #[error("source directory '{}' does not exist", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("source '{}' is not a directory", .path.display())]
    SourceNotDirectory { path: PathBuf },

    #[error("destination '{}' already exists and is not a directory", .path.display())]
    DestinationConflict { path: PathBuf },

    #[error("'{}' is a socket, fifo or device and cannot be copied", .path.display())]
    SpecialFile { path: PathBuf },

    #[error("failed to remove '{}'", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to copy '{}'", .path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk source tree")]
    Walk(#[from] walkdir::Error),
}

impl ReplaceError {
    pub(crate) fn remove(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Remove {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn copy(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Copy {
            path: path.into(),
            source,
        }
    }

    /// The closest `io::ErrorKind` for this failure, so callers can treat
    /// it like a plain filesystem error.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::SourceNotFound { .. } => io::ErrorKind::NotFound,
            Self::SourceNotDirectory { .. } => io::ErrorKind::NotADirectory,
            Self::DestinationConflict { .. } => io::ErrorKind::AlreadyExists,
            Self::SpecialFile { .. } => io::ErrorKind::Unsupported,
            Self::Remove { source, .. } | Self::Copy { source, .. } => source.kind(),
            Self::Walk(err) => err
                .io_error()
                .map(io::Error::kind)
                .unwrap_or(io::ErrorKind::Other),
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        self.kind() == io::ErrorKind::PermissionDenied
    }
}
