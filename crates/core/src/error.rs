use std::path::PathBuf;

use thiserror::Error;

/// Error type for rule compilation and file patching.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The target could not be read (missing, permission denied, not UTF-8).
    ///
    /// The underlying IO error is kept as the source so callers can still
    /// inspect `kind()`.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The patched content could not be written back.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backup copy could not be created; the target is left untouched.
    #[error("Failed to write backup {}: {source}", .path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A rule field was empty or otherwise unusable.
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// The generated pattern failed to compile.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// The file changed on disk between the read and the write.
    #[error("{} was modified while being patched; refusing to overwrite", .path.display())]
    ConcurrentModification { path: PathBuf },

    /// Raised on request when the pattern did not match.
    #[error("Pattern not found in {}", .path.display())]
    PatternNotFound { path: PathBuf },
}

impl PatchError {
    /// The IO error kind behind a read/write/backup failure, if any.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            PatchError::Read { source, .. }
            | PatchError::Write { source, .. }
            | PatchError::Backup { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Convenience result type for patch operations.
pub type PatchResult<T> = Result<T, PatchError>;
