use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors returned by [`FileManager`](crate::file::FileManager) operations
#[derive(Error, Debug)]
pub enum FileError {
    /// Path does not resolve to any entry
    #[error("No such file or directory: {0}")]
    NotFound(PathBuf),

    /// Any other platform I/O failure
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Write or remove was refused because the target is a directory
    #[error("Path is a directory: {0}")]
    IsDirectory(PathBuf),

    /// File contents are not valid for the requested encoding
    #[error("Failed to decode {path} as {encoding}: {message}")]
    Decode {
        path: PathBuf,
        encoding: String,
        message: String,
    },

    /// Encoding name not recognised
    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    /// Module file exists but could not be loaded or evaluated
    #[error("Failed to load module {path}: {message}")]
    ModuleLoad { path: PathBuf, message: String },
}

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;

impl FileError {
    /// Wrap a platform error, splitting out the not-found case
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }

    /// Create a decode error
    pub fn decode(
        path: impl AsRef<Path>,
        encoding: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Decode {
            path: path.as_ref().to_path_buf(),
            encoding: encoding.into(),
            message: message.into(),
        }
    }

    /// Create a module load error
    pub fn module_load(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::ModuleLoad {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// True for errors raised by this crate's own precondition checks
    pub fn is_guard(&self) -> bool {
        matches!(self, Self::IsDirectory(_))
    }
}
