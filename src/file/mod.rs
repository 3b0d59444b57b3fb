//! File access service
//!
//! [`FileManager`] is the facade consumers talk to; [`FilesServiceProvider`]
//! binds it into an application container as a singleton.

pub mod encoding;
pub mod error;
pub mod manager;
pub mod metadata;
pub mod options;
pub mod provider;

pub use encoding::TextEncoding;
pub use error::{FileError, FileResult};
pub use manager::FileManager;
pub use metadata::{EntryKind, FileStat};
pub use options::WriteOptions;
pub use provider::{FILES_SERVICE, FilesServiceProvider};

/// Returns a new standalone file manager, not attached to any application
pub fn files() -> FileManager {
    FileManager::new()
}
