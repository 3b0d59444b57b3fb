use crate::app::state::App;
use crate::file::encoding::TextEncoding;
use crate::file::error::{FileError, FileResult};
use crate::file::metadata::FileStat;
use crate::file::options::WriteOptions;
use crate::script::{DEFAULT_EXPORT, ModuleLoader};
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// File access facade registered in the application container
///
/// Every operation comes in two flavours: an async one built on `tokio::fs`
/// and a `*_blocking` one that runs `std::fs` on the calling thread.
///
/// Paths are passed to the platform untouched. Stat lookups use `lstat`
/// semantics, so a symlink is neither a file nor a directory for
/// `file_exists` / `directory_exists`.
///
/// The manager holds no per-call state and is shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct FileManager {
    app: Option<Weak<App>>,
    modules: ModuleLoader,
}

impl FileManager {
    /// Create a manager that is not attached to any application
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager owned by `app`, configured from its `[files]` section
    pub fn with_app(app: &Arc<App>) -> Self {
        let timeout = Duration::from_secs(app.config().files.module_timeout_secs);
        Self {
            app: Some(Arc::downgrade(app)),
            modules: ModuleLoader::new(timeout),
        }
    }

    pub fn with_module_loader(mut self, modules: ModuleLoader) -> Self {
        self.modules = modules;
        self
    }

    /// Host application, if attached and still alive
    pub fn app(&self) -> Option<Arc<App>> {
        self.app.as_ref().and_then(Weak::upgrade)
    }

    pub fn module_loader(&self) -> &ModuleLoader {
        &self.modules
    }

    // --- Stat ---

    /// Returns the stats of the entry at `path` without following symlinks
    pub async fn stat(&self, path: impl AsRef<Path>) -> FileResult<FileStat> {
        let path = path.as_ref();
        tokio::fs::symlink_metadata(path)
            .await
            .map(FileStat::from)
            .map_err(|e| FileError::io(path, e))
    }

    pub fn stat_blocking(&self, path: impl AsRef<Path>) -> FileResult<FileStat> {
        let path = path.as_ref();
        std::fs::symlink_metadata(path)
            .map(FileStat::from)
            .map_err(|e| FileError::io(path, e))
    }

    // --- Existence checks ---
    //
    // Any stat failure (missing entry, permission denied, broken mount...)
    // reads as `false`. The error detail is dropped on purpose.

    /// Checks if a regular file exists at `path`
    pub async fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        match self.stat(path).await {
            Ok(stat) => stat.is_file(),
            Err(e) => {
                tracing::trace!("file_exists: {}", e);
                false
            }
        }
    }

    pub fn file_exists_blocking(&self, path: impl AsRef<Path>) -> bool {
        match self.stat_blocking(path) {
            Ok(stat) => stat.is_file(),
            Err(e) => {
                tracing::trace!("file_exists: {}", e);
                false
            }
        }
    }

    /// Checks if a directory exists at `path`
    pub async fn directory_exists(&self, path: impl AsRef<Path>) -> bool {
        match self.stat(path).await {
            Ok(stat) => stat.is_dir(),
            Err(e) => {
                tracing::trace!("directory_exists: {}", e);
                false
            }
        }
    }

    pub fn directory_exists_blocking(&self, path: impl AsRef<Path>) -> bool {
        match self.stat_blocking(path) {
            Ok(stat) => stat.is_dir(),
            Err(e) => {
                tracing::trace!("directory_exists: {}", e);
                false
            }
        }
    }

    // --- Reads ---

    /// Read the raw contents of a file
    pub async fn read_raw(&self, path: impl AsRef<Path>) -> FileResult<Vec<u8>> {
        let path = path.as_ref();
        tokio::fs::read(path).await.map_err(|e| FileError::io(path, e))
    }

    pub fn read_raw_blocking(&self, path: impl AsRef<Path>) -> FileResult<Vec<u8>> {
        let path = path.as_ref();
        std::fs::read(path).map_err(|e| FileError::io(path, e))
    }

    /// Read a file as UTF-8 text
    pub async fn read_text(&self, path: impl AsRef<Path>) -> FileResult<String> {
        self.read_text_with(path, TextEncoding::Utf8).await
    }

    pub fn read_text_blocking(&self, path: impl AsRef<Path>) -> FileResult<String> {
        self.read_text_with_blocking(path, TextEncoding::Utf8)
    }

    /// Read a file and decode it with `encoding`
    pub async fn read_text_with(
        &self,
        path: impl AsRef<Path>,
        encoding: TextEncoding,
    ) -> FileResult<String> {
        let path = path.as_ref();
        let bytes = self.read_raw(path).await?;
        encoding
            .decode(bytes)
            .map_err(|message| FileError::decode(path, encoding.as_str(), message))
    }

    pub fn read_text_with_blocking(
        &self,
        path: impl AsRef<Path>,
        encoding: TextEncoding,
    ) -> FileResult<String> {
        let path = path.as_ref();
        let bytes = self.read_raw_blocking(path)?;
        encoding
            .decode(bytes)
            .map_err(|message| FileError::decode(path, encoding.as_str(), message))
    }

    // --- Modules ---

    /// Read the default export of a module file
    pub async fn read_module(&self, path: impl AsRef<Path>) -> FileResult<Option<Value>> {
        self.read_module_export(path, DEFAULT_EXPORT).await
    }

    pub fn read_module_blocking(&self, path: impl AsRef<Path>) -> FileResult<Option<Value>> {
        self.read_module_export_blocking(path, DEFAULT_EXPORT)
    }

    /// Load a module file and return the export named `export`
    ///
    /// Returns `Ok(None)` when no regular file exists at `path` or the
    /// module has no such export. A file that exists but fails to load is
    /// a [`FileError::ModuleLoad`].
    pub async fn read_module_export(
        &self,
        path: impl AsRef<Path>,
        export: &str,
    ) -> FileResult<Option<Value>> {
        let path = path.as_ref();
        if !self.file_exists(path).await {
            tracing::debug!(path = ?path, "Module file not found, no export");
            return Ok(None);
        }
        self.modules.load_export_async(path, export).await
    }

    pub fn read_module_export_blocking(
        &self,
        path: impl AsRef<Path>,
        export: &str,
    ) -> FileResult<Option<Value>> {
        let path = path.as_ref();
        if !self.file_exists_blocking(path) {
            tracing::debug!(path = ?path, "Module file not found, no export");
            return Ok(None);
        }
        self.modules.load_export(path, export)
    }

    // --- Writes ---

    /// Write `data` to `path`
    ///
    /// Refuses with [`FileError::IsDirectory`] before touching the
    /// filesystem when `path` is a directory.
    pub async fn write_file(
        &self,
        path: impl AsRef<Path>,
        data: impl AsRef<[u8]>,
        options: &WriteOptions,
    ) -> FileResult<()> {
        let path = path.as_ref();
        if self.directory_exists(path).await {
            return Err(FileError::IsDirectory(path.to_path_buf()));
        }

        let data = data.as_ref();
        let mut file = options
            .to_tokio()
            .open(path)
            .await
            .map_err(|e| FileError::io(path, e))?;
        file.write_all(data).await.map_err(|e| FileError::io(path, e))?;
        file.flush().await.map_err(|e| FileError::io(path, e))?;

        tracing::debug!(path = ?path, bytes = data.len(), "Wrote file");
        Ok(())
    }

    pub fn write_file_blocking(
        &self,
        path: impl AsRef<Path>,
        data: impl AsRef<[u8]>,
        options: &WriteOptions,
    ) -> FileResult<()> {
        let path = path.as_ref();
        if self.directory_exists_blocking(path) {
            return Err(FileError::IsDirectory(path.to_path_buf()));
        }

        let data = data.as_ref();
        let mut file = options.to_std().open(path).map_err(|e| FileError::io(path, e))?;
        file.write_all(data).map_err(|e| FileError::io(path, e))?;

        tracing::debug!(path = ?path, bytes = data.len(), "Wrote file");
        Ok(())
    }

    // --- Removal ---

    /// Delete the file at `path`
    ///
    /// Directories are refused with [`FileError::IsDirectory`]; removing a
    /// path that is already gone fails with [`FileError::NotFound`].
    pub async fn remove(&self, path: impl AsRef<Path>) -> FileResult<()> {
        let path = path.as_ref();
        if self.directory_exists(path).await {
            return Err(FileError::IsDirectory(path.to_path_buf()));
        }

        tokio::fs::remove_file(path)
            .await
            .map_err(|e| FileError::io(path, e))?;

        tracing::debug!(path = ?path, "Removed file");
        Ok(())
    }

    pub fn remove_blocking(&self, path: impl AsRef<Path>) -> FileResult<()> {
        let path = path.as_ref();
        if self.directory_exists_blocking(path) {
            return Err(FileError::IsDirectory(path.to_path_buf()));
        }

        std::fs::remove_file(path).map_err(|e| FileError::io(path, e))?;

        tracing::debug!(path = ?path, "Removed file");
        Ok(())
    }
}
