use crate::file::error::{FileError, FileResult};
use rustyscript::deno_core::v8;
use rustyscript::{Module, ModuleHandle, Runtime, RuntimeOptions};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Export name used when the caller does not ask for a specific one
pub const DEFAULT_EXPORT: &str = "default";

/// Evaluates module files and extracts a single named export
///
/// Handles:
/// - ES modules (`.js`, `.mjs`, `.ts`) through a fresh rustyscript runtime
/// - JSON modules, where an export is a top-level key of the document
/// - Export values are returned as JSON data; functions and other
///   non-serializable values fail to convert
/// - Only exports declared by the module count; globals it sets or reads
///   are never returned
///
/// CommonJS files (`exports.x = ...`, `module.exports = ...`) are not
/// supported and fail with a `ModuleLoad` error.
///
/// rustyscript's `Runtime` is !Send, so every evaluation runs on its own
/// OS thread and is torn down when that thread exits. Nothing is cached
/// between calls.
#[derive(Debug, Clone)]
pub struct ModuleLoader {
    timeout: Duration,
}

impl ModuleLoader {
    /// Create a loader whose runtimes abort evaluation after `timeout`
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Load `path` and return its `export`, blocking the calling thread
    ///
    /// `Ok(None)` means the module loaded but has no such export.
    pub fn load_export(&self, path: &Path, export: &str) -> FileResult<Option<Value>> {
        let job = self.job(path, export);

        let handle = std::thread::Builder::new()
            .name("module-loader".to_string())
            .spawn(move || job.run())
            .map_err(|e| {
                FileError::module_load(path, format!("Failed to spawn loader thread: {}", e))
            })?;

        handle
            .join()
            .map_err(|_| FileError::module_load(path, "Module loader thread panicked"))?
    }

    /// Async variant of [`load_export`](Self::load_export)
    pub async fn load_export_async(&self, path: &Path, export: &str) -> FileResult<Option<Value>> {
        let job = self.job(path, export);
        let (tx, rx) = tokio::sync::oneshot::channel();

        std::thread::Builder::new()
            .name("module-loader".to_string())
            .spawn(move || {
                // Receiver gone means the caller stopped waiting
                let _ = tx.send(job.run());
            })
            .map_err(|e| {
                FileError::module_load(path, format!("Failed to spawn loader thread: {}", e))
            })?;

        rx.await.map_err(|_| {
            FileError::module_load(path, "Module loader thread exited without a result")
        })?
    }

    fn job(&self, path: &Path, export: &str) -> ExportJob {
        ExportJob {
            path: path.to_path_buf(),
            export: export.to_string(),
            timeout: self.timeout,
        }
    }
}

impl Default for ModuleLoader {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

/// One export lookup, moved onto the loader thread
struct ExportJob {
    path: PathBuf,
    export: String,
    timeout: Duration,
}

impl ExportJob {
    fn run(self) -> FileResult<Option<Value>> {
        if is_json_module(&self.path) {
            return self.run_json();
        }

        let module = Module::load(&self.path)
            .map_err(|e| FileError::module_load(&self.path, e.to_string()))?;

        let options = RuntimeOptions {
            timeout: self.timeout,
            ..Default::default()
        };
        let mut runtime = Runtime::new(options).map_err(|e| {
            FileError::module_load(&self.path, format!("Failed to create runtime: {}", e))
        })?;

        let handle = runtime
            .load_module(&module)
            .map_err(|e| FileError::module_load(&self.path, e.to_string()))?;

        // get_value falls back to globalThis, so gate it on the module's own exports
        let exported = has_export(&mut runtime, &handle, &self.export)
            .map_err(|message| FileError::module_load(&self.path, message))?;
        if !exported {
            tracing::trace!(path = ?self.path, export = %self.export, "Module has no such export");
            return Ok(None);
        }

        match runtime.get_value::<Value>(Some(&handle), &self.export) {
            Ok(value) => {
                tracing::trace!(path = ?self.path, export = %self.export, "Resolved module export");
                Ok(Some(value))
            }
            Err(rustyscript::Error::ValueNotFound(_)) => {
                tracing::trace!(path = ?self.path, export = %self.export, "Module has no such export");
                Ok(None)
            }
            Err(e) => Err(FileError::module_load(&self.path, e.to_string())),
        }
    }

    fn run_json(self) -> FileResult<Option<Value>> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| FileError::io(&self.path, e))?;
        let document: Value = serde_json::from_str(&content)
            .map_err(|e| FileError::module_load(&self.path, e.to_string()))?;

        Ok(document.get(&self.export).cloned())
    }
}

/// True when the module namespace has a defined export named `name`
fn has_export(runtime: &mut Runtime, handle: &ModuleHandle, name: &str) -> Result<bool, String> {
    let namespace = runtime
        .deno_runtime()
        .get_module_namespace(handle.id())
        .map_err(|e| e.to_string())?;

    let mut scope = runtime.deno_runtime().handle_scope();
    let namespace = namespace.open(&mut scope);
    let key = v8::String::new(&mut scope, name)
        .ok_or_else(|| format!("Invalid export name: {}", name))?;

    Ok(namespace
        .get(&mut scope, key.into())
        .is_some_and(|value| !value.is_undefined()))
}

fn is_json_module(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
