/// Module loading extension point
///
/// Backs `FileManager::read_module_export`: a module file is evaluated in an
/// isolated JavaScript runtime (rustyscript/V8) and one named export is
/// handed back as JSON data. This is not a general scripting host: modules
/// cannot register callbacks or keep state between calls.
///
/// # Usage
///
/// ```rust,ignore
/// use files_service::script::{ModuleLoader, DEFAULT_EXPORT};
/// use std::time::Duration;
///
/// let loader = ModuleLoader::new(Duration::from_secs(5));
/// let value = loader.load_export(Path::new("plugins/theme.js"), DEFAULT_EXPORT)?;
/// ```

pub mod loader;

pub use loader::{DEFAULT_EXPORT, ModuleLoader};
