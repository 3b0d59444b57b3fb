use super::manager::FileManager;
use crate::app::container::ServiceContainer;
use crate::app::provider::ServiceProvider;

/// Name the file manager is bound under by default
pub const FILES_SERVICE: &str = "files";

/// Binds a singleton [`FileManager`] into the application container
///
/// The manager is built on first resolution from the resolving application,
/// so it picks up that application's `[files]` configuration and keeps a weak
/// reference back to it.
#[derive(Debug, Clone)]
pub struct FilesServiceProvider {
    name: String,
}

impl FilesServiceProvider {
    pub fn new() -> Self {
        Self {
            name: FILES_SERVICE.to_string(),
        }
    }

    /// Bind under a custom name instead of `"files"`
    pub fn with_name(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for FilesServiceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceProvider for FilesServiceProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn register(&self, container: &ServiceContainer) {
        container.singleton(self.name.clone(), FileManager::with_app);
    }
}
