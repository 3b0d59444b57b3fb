use super::config::Config;
use super::container::{ContainerError, ServiceContainer};
use super::provider::ServiceProvider;
use crate::file::{FILES_SERVICE, FileManager, FilesServiceProvider};
use std::any::Any;
use std::sync::Arc;

/// Host application handle
///
/// Owns the configuration and the service container. Always handled as an
/// `Arc<App>` so factories can hand services a (weak) reference back to it.
#[derive(Debug)]
pub struct App {
    config: Config,
    container: ServiceContainer,
}

impl App {
    /// Create an application with an empty container
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self {
            config,
            container: ServiceContainer::new(),
        })
    }

    /// Create an application with the built-in providers registered
    pub fn with_default_providers(config: Config) -> Arc<Self> {
        let app = Self::new(config);
        app.register(&FilesServiceProvider::new());
        app
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn container(&self) -> &ServiceContainer {
        &self.container
    }

    /// Let `provider` bind its services into this application's container
    pub fn register(&self, provider: &dyn ServiceProvider) {
        tracing::debug!(provider = provider.name(), "Registering service provider");
        provider.register(&self.container);
    }

    /// Resolve a service by name
    pub fn make<T>(self: &Arc<Self>, name: &str) -> Result<Arc<T>, ContainerError>
    where
        T: Any + Send + Sync,
    {
        self.container.resolve(self, name)
    }

    /// The file manager bound under the default `"files"` name
    pub fn files(self: &Arc<Self>) -> Result<Arc<FileManager>, ContainerError> {
        self.make(FILES_SERVICE)
    }
}
