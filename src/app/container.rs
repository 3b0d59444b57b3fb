use super::state::App;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use thiserror::Error;

/// Type-erased service instance as stored by the container
pub type Instance = Arc<dyn Any + Send + Sync>;

type Factory = Box<dyn Fn(&Arc<App>) -> Instance + Send + Sync>;

/// Errors raised when resolving services
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContainerError {
    /// Nothing registered under this name
    #[error("No service bound as '{0}'")]
    NotBound(String),

    /// Registered instance is not of the requested type
    #[error("Service '{name}' is not a {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    /// Factory asked for the service it is currently building
    #[error("Service '{0}' depends on itself")]
    Cycle(String),
}

/// Singleton binding: factory plus the lazily built instance
struct Binding {
    factory: Factory,
    instance: OnceLock<Instance>,
}

thread_local! {
    // Bindings whose factory is running on this thread
    static BUILDING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks a binding as under construction until dropped
struct BuildGuard(usize);

impl BuildGuard {
    fn enter(key: usize) -> Self {
        BUILDING.with(|building| building.borrow_mut().push(key));
        Self(key)
    }

    fn is_building(key: usize) -> bool {
        BUILDING.with(|building| building.borrow().contains(&key))
    }
}

impl Drop for BuildGuard {
    fn drop(&mut self) {
        BUILDING.with(|building| {
            let mut building = building.borrow_mut();
            if let Some(pos) = building.iter().rposition(|&k| k == self.0) {
                building.remove(pos);
            }
        });
    }
}

/// Name-keyed service container
///
/// Every binding is a singleton: the factory runs on first resolution and the
/// same `Arc` is handed to every later caller. Concurrent first resolutions
/// still build exactly one instance.
#[derive(Default)]
pub struct ServiceContainer {
    bindings: RwLock<HashMap<String, Arc<Binding>>>,
}

impl ServiceContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `factory` as a singleton under `name`, replacing any earlier binding
    pub fn singleton<T, F>(&self, name: impl Into<String>, factory: F)
    where
        T: Any + Send + Sync,
        F: Fn(&Arc<App>) -> T + Send + Sync + 'static,
    {
        let name = name.into();
        let binding = Binding {
            factory: Box::new(move |app: &Arc<App>| Arc::new(factory(app)) as Instance),
            instance: OnceLock::new(),
        };

        let mut bindings = self.bindings.write().unwrap_or_else(PoisonError::into_inner);
        if bindings.insert(name.clone(), Arc::new(binding)).is_some() {
            tracing::debug!(service = %name, "Replaced existing binding");
        } else {
            tracing::debug!(service = %name, "Bound singleton");
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Names of all bound services, sorted
    pub fn names(&self) -> Vec<String> {
        let bindings = self.bindings.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = bindings.keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolve the service bound under `name`, building it on first use
    ///
    /// A factory that resolves its own name on the same thread gets
    /// [`ContainerError::Cycle`]. Cycles spread across threads are not
    /// detected and block.
    pub fn resolve<T>(&self, app: &Arc<App>, name: &str) -> Result<Arc<T>, ContainerError>
    where
        T: Any + Send + Sync,
    {
        // Clone the binding out so the factory runs without the map lock held;
        // factories are free to resolve other services.
        let binding = self
            .bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| ContainerError::NotBound(name.to_string()))?;

        let key = Arc::as_ptr(&binding) as usize;
        if binding.instance.get().is_none() && BuildGuard::is_building(key) {
            return Err(ContainerError::Cycle(name.to_string()));
        }

        let instance = binding
            .instance
            .get_or_init(|| {
                let _guard = BuildGuard::enter(key);
                tracing::debug!(service = %name, "Building singleton instance");
                (binding.factory)(app)
            })
            .clone();

        instance
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("bindings", &self.names())
            .finish()
    }
}
