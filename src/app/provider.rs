use super::container::ServiceContainer;

/// Registers one or more services into an application's container
///
/// Providers are invoked once at startup through `App::register`. They only
/// bind factories; instances are built lazily when first resolved.
pub trait ServiceProvider {
    /// Name the provider's main service is bound under
    fn name(&self) -> &str;

    /// Bind this provider's services
    fn register(&self, container: &ServiceContainer);
}
