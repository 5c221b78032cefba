use crate::error::ServiceError;
use std::any::Any;
use std::fmt::{Debug, Display};
use std::sync::Arc;

/// Marker trait for transport (demultiplexer) types that key a registry.
///
/// The registry never inspects the transport; it only uses the type to keep
/// services for incompatible transports apart. Any `Send + Sync + 'static`
/// type qualifies.
pub trait Transport: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Transport for T {}

/// A constructed service, ready to be handed to the tunneling layer.
pub trait UserService<T: Transport>: Any + Debug + Display + Send + Sync {
    /// Stable service name (e.g. `"socks"`).
    fn name(&self) -> &'static str;

    /// Helper to allow downcasting from the trait object.
    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a constructed service.
pub type ServiceHandle<T> = Arc<dyn UserService<T>>;

/// Outcome of a service parser.
pub type ServiceResult<T> = Result<ServiceHandle<T>, ServiceError>;

/// Parser stored in a [`Descriptor`](crate::Descriptor).
pub type ServiceParser<T> = Arc<dyn Fn(&str) -> ServiceResult<T> + Send + Sync>;

/// A service type that knows its own command-line option.
///
/// Register it with [`OptionRegistry::register_option`](crate::OptionRegistry::register_option).
pub trait ServiceOption<T: Transport> {
    /// Registry key, usually the short flag (`"-D"`).
    const TOKEN: &'static str;
    /// Long flag name shown in help output.
    const FULLNAME: &'static str;
    /// Placeholder for the flag's value in help output.
    const VALUE_NAME: &'static str;
    /// Help text.
    const DESCRIPTION: &'static str;

    /// Builds the service from the option's raw parameter string.
    ///
    /// # Errors
    /// Returns [`ServiceError::InvalidParameters`] when `parameters` are malformed.
    fn parse(parameters: &str) -> ServiceResult<T>;
}
