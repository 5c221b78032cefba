use crate::descriptor::{Descriptor, OptionDescription};
use crate::error::ServiceError;
use crate::service::{ServiceOption, ServiceResult, Transport};
use parking_lot::ReentrantMutex;
use std::any::type_name;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace, warn};

/// Registry of service options for transport `T`.
///
/// Every operation takes the same re-entrant lock, so a parser running inside
/// [`OptionRegistry::parse`] may register, unregister, describe or parse on this
/// registry from the same thread. Other threads block until the outermost call
/// returns.
///
/// Entries are kept sorted by token; [`OptionRegistry::describe`] enumerates
/// them in that order.
pub struct OptionRegistry<T: Transport> {
    entries: ReentrantMutex<RefCell<BTreeMap<String, Descriptor<T>>>>,
}

impl<T: Transport> Default for OptionRegistry<T> {
    fn default() -> Self {
        Self { entries: ReentrantMutex::new(RefCell::new(BTreeMap::new())) }
    }
}

impl<T: Transport> OptionRegistry<T> {
    /// Creates a new, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a service option under `token`.
    ///
    /// Returns `false` and leaves the existing entry untouched if `token` is
    /// already registered, or if `token` is empty.
    pub fn register(
        &self,
        token: impl Into<String>,
        fullname: impl Into<String>,
        value_name: impl Into<String>,
        description: impl Into<String>,
        parser: impl Fn(&str) -> ServiceResult<T> + Send + Sync + 'static,
    ) -> bool {
        self.register_descriptor(token, Descriptor::new(fullname, value_name, description, parser))
    }

    /// Registers an already built [`Descriptor`] under `token`.
    ///
    /// Same conflict rules as [`OptionRegistry::register`].
    pub fn register_descriptor(
        &self,
        token: impl Into<String>,
        descriptor: Descriptor<T>,
    ) -> bool {
        let token = token.into();
        if token.is_empty() {
            warn!(transport = type_name::<T>(), "Rejected service option with an empty token");
            return false;
        }

        let guard = self.entries.lock();
        let mut entries = guard.borrow_mut();
        if entries.contains_key(&token) {
            warn!(
                token = %token,
                transport = type_name::<T>(),
                "Service option already registered"
            );
            return false;
        }

        debug!(token = %token, fullname = descriptor.fullname(), "Service option registered");
        entries.insert(token, descriptor);
        true
    }

    /// Registers the option declared by service type `S`.
    pub fn register_option<S: ServiceOption<T> + 'static>(&self) -> bool {
        self.register(S::TOKEN, S::FULLNAME, S::VALUE_NAME, S::DESCRIPTION, S::parse)
    }

    /// Removes the option registered under `token`.
    ///
    /// Returns `false` if nothing was registered under it.
    pub fn unregister(&self, token: &str) -> bool {
        let guard = self.entries.lock();
        let removed = guard.borrow_mut().remove(token).is_some();
        if removed {
            debug!(token, "Service option unregistered");
        }
        removed
    }

    /// Snapshot of every registered option, ordered by token (byte-wise).
    #[must_use]
    pub fn describe(&self) -> Vec<OptionDescription> {
        let guard = self.entries.lock();
        let entries = guard.borrow();
        entries.iter().map(|(token, descriptor)| descriptor.describe(token)).collect()
    }

    /// Builds a service by handing `parameters` to the parser registered
    /// under `token`.
    ///
    /// The parser's result is returned unchanged, error included. The lock is
    /// held while the parser runs: a slow or hung parser stalls every other
    /// operation on this registry, and there is no timeout.
    ///
    /// # Errors
    /// Returns [`ServiceError::ServiceNotFound`] if `token` is not registered,
    /// otherwise whatever the parser returns.
    pub fn parse(&self, token: &str, parameters: &str) -> ServiceResult<T> {
        let guard = self.entries.lock();
        // The map borrow ends here so the parser may re-enter the registry.
        let parser = guard.borrow().get(token).map(Descriptor::parser);

        let Some(parser) = parser else {
            debug!(token, transport = type_name::<T>(), "Unknown service option");
            return Err(ServiceError::not_found(token));
        };

        trace!(token, parameters, "Dispatching service option");
        let result = parser(parameters);
        drop(guard);
        result
    }

    /// Returns `true` if `token` is registered.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.entries.lock().borrow().contains_key(token)
    }

    /// Registered tokens, in enumeration order.
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        self.entries.lock().borrow().keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Transport> fmt::Debug for OptionRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionRegistry")
            .field("transport", &type_name::<T>())
            .field("tokens", &self.tokens())
            .finish()
    }
}
