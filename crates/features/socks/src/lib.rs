//! Dynamic forwarding: a SOCKS proxy listening on this side (`-D`).

use burrow_kernel::endpoint::{Endpoint, parse_listener};
use burrow_registry::{
    OptionRegistry, ServiceError, ServiceOption, ServiceResult, Transport, UserService,
};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A parsed SOCKS proxy request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Socks {
    pub listen: Endpoint,
}

impl fmt::Display for Socks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "socks proxy on {}", self.listen)
    }
}

impl<T: Transport> UserService<T> for Socks {
    fn name(&self) -> &'static str {
        "dynamic-forward"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `-D` option.
#[derive(Debug)]
pub struct DynamicForward;

impl<T: Transport> ServiceOption<T> for DynamicForward {
    const TOKEN: &'static str = "-D";
    const FULLNAME: &'static str = "dynamic-forward";
    const VALUE_NAME: &'static str = "[bind_address:]port";
    const DESCRIPTION: &'static str =
        "Run a SOCKS proxy on the given port, relayed through the tunnel";

    fn parse(parameters: &str) -> ServiceResult<T> {
        let token = <Self as ServiceOption<T>>::TOKEN;
        let listen =
            parse_listener(parameters).map_err(|e| ServiceError::invalid(token, e.to_string()))?;
        Ok(Arc::new(Socks { listen }))
    }
}

/// Registers `-D` into `registry`. Returns `1` if it was not taken yet, `0` otherwise.
pub fn register<T: Transport>(registry: &OptionRegistry<T>) -> usize {
    let registered = usize::from(registry.register_option::<DynamicForward>());
    tracing::debug!(registered, "SOCKS option registered");
    registered
}
