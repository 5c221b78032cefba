//! Port forwarding services: `-L` (local) and `-R` (remote).
//!
//! Both options take `[bind_address:]port:host:hostport`. A local forward
//! listens on this side and connects out from the peer; a remote forward does
//! the opposite.

use burrow_kernel::endpoint::{Endpoint, parse_forward};
use burrow_registry::{
    OptionRegistry, ServiceError, ServiceOption, ServiceResult, Transport, UserService,
};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

const LOCAL_FORWARD: &str = "local-forward";
const REMOTE_FORWARD: &str = "remote-forward";
const FORWARD_SYNTAX: &str = "[bind_address:]port:host:hostport";

/// Which side of the tunnel listens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Listen locally, connect from the remote peer.
    Local,
    /// Listen on the remote peer, connect locally.
    Remote,
}

/// A parsed port forwarding request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortForward {
    pub direction: Direction,
    pub listen: Endpoint,
    pub target: Endpoint,
}

impl PortForward {
    fn parse(
        direction: Direction,
        token: &'static str,
        parameters: &str,
    ) -> Result<Self, ServiceError> {
        let (listen, target) =
            parse_forward(parameters).map_err(|e| ServiceError::invalid(token, e.to_string()))?;
        Ok(Self { direction, listen, target })
    }
}

impl fmt::Display for PortForward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.direction {
            Direction::Local => "local",
            Direction::Remote => "remote",
        };
        write!(f, "{side} forward {} -> {}", self.listen, self.target)
    }
}

impl<T: Transport> UserService<T> for PortForward {
    fn name(&self) -> &'static str {
        match self.direction {
            Direction::Local => LOCAL_FORWARD,
            Direction::Remote => REMOTE_FORWARD,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `-L` option.
#[derive(Debug)]
pub struct LocalForward;

impl<T: Transport> ServiceOption<T> for LocalForward {
    const TOKEN: &'static str = "-L";
    const FULLNAME: &'static str = LOCAL_FORWARD;
    const VALUE_NAME: &'static str = FORWARD_SYNTAX;
    const DESCRIPTION: &'static str =
        "Forward a local port to host:hostport reached from the remote side";

    fn parse(parameters: &str) -> ServiceResult<T> {
        let forward = PortForward::parse(Direction::Local, "-L", parameters)?;
        Ok(Arc::new(forward))
    }
}

/// `-R` option.
#[derive(Debug)]
pub struct RemoteForward;

impl<T: Transport> ServiceOption<T> for RemoteForward {
    const TOKEN: &'static str = "-R";
    const FULLNAME: &'static str = REMOTE_FORWARD;
    const VALUE_NAME: &'static str = FORWARD_SYNTAX;
    const DESCRIPTION: &'static str =
        "Forward a port on the remote side to host:hostport reached locally";

    fn parse(parameters: &str) -> ServiceResult<T> {
        let forward = PortForward::parse(Direction::Remote, "-R", parameters)?;
        Ok(Arc::new(forward))
    }
}

/// Registers `-L` and `-R` into `registry`.
///
/// Returns how many options were newly registered; a token that is already
/// taken is skipped.
pub fn register<T: Transport>(registry: &OptionRegistry<T>) -> usize {
    let registered = usize::from(registry.register_option::<LocalForward>())
        + usize::from(registry.register_option::<RemoteForward>());
    tracing::debug!(registered, "Port forwarding options registered");
    registered
}
