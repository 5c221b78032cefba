//! Facade crate for burrow.
//! Re-exports the registry, kernel helpers and built-in services, and wires
//! the built-in service options into a registry in one call.
//! Keep this crate thin: it composes other crates, it does not implement services.
//!
//! ## Usage
//! ```rust
//! use burrow::registry::OptionRegistry;
//!
//! struct Demux;
//!
//! let registry = OptionRegistry::<Demux>::new();
//! assert_eq!(burrow::register_builtin(&registry), burrow::services::ENABLED.len());
//! assert!(registry.parse("-D", "1080").is_ok());
//! ```

pub use burrow_kernel as kernel;
pub use burrow_registry as registry;

use burrow_registry::{OptionRegistry, Transport};

/// Built-in services.
pub mod services {
    pub use burrow_forward as forward;
    pub use burrow_socks as socks;

    /// Tokens of every built-in service option.
    pub const ENABLED: &[&str] = &["-D", "-L", "-R"];

    #[must_use]
    pub fn is_builtin(token: &str) -> bool {
        ENABLED.contains(&token)
    }
}

/// Registers every built-in service option into `registry`.
///
/// Returns how many were newly registered. Tokens already taken (for example by
/// a service the caller registered first) are left alone.
pub fn register_builtin<T: Transport>(registry: &OptionRegistry<T>) -> usize {
    let registered = services::forward::register(registry) + services::socks::register(registry);
    tracing::info!(registered, total = services::ENABLED.len(), "Built-in service options registered");
    registered
}
