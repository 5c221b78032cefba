//! # Service Option Registry
//!
//! Lets independently compiled service crates contribute command-line options
//! to a shared CLI surface without the CLI knowing any concrete service type.
//!
//! ## Overview
//!
//! * [`OptionRegistry<T>`] maps option tokens (`"-L"`, `"-D"`, ...) to a
//!   [`Descriptor`]: help metadata plus the parser that turns the option's raw
//!   parameter string into a constructed [`UserService`].
//! * Registries are typed by a transport `T`. Each `T` gets its own map and
//!   lock; [`RegistryFamily`] hands out one registry per `T`.
//! * All operations serialize through a re-entrant lock, so a parser invoked by
//!   [`OptionRegistry::parse`] may call back into the same registry.
//! * With the `cli` feature, [`cli`] turns the registry into `clap` arguments
//!   and parses matched occurrences in command-line order.
//!
//! # Example
//!
//! ```rust
//! use burrow_registry::{OptionRegistry, ServiceError, UserService};
//! use std::any::Any;
//! use std::fmt;
//! use std::sync::Arc;
//!
//! struct Demux;
//!
//! #[derive(Debug)]
//! struct Socks(u16);
//!
//! impl fmt::Display for Socks {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "socks on {}", self.0)
//!     }
//! }
//!
//! impl UserService<Demux> for Socks {
//!     fn name(&self) -> &'static str {
//!         "socks"
//!     }
//!
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! # fn main() -> Result<(), ServiceError> {
//! let registry = OptionRegistry::<Demux>::new();
//! registry.register("-D", "socks", "port", "Run a SOCKS proxy", |raw: &str| {
//!     let port = raw.parse::<u16>().map_err(|e| ServiceError::invalid("-D", e.to_string()))?;
//!     Ok(Arc::new(Socks(port)) as _)
//! });
//!
//! let service = registry.parse("-D", "1080")?;
//! assert_eq!(service.name(), "socks");
//! assert!(matches!(registry.parse("-X", ""), Err(ServiceError::ServiceNotFound { .. })));
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "cli")]
pub mod cli;
mod descriptor;
mod error;
mod family;
mod registry;
mod service;

pub use crate::descriptor::{Descriptor, OptionDescription};
pub use crate::error::{ServiceError, ServiceErrorExt};
pub use crate::family::RegistryFamily;
pub use crate::registry::OptionRegistry;
pub use crate::service::{
    ServiceHandle, ServiceOption, ServiceParser, ServiceResult, Transport, UserService,
};
