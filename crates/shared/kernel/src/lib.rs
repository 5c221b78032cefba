//! Kernel utilities shared across service crates and applications.
//! Keep this crate lightweight: endpoint syntax used by service options and
//! layered config loading.
//!
//! ## Endpoints
//! ```rust
//! use burrow_kernel::endpoint::parse_listener;
//!
//! let listen = parse_listener("1080").unwrap();
//! assert_eq!(listen.to_string(), "127.0.0.1:1080");
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use burrow_kernel::config::load_config;
//! let cfg: serde_json::Value = load_config(Some("burrow")).unwrap();
//! ```
pub mod config;
pub mod endpoint;
