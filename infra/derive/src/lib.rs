#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the burrow crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! burrow-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for declaring crate error enums.
///
/// # Injected items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * A `<ErrorName>Ext` trait adding `.context(...)` to `Result<T, ErrorName>`
///   and to `Result<T, Source>` for every variant wrapping a source error.
/// * `From<Source>` for every variant with a `source` field (or a field
///   marked `#[source]`/`#[from]`), so `?` works on upstream errors.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper for use in `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Applied to an **enum** with named-field variants only.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. Variants with a source field must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use burrow_derive::burrow_error;
/// use std::borrow::Cow;
///
/// #[burrow_error]
/// pub enum ServiceError {
///     #[error("Service not found{}: {token}", format_context(.context))]
///     ServiceNotFound { token: String, context: Option<Cow<'static, str>> },
///
///     #[error("Internal service error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn burrow_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
