//! Endpoint syntax shared by forwarding service options.
//!
//! ```text
//! listener: [bind_address:]port
//! forward:  [bind_address:]port:host:hostport
//! ```
//!
//! IPv6 addresses are written in brackets (`[::1]:8080`). An empty bind address
//! or `*` binds every interface; an omitted one binds loopback only.

use std::borrow::Cow;
use std::fmt;

/// Bind address used when none is given.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

/// Bind address used for an empty or `*` bind field.
pub const ANY_ADDRESS: &str = "0.0.0.0";

#[burrow_derive::burrow_error]
#[derive(Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// Port field is not a number in `1..=65535`.
    #[error("Invalid port{}: '{value}'", format_context(.context))]
    InvalidPort { value: String, context: Option<Cow<'static, str>> },

    /// Host field is empty or has unbalanced brackets.
    #[error("Invalid host{}: '{value}'", format_context(.context))]
    InvalidHost { value: String, context: Option<Cow<'static, str>> },

    /// Wrong number of fields for the expected syntax.
    #[error("Malformed endpoint '{spec}'{}: {message}", format_context(.context))]
    Malformed { spec: String, message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// A host and port pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Parses `[bind_address:]port`.
///
/// # Errors
/// Returns [`EndpointError`] for a bad port, bad host or wrong field count.
pub fn parse_listener(spec: &str) -> Result<Endpoint, EndpointError> {
    match split_fields(spec)?.as_slice() {
        [port] => Ok(Endpoint::new(DEFAULT_BIND_ADDRESS, parse_port(port)?)),
        [bind, port] => Ok(Endpoint::new(parse_bind(bind)?, parse_port(port)?)),
        _ => Err(EndpointError::Malformed {
            spec: spec.to_owned(),
            message: "expected [bind_address:]port".into(),
            context: None,
        }),
    }
}

/// Parses `[bind_address:]port:host:hostport` into a listen and a target endpoint.
///
/// # Errors
/// Returns [`EndpointError`] for a bad port, bad host or wrong field count.
pub fn parse_forward(spec: &str) -> Result<(Endpoint, Endpoint), EndpointError> {
    let (bind, port, host, host_port) = match split_fields(spec)?.as_slice() {
        [port, host, host_port] => (None, *port, *host, *host_port),
        [bind, port, host, host_port] => (Some(*bind), *port, *host, *host_port),
        _ => {
            return Err(EndpointError::Malformed {
                spec: spec.to_owned(),
                message: "expected [bind_address:]port:host:hostport".into(),
                context: None,
            });
        },
    };

    let bind = bind.map_or_else(|| Ok(DEFAULT_BIND_ADDRESS.to_owned()), parse_bind)?;
    let listen = Endpoint::new(bind, parse_port(port)?);
    let target = Endpoint::new(parse_host(host)?, parse_port(host_port)?);

    Ok((listen, target))
}

/// Splits on `:` outside of `[...]`.
fn split_fields(spec: &str) -> Result<Vec<&str>, EndpointError> {
    let mut fields = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0;

    for (index, ch) in spec.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1).ok_or_else(|| EndpointError::InvalidHost {
                    value: spec.to_owned(),
                    context: Some("unbalanced ']'".into()),
                })?;
            },
            ':' if depth == 0 => {
                fields.push(&spec[start..index]);
                start = index + 1;
            },
            _ => {},
        }
    }

    if depth != 0 {
        return Err(EndpointError::InvalidHost {
            value: spec.to_owned(),
            context: Some("unbalanced '['".into()),
        });
    }

    fields.push(&spec[start..]);
    Ok(fields)
}

fn parse_port(field: &str) -> Result<u16, EndpointError> {
    match field.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(EndpointError::InvalidPort { value: field.to_owned(), context: None }),
    }
}

fn parse_host(field: &str) -> Result<String, EndpointError> {
    let host = field.trim();
    let host = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')).unwrap_or(host);

    if host.is_empty() || host.contains(['[', ']']) {
        return Err(EndpointError::InvalidHost { value: field.to_owned(), context: None });
    }
    Ok(host.to_owned())
}

fn parse_bind(field: &str) -> Result<String, EndpointError> {
    match field.trim() {
        "" | "*" => Ok(ANY_ADDRESS.to_owned()),
        _ => parse_host(field),
    }
}
