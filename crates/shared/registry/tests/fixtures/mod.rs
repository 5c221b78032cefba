#![allow(dead_code, unreachable_pub)]

use burrow_registry::{ServiceError, ServiceOption, ServiceResult, UserService};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Transport used by most tests.
#[derive(Debug)]
pub struct StreamDemux;

/// A second, unrelated transport.
#[derive(Debug)]
pub struct DatagramDemux;

/// Service that remembers which option built it and with what parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub kind: &'static str,
    pub parameters: String,
}

impl fmt::Display for Recorded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.parameters)
    }
}

impl<T: Send + Sync + 'static> UserService<T> for Recorded {
    fn name(&self) -> &'static str {
        self.kind
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Parser building a [`Recorded`] service tagged with `kind`.
pub fn recording<T: Send + Sync + 'static>(
    kind: &'static str,
) -> impl Fn(&str) -> ServiceResult<T> + Send + Sync + 'static {
    move |parameters: &str| {
        Ok(Arc::new(Recorded { kind, parameters: parameters.to_owned() }) as Arc<dyn UserService<T>>)
    }
}

/// Downcasts a constructed service back to [`Recorded`].
pub fn recorded<T: Send + Sync + 'static>(service: &Arc<dyn UserService<T>>) -> Recorded {
    service.as_any().downcast_ref::<Recorded>().cloned().expect("service should be Recorded")
}

/// Socks option declared through [`ServiceOption`].
pub struct SocksOption;

impl ServiceOption<StreamDemux> for SocksOption {
    const TOKEN: &'static str = "-D";
    const FULLNAME: &'static str = "socks";
    const VALUE_NAME: &'static str = "port";
    const DESCRIPTION: &'static str = "Run a SOCKS proxy on the given local port";

    fn parse(parameters: &str) -> ServiceResult<StreamDemux> {
        parameters
            .parse::<u16>()
            .map_err(|e| ServiceError::invalid(Self::TOKEN, e.to_string()))
            .map(|_| {
                Arc::new(Recorded { kind: "socks", parameters: parameters.to_owned() })
                    as Arc<dyn UserService<StreamDemux>>
            })
    }
}
