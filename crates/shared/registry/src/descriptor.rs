use crate::service::{ServiceParser, ServiceResult, Transport};
use std::fmt;
use std::sync::Arc;

/// Registered metadata and parser for one option token.
///
/// Fields are fixed once built. Replacing a token's descriptor means
/// unregistering it and registering a new one.
pub struct Descriptor<T: Transport> {
    parser: ServiceParser<T>,
    fullname: String,
    value_name: String,
    description: String,
}

impl<T: Transport> Descriptor<T> {
    pub fn new(
        fullname: impl Into<String>,
        value_name: impl Into<String>,
        description: impl Into<String>,
        parser: impl Fn(&str) -> ServiceResult<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            parser: Arc::new(parser),
            fullname: fullname.into(),
            value_name: value_name.into(),
            description: description.into(),
        }
    }

    #[must_use]
    pub fn fullname(&self) -> &str {
        &self.fullname
    }

    #[must_use]
    pub fn value_name(&self) -> &str {
        &self.value_name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns a shared handle to the parser.
    #[must_use]
    pub fn parser(&self) -> ServiceParser<T> {
        Arc::clone(&self.parser)
    }

    pub(crate) fn describe(&self, token: &str) -> OptionDescription {
        OptionDescription {
            token: token.to_owned(),
            fullname: self.fullname.clone(),
            value_name: self.value_name.clone(),
            description: self.description.clone(),
        }
    }
}

impl<T: Transport> Clone for Descriptor<T> {
    fn clone(&self) -> Self {
        Self {
            parser: Arc::clone(&self.parser),
            fullname: self.fullname.clone(),
            value_name: self.value_name.clone(),
            description: self.description.clone(),
        }
    }
}

impl<T: Transport> fmt::Debug for Descriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("fullname", &self.fullname)
            .field("value_name", &self.value_name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Help metadata for one registered option, as returned by
/// [`OptionRegistry::describe`](crate::OptionRegistry::describe).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionDescription {
    /// Registry key the option was registered under.
    pub token: String,
    pub fullname: String,
    pub value_name: String,
    pub description: String,
}
