use std::borrow::Cow;

/// Errors produced while turning a service option into a service.
///
/// The registry itself only ever yields [`ServiceError::ServiceNotFound`];
/// the remaining variants belong to service parsers and are passed through
/// [`OptionRegistry::parse`](crate::OptionRegistry::parse) untouched.
#[burrow_derive::burrow_error]
#[derive(Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// No service option is registered under the requested token.
    #[error("Service not found{}: {token}", format_context(.context))]
    ServiceNotFound { token: String, context: Option<Cow<'static, str>> },

    /// The option's parameter string could not be parsed by its service.
    #[error("Invalid parameters for {token}{}: {message}", format_context(.context))]
    InvalidParameters {
        token: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// Internal fallback for unexpected issues.
    #[error("Internal service error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ServiceError {
    /// Builds a [`ServiceError::ServiceNotFound`] for `token`.
    #[must_use]
    pub fn not_found(token: impl Into<String>) -> Self {
        Self::ServiceNotFound { token: token.into(), context: None }
    }

    /// Builds a [`ServiceError::InvalidParameters`] for `token`.
    #[must_use]
    pub fn invalid(
        token: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidParameters { token: token.into(), message: message.into(), context: None }
    }

    /// Returns `true` for [`ServiceError::ServiceNotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ServiceNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_context() {
        let err = ServiceError::not_found("-X");
        assert_eq!(err.to_string(), "Service not found: -X");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_context_is_rendered() {
        let err: Result<(), ServiceError> = Err(ServiceError::invalid("-D", "port out of range"));
        let err = err.context("command line").unwrap_err();
        assert_eq!(err.to_string(), "Invalid parameters for -D (command line): port out of range");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_internal_from_str() {
        let err = ServiceError::from("unexpected");
        assert!(matches!(err, ServiceError::Internal { context: None, .. }));
    }
}
