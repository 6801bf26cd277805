//! Core resource traits and types.

use crate::context::{Context, ContextError};
use thiserror::Error;
use url::Url;

/// Errors that can occur while building or testing a resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A required argument was missing. Carries the parameter name.
    #[error("{0:?}: invalid argument")]
    InvalidArgument(&'static str),

    /// The request could not be built from the target URL.
    #[error("failed to build request: {message}")]
    Request {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request did not complete (DNS, connect, TLS, reset...).
    ///
    /// `message` holds the full cause chain so callers can match on it.
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// The caller's context was canceled or its deadline passed.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// A response arrived with a status outside `[200, 400)`.
    /// Carries the status line, e.g. `503 Service Unavailable`.
    #[error("{0}")]
    Unready(String),

    /// No factory is registered for the URL scheme.
    #[error("unsupported scheme: {0:?}")]
    UnsupportedScheme(String),

    /// The URL string could not be parsed.
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ResourceError {
    pub(crate) fn request(source: reqwest::Error) -> Self {
        Self::Request {
            message: error_chain(&source),
            source,
        }
    }

    pub(crate) fn transport(source: reqwest::Error) -> Self {
        Self::Transport {
            message: error_chain(&source),
            source,
        }
    }
}

/// Render an error and all of its sources as `outer: inner: root`.
///
/// reqwest keeps the interesting part (`Connection refused`, DNS failures)
/// in the source chain rather than in its own `Display`.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// A probe bound to one target that can be checked for readiness.
///
/// Implementations hold no mutable state: every [`test`](Resource::test) call
/// is an independent attempt, safe to run concurrently on one instance.
#[async_trait::async_trait]
pub trait Resource: Send + Sync + std::fmt::Debug {
    /// Perform one readiness check.
    ///
    /// Returns `Ok(())` when the target is ready. The context bounds how long
    /// the check may take; implementations never retry.
    async fn test(&self, ctx: &Context) -> Result<(), ResourceError>;
}

/// Builds a resource from a parsed URL. `None` means no URL was supplied.
pub type ResourceFactory = fn(Option<Url>) -> Result<Box<dyn Resource>, ResourceError>;

/// Registration descriptor: the schemes a factory handles.
#[derive(Debug, Clone, Copy)]
pub struct ResourceConfig {
    /// URL schemes routed to `factory`.
    pub scheme: &'static [&'static str],
    /// Constructor for resources of this kind.
    pub factory: ResourceFactory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(Inner);

    #[derive(Debug)]
    struct Inner;

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "error sending request")
        }
    }

    impl std::fmt::Display for Inner {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "network error")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    impl std::error::Error for Inner {}

    #[test]
    fn test_invalid_argument_names_parameter() {
        let err = ResourceError::InvalidArgument("url");
        assert_eq!(err.to_string(), "\"url\": invalid argument");
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let err = Outer(Inner);
        assert_eq!(error_chain(&err), "error sending request: network error");
    }

    #[test]
    fn test_context_error_passes_through() {
        let err = ResourceError::from(ContextError::Canceled);
        assert_eq!(err.to_string(), "context canceled");
    }

    #[test]
    fn test_unready_is_status_line() {
        let err = ResourceError::Unready("500 Internal Server Error".to_string());
        assert_eq!(err.to_string(), "500 Internal Server Error");
    }
}
