//! Error handling for the release-checker crate.
use std::{error::Error as StdError, fmt};

/// Error type for the release-checker crate.
#[derive(Debug)]
pub struct ReleaseCheckerError {
    /// Inner error.
    inner: Box<Inner>,
}

impl ReleaseCheckerError {
    /// Create a new error.
    pub(crate) fn new(kind: ReleaseCheckerErrorKind) -> Self {
        Self {
            inner: Box::new(Inner { kind, source: None }),
        }
    }

    /// Create a new error with a source.
    pub(crate) fn new_with_source<E>(kind: ReleaseCheckerErrorKind, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            inner: Box::new(Inner {
                kind,
                source: Some(source.into()),
            }),
        }
    }

    /// Attach a text as the source of the error.
    pub(crate) fn with_text(mut self, text: &str) -> Self {
        self.inner.source = Some(Box::new(std::io::Error::other(text.to_string())));
        self
    }

    /// Kind of the error.
    pub fn kind(&self) -> &ReleaseCheckerErrorKind {
        &self.inner.kind
    }
}

/// Type alias for a boxed error.
pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Inner error type for the release-checker crate.
#[derive(Debug)]
struct Inner {
    /// Error kind.
    kind: ReleaseCheckerErrorKind,

    /// Source error.
    source: Option<BoxError>,
}

/// Kind of [`ReleaseCheckerError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseCheckerErrorKind {
    /// Error related to the reqwest crate.
    Reqwest,

    /// Error related to serde.
    Serde,

    /// Error related to the filesystem.
    Io,

    /// Error related to the toml crate.
    Toml,

    /// Invalid endpoint URL.
    Url,

    /// Invalid configuration.
    Config,

    /// The endpoint answered with a non-success status.
    Query,

    /// The endpoint answered with GraphQL errors.
    GraphQl,
}

impl fmt::Display for ReleaseCheckerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.source {
            Some(source) => write!(f, "{:?}: {}", self.inner.kind, source),
            None => write!(f, "{:?}", self.inner.kind),
        }
    }
}

impl StdError for ReleaseCheckerError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| &**e as _)
    }
}

impl From<reqwest::Error> for ReleaseCheckerError {
    fn from(e: reqwest::Error) -> Self {
        Self::new_with_source(ReleaseCheckerErrorKind::Reqwest, e)
    }
}

impl From<serde_json::Error> for ReleaseCheckerError {
    fn from(e: serde_json::Error) -> Self {
        Self::new_with_source(ReleaseCheckerErrorKind::Serde, e)
    }
}

impl From<std::io::Error> for ReleaseCheckerError {
    fn from(e: std::io::Error) -> Self {
        Self::new_with_source(ReleaseCheckerErrorKind::Io, e)
    }
}

impl From<toml::de::Error> for ReleaseCheckerError {
    fn from(e: toml::de::Error) -> Self {
        Self::new_with_source(ReleaseCheckerErrorKind::Toml, e)
    }
}

impl From<toml::ser::Error> for ReleaseCheckerError {
    fn from(e: toml::ser::Error) -> Self {
        Self::new_with_source(ReleaseCheckerErrorKind::Toml, e)
    }
}

impl From<url::ParseError> for ReleaseCheckerError {
    fn from(e: url::ParseError) -> Self {
        Self::new_with_source(ReleaseCheckerErrorKind::Url, e)
    }
}

impl From<&str> for ReleaseCheckerError {
    fn from(s: &str) -> Self {
        Self::new(ReleaseCheckerErrorKind::Config).with_text(s)
    }
}

impl From<String> for ReleaseCheckerError {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
