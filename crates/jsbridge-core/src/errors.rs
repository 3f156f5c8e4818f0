use thiserror::Error;

/// Errors raised while building the bridge from its data source.
///
/// All of these are fatal: the bridge refuses to come up half-configured,
/// so construction aborts before any navigation event is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("data source returned no public object name")]
    MissingObjectName,

    #[error("public object name is not a valid JS identifier: {0}")]
    InvalidObjectName(String),

    #[error("data source returned no custom scheme")]
    MissingScheme,

    #[error("custom scheme contains characters not allowed in a URL scheme: {0}")]
    InvalidScheme(String),

    #[error("public selector name is empty")]
    EmptySelector,

    #[error("public selector is not a valid JS identifier: {0}")]
    InvalidSelector(String),

    #[error("public selector declared twice: {0}")]
    DuplicateSelector(String),
}

/// Errors raised while parsing a bridge call URL.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("not a bridge URL (scheme is not '{expected}'): {url}")]
    SchemeMismatch { expected: String, url: String },

    #[error("malformed bridge URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("bridge URL has no selector segment: {0}")]
    MissingSelector(String),
}

/// Errors raised while dispatching a parsed bridge call.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("selector '{0}' is not in the public whitelist")]
    UnauthorizedSelector(String),
}
