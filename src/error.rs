//! Error types for the encoder, the runtime filesystem and the CLI.

use thiserror::Error;

/// Rejected logical path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("invalid path {path:?}: {reason}")]
    Invalid { path: String, reason: &'static str },

    #[error("duplicate path {path:?}")]
    Duplicate { path: String },

    /// One path would have to be both a file and a directory.
    #[error("path {path:?} conflicts with {existing:?}")]
    Conflict { path: String, existing: String },
}

impl PathError {
    pub(crate) fn invalid(path: &str, reason: &'static str) -> Self {
        PathError::Invalid {
            path: path.to_string(),
            reason,
        }
    }
}

/// Errors raised while generating an embedded module.
///
/// Every variant aborts the current run; the caller discards whatever the sink
/// already received.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("encoder is closed: footer already written or a previous record failed")]
    Closed,

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the runtime filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VfsError {
    /// The embedded records contradict the encoding contract.
    #[error("corrupt manifest: {0}")]
    CorruptManifest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("is a directory: {0}")]
    IsADirectory(String),

    #[error(transparent)]
    InvalidPath(#[from] PathError),

    #[error("invalid seek offset {0}")]
    InvalidOffset(i128),

    #[error("unsupported operation on read-only filesystem: {0}")]
    Unsupported(&'static str),

    #[error("failed to decompress {path}: {message}")]
    Decompress { path: String, message: String },
}

impl From<VfsError> for std::io::Error {
    fn from(err: VfsError) -> Self {
        let kind = match err {
            VfsError::NotFound(_) => std::io::ErrorKind::NotFound,
            VfsError::NotADirectory(_) | VfsError::IsADirectory(_) => {
                std::io::ErrorKind::InvalidInput
            }
            VfsError::InvalidPath(_) | VfsError::InvalidOffset(_) => {
                std::io::ErrorKind::InvalidInput
            }
            VfsError::Unsupported(_) => std::io::ErrorKind::Unsupported,
            VfsError::CorruptManifest(_) | VfsError::Decompress { .. } => {
                std::io::ErrorKind::InvalidData
            }
        };
        std::io::Error::new(kind, err)
    }
}

/// Errors surfaced by configuration loading and the generator CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::ConfigError(err.to_string())
    }
}

impl CliError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        CliError::Io {
            context: context.into(),
            source,
        }
    }
}
