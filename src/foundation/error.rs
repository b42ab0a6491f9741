/// Convenience result type used across stillreel.
pub type StillreelResult<T> = Result<T, StillreelError>;

/// Top-level error taxonomy used by the library APIs.
#[derive(thiserror::Error, Debug)]
pub enum StillreelError {
    /// The external encoder could not be loaded.
    #[error("library load error: {0}")]
    Load(#[from] LoadError),

    /// A call into the encoder's scratch filesystem failed.
    #[error("filesystem error: {0}")]
    Vfs(#[from] VfsError),

    /// The encoder ran but did not produce a result.
    #[error("encode error: {0}")]
    Encode(String),

    /// Invalid configuration file or flag values.
    #[error("configuration error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StillreelError {
    /// Build a [`StillreelError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`StillreelError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Outcome of a failed encoder load.
///
/// Once a loader has failed it hands out this same value to every later caller.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The load ran and failed.
    #[error("encoder failed to load: {reason}")]
    Failed {
        /// Display form of the underlying failure.
        reason: String,
    },

    /// The loader went away before settling this request.
    #[error("encoder load was abandoned before it settled")]
    Abandoned,
}

impl LoadError {
    /// Build a [`LoadError::Failed`] from any displayable cause.
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self::Failed {
            reason: reason.to_string(),
        }
    }
}

/// Problems with the selected files that stop a conversion before it starts.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Files in the selection carry different extensions.
    #[error("all files must share one extension (found: {})", found.join(", "))]
    MixedExtensions {
        /// Distinct lower-cased extensions, in first-seen order.
        found: Vec<String>,
    },

    /// The shared extension is empty.
    #[error("could not determine the file extension")]
    MissingExtension,
}

/// Errors from the encoder's scratch filesystem.
#[derive(thiserror::Error, Debug)]
pub enum VfsError {
    /// The named entry does not exist.
    #[error("no such file: {path}")]
    NotFound {
        /// Name that was looked up.
        path: String,
    },

    /// Names must be bare file names without separators or parent references.
    #[error("invalid scratch path: {path}")]
    InvalidPath {
        /// Offending name.
        path: String,
    },

    /// The backend has not been loaded yet.
    #[error("encoder filesystem is not loaded")]
    NotLoaded,

    /// Any other IO failure.
    #[error("io error on {path}: {source}")]
    Io {
        /// Name the operation was applied to.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl VfsError {
    /// Map an IO error on `path`, folding `NotFound` into [`VfsError::NotFound`].
    pub fn from_io(path: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_owned(),
            }
        } else {
            Self::Io {
                path: path.to_owned(),
                source,
            }
        }
    }

    /// `true` for [`VfsError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
