//! Build error taxonomy.
//!
//! Nothing in the pipeline recovers from these: the first one aborts the
//! build and is reported with the offending path or slug.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils::exec::ExecError;

/// Which kind of content item collided on a slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Article,
    Link,
}

impl ItemKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Link => "link",
        }
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    /// Required field missing, wrong type, or malformed date.
    #[error("invalid metadata in `{}`: {reason}", .path.display())]
    Metadata { path: PathBuf, reason: String },

    /// The renderer exited non-zero, timed out, or printed unusable output.
    #[error("rendering `{}` failed", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderFailure,
    },

    #[error("I/O error at `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "duplicate {} slug `{slug}`: `{}` and `{}`",
        .kind.as_str(),
        .first.display(),
        .second.display()
    )]
    DuplicateSlug {
        kind: ItemKind,
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Underlying cause of a [`BuildError::Render`].
#[derive(Debug, Error)]
pub enum RenderFailure {
    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("renderer output is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("renderer output is JSON but not an object")]
    NotAnObject,
}

impl BuildError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn metadata(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::Metadata {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn render(path: impl AsRef<Path>, source: impl Into<RenderFailure>) -> Self {
        Self::Render {
            path: path.as_ref().to_path_buf(),
            source: source.into(),
        }
    }
}

/// Attach a path to `std::io` results.
pub trait IoContext<T> {
    fn at(self, path: impl AsRef<Path>) -> Result<T, BuildError>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn at(self, path: impl AsRef<Path>) -> Result<T, BuildError> {
        self.map_err(|e| BuildError::io(path, e))
    }
}
