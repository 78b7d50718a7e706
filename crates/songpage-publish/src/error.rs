//! Error types for generating and publishing pages.

use std::path::PathBuf;

use thiserror::Error;

use crate::git::GitStep;

/// Errors that can occur while generating or publishing a page.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The song record was rejected before anything was written.
    #[error(transparent)]
    Validation(#[from] songpage_core::Error),

    /// Writing the page failed. Nothing was left at `path`.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The page exists and the overwrite policy is `refuse`.
    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),

    /// A git step failed. Steps after it were not run.
    #[error("{step} failed: {message}")]
    Git { step: GitStep, message: String },
}

impl PublishError {
    /// Returns `true` when the user can fix the error by changing their input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::AlreadyExists(_))
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for publishing results.
pub type PublishResult<T> = std::result::Result<T, PublishError>;
