//! Error types for repository analysis.

use thiserror::Error;

/// Errors produced while analyzing a repository.
///
/// Variants carry owned strings so that a single failure can be cloned out
/// to every caller waiting on the same in-flight analysis.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// The external commit source failed to return a page
    #[error("failed to fetch commits for {repo}: {message}")]
    Fetch { repo: String, message: String },

    /// An in-flight analysis went away without producing a result
    #[error("analysis for {0} ended without a result")]
    Disconnected(String),
}

impl AnalysisError {
    pub(crate) fn fetch(repo: &str, err: impl std::fmt::Display) -> Self {
        Self::Fetch {
            repo: repo.to_string(),
            message: err.to_string(),
        }
    }
}
