//! # Repository Commit Statistics Library
//!
//! `repostats` ingests the commit history of a repository in bounded
//! batches and aggregates per-author commit statistics.
//!
//! ## Features
//!
//! - Paginated commit ingestion with a hard fetch ceiling
//! - Per-author commit counts and timestamp sequences
//! - A synthetic aggregate entry spanning every commit seen
//! - Deduplication of concurrent analysis requests per repository+branch
//! - Caching of completed results with forced re-pull support
//! - A pluggable commit source, with a git2-backed implementation included
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use repostats::analysis::{AnalysisCoordinator, GitCommitSource};
//! use repostats::types::AnalysisConfig;
//!
//! # async fn run() -> Result<(), repostats::error::AnalysisError> {
//! let coordinator =
//!     AnalysisCoordinator::new(Arc::new(GitCommitSource), AnalysisConfig::default());
//!
//! let analysis = coordinator
//!     .analyze_repository("/path/to/repo", "main", false)
//!     .await?;
//! println!("total commits: {}", analysis.total_commits());
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod error;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use analysis::{AnalysisCoordinator, CommitSource, GitCommitSource};
pub use error::AnalysisError;
pub use types::{AnalysisConfig, AuthorStats, CommitRecord, RepoAnalysis, RepoKey};
