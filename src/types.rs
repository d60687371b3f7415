//! # Common Types
//!
//! This module contains the common types used throughout the crate for
//! representing commit records, per-author statistics, and analysis
//! configuration.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key under which the synthetic whole-repository aggregate entry is stored.
pub const AGGREGATE_KEY: &str = "all:commits";

/// A key identifying one repository+branch combination.
///
/// This struct is used as the key for both the result cache and the
/// in-flight registry, so it must be stable and unique per logical
/// repository for request deduplication to be correct.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct RepoKey {
    /// Repository identifier (a local path or `owner:repo`-style string)
    pub repo: String,
    /// The name of the Git branch
    pub branch: String,
}

impl RepoKey {
    pub fn new(repo: &str, branch: &str) -> Self {
        Self {
            repo: repo.to_string(),
            branch: branch.to_string(),
        }
    }
}

/// A raw commit record as returned by a commit source.
///
/// Fields are optional because a source may hand back commits with missing
/// or non-UTF-8 author data; such records are skipped during aggregation.
#[derive(Clone, Debug)]
pub struct CommitRecord {
    /// Author name, if present and valid UTF-8
    pub author_name: Option<String>,
    /// Author email, if present and valid UTF-8
    pub author_email: Option<String>,
    /// Commit timestamp
    pub timestamp: Option<DateTime<Utc>>,
}

impl CommitRecord {
    /// Build a fully-populated record
    pub fn new(name: &str, email: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            author_name: Some(name.to_string()),
            author_email: Some(email.to_string()),
            timestamp: Some(timestamp),
        }
    }
}

/// Running commit statistics for a single author.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthorStats {
    /// Author name
    pub name: String,
    /// Author email
    pub email: String,
    /// Number of commits seen so far
    pub commit_count: usize,
    /// Commit timestamps in discovery order. Pages may arrive in any
    /// server-determined order, so this is not necessarily chronological.
    pub commit_times: Vec<DateTime<Utc>>,
}

impl AuthorStats {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            commit_count: 0,
            commit_times: Vec::new(),
        }
    }
}

/// The result of analyzing a repository's commit history.
///
/// Maps a derived `name:email` author key to that author's statistics. The
/// synthetic [`AGGREGATE_KEY`] entry spans every commit seen for the
/// repository: its count equals the sum of all per-author counts and its
/// timestamp sequence is the arrival-order concatenation of all per-author
/// sequences.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RepoAnalysis {
    /// Per-author statistics, plus the synthetic aggregate entry
    pub authors: HashMap<String, AuthorStats>,
}

impl RepoAnalysis {
    /// Create an empty analysis with the aggregate entry in place
    pub fn new() -> Self {
        let mut authors = HashMap::new();
        authors.insert(AGGREGATE_KEY.to_string(), AuthorStats::new("all", "commits"));
        Self { authors }
    }

    /// The synthetic entry spanning every commit seen for the repository
    pub fn aggregate(&self) -> Option<&AuthorStats> {
        self.authors.get(AGGREGATE_KEY)
    }

    /// Total number of commits seen across every author
    pub fn total_commits(&self) -> usize {
        self.aggregate().map_or(0, |stats| stats.commit_count)
    }

    /// Iterate the per-author entries, excluding the synthetic aggregate
    pub fn per_author(&self) -> impl Iterator<Item = (&str, &AuthorStats)> {
        self.authors
            .iter()
            .filter(|(key, _)| key.as_str() != AGGREGATE_KEY)
            .map(|(key, stats)| (key.as_str(), stats))
    }
}

impl Default for RepoAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

/// Runtime configuration for the analysis pipeline.
///
/// Defaults match the historical constants: 500 commits per fetch, at most
/// 200 fetches per analysis, 24 histogram buckets.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of commits requested per fetch
    pub page_size: usize,
    /// Maximum number of fetches for one analysis run
    pub max_fetches: usize,
    /// Number of buckets used by the hour-of-day histogram
    pub histogram_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            page_size: 500,
            max_fetches: 200,
            histogram_bins: 24,
        }
    }
}
