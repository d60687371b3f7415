use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use git2::Repository;
use tokio::task::spawn_blocking;

use crate::error::AnalysisError;
use crate::types::CommitRecord;

/// A paginated source of commit history.
///
/// Implementations must return an empty page (not an error) once history is
/// exhausted, and must support offsets up to `page_size * max_fetches`.
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Fetch up to `limit` commits for `branch` of `repo`, starting at `offset`
    async fn fetch_commits(
        &self,
        repo: &str,
        branch: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<CommitRecord>, AnalysisError>;
}

/// Commit source backed by local Git repositories.
///
/// The repository identifier is a filesystem path. When the requested branch
/// does not exist the walk falls back to HEAD.
pub struct GitCommitSource;

#[async_trait]
impl CommitSource for GitCommitSource {
    async fn fetch_commits(
        &self,
        repo: &str,
        branch: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<CommitRecord>, AnalysisError> {
        let path = PathBuf::from(repo);
        let repo_id = repo.to_string();
        let branch = branch.to_string();

        // git2 operations are blocking, so each page is read on the blocking pool
        spawn_blocking(move || {
            let fetch_err = |e: git2::Error| AnalysisError::fetch(&repo_id, e);

            let repository = Repository::open(&path).map_err(fetch_err)?;
            let mut revwalk = repository.revwalk().map_err(fetch_err)?;

            if let Ok(branch_ref) = repository.find_branch(&branch, git2::BranchType::Local) {
                if let Some(ref_name) = branch_ref.get().name() {
                    revwalk.push_ref(ref_name).map_err(fetch_err)?;
                } else {
                    revwalk.push_head().map_err(fetch_err)?;
                }
            } else {
                revwalk.push_head().map_err(fetch_err)?;
            }

            let mut commits = Vec::with_capacity(limit);
            for oid in revwalk.skip(offset).take(limit) {
                let oid = oid.map_err(fetch_err)?;
                let commit = repository.find_commit(oid).map_err(fetch_err)?;
                let author = commit.author();
                commits.push(CommitRecord {
                    author_name: author.name().map(str::to_string),
                    author_email: author.email().map(str::to_string),
                    timestamp: DateTime::<Utc>::from_timestamp(commit.time().seconds(), 0),
                });
            }

            Ok(commits)
        })
        .await
        .map_err(|e| AnalysisError::fetch(repo, e))?
    }
}
