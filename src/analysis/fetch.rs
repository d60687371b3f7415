use log::{debug, warn};

use crate::error::AnalysisError;
use crate::types::{AnalysisConfig, RepoAnalysis};
use crate::utils::aggregation::merge_batch;

use super::source::CommitSource;

/// Drive the paginated fetch loop for one repository analysis.
///
/// Pages are requested in increasing offset order and folded into a single
/// accumulator that carries across iterations. The loop ends on the first
/// empty page, or at the configured fetch ceiling to bound worst-case work
/// against runaway histories.
pub(crate) async fn run_fetch_loop(
    source: &dyn CommitSource,
    repo: &str,
    branch: &str,
    config: &AnalysisConfig,
) -> Result<RepoAnalysis, AnalysisError> {
    let mut analysis = RepoAnalysis::new();
    let mut page = 0;

    while page < config.max_fetches {
        let offset = page * config.page_size;
        let commits = source
            .fetch_commits(repo, branch, config.page_size, offset)
            .await
            .map_err(|e| {
                warn!("fetch failed for {} at offset {}: {}", repo, offset, e);
                e
            })?;

        debug!("fetched page {} for {} ({} commits)", page, repo, commits.len());

        if merge_batch(&mut analysis, &commits) {
            return Ok(analysis);
        }
        // The counter only advances once a page has been merged
        page += 1;
    }

    warn!(
        "fetch ceiling of {} pages reached for {}; returning partial history",
        config.max_fetches, repo
    );
    Ok(analysis)
}
