use chrono::{DateTime, Timelike, Utc};
use log::warn;

use crate::types::{AuthorStats, CommitRecord, RepoAnalysis, AGGREGATE_KEY};

/// Fold one page of commits into the running analysis.
///
/// Returns `true` when the batch was empty, which callers treat as the
/// end-of-history signal. For each commit the author entry (keyed by
/// `name:email`) and the synthetic aggregate entry both receive the
/// timestamp and a count increment. Records missing author or timestamp
/// data are skipped rather than failing the page.
pub fn merge_batch(analysis: &mut RepoAnalysis, commits: &[CommitRecord]) -> bool {
    if commits.is_empty() {
        return true;
    }

    for commit in commits {
        let (Some(name), Some(email), Some(time)) = (
            &commit.author_name,
            &commit.author_email,
            commit.timestamp,
        ) else {
            warn!("skipping commit with missing author or timestamp");
            continue;
        };

        let entry = analysis
            .authors
            .entry(format!("{}:{}", name, email))
            .or_insert_with(|| AuthorStats::new(name, email));
        entry.commit_times.push(time);
        entry.commit_count += 1;

        if let Some(aggregate) = analysis.authors.get_mut(AGGREGATE_KEY) {
            aggregate.commit_times.push(time);
            aggregate.commit_count += 1;
        }
    }

    false
}

/// Bucket commit timestamps by hour of day.
///
/// With 24 bins each bucket covers one hour; other bin counts divide the
/// day evenly.
pub fn commit_hour_histogram(times: &[DateTime<Utc>], bins: usize) -> Vec<usize> {
    if bins == 0 {
        return Vec::new();
    }

    let mut histogram = vec![0usize; bins];
    for time in times {
        let bin = (time.hour() as usize * bins / 24).min(bins - 1);
        histogram[bin] += 1;
    }
    histogram
}
