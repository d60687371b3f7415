//! Repository Commit Statistics Tool
//!
//! Command-line front end: analyzes a local repository and prints
//! per-author commit statistics.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use repostats::analysis::{AnalysisCoordinator, GitCommitSource};
use repostats::types::{AnalysisConfig, RepoAnalysis};
use repostats::utils::aggregation::commit_hour_histogram;

#[derive(Parser)]
#[command(
    name = "repostats",
    version,
    about = "Aggregate per-author commit statistics for a repository"
)]
struct Args {
    /// Path to the repository to analyze
    repo: String,

    /// Branch to walk (falls back to HEAD when missing)
    #[arg(short, long, default_value = "main")]
    branch: String,

    /// Commits requested per fetch
    #[arg(long, default_value_t = 500)]
    page_size: usize,

    /// Maximum number of fetches for one analysis
    #[arg(long, default_value_t = 200)]
    max_fetches: usize,

    /// Ignore any cached result and pull fresh history
    #[arg(short, long)]
    force: bool,

    /// Print the analysis as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = AnalysisConfig {
        page_size: args.page_size,
        max_fetches: args.max_fetches,
        ..AnalysisConfig::default()
    };
    let histogram_bins = config.histogram_bins;

    let coordinator = AnalysisCoordinator::new(Arc::new(GitCommitSource), config);
    let analysis = coordinator
        .analyze_repository(&args.repo, &args.branch, args.force)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&*analysis)?);
    } else {
        print_summary(&analysis, histogram_bins);
    }

    Ok(())
}

fn print_summary(analysis: &RepoAnalysis, histogram_bins: usize) {
    let mut rows: Vec<_> = analysis.per_author().collect();
    rows.sort_by(|a, b| b.1.commit_count.cmp(&a.1.commit_count).then(a.0.cmp(b.0)));

    println!("{:<30} {:<30} {:>8}", "Author", "Email", "Commits");
    for (_, stats) in &rows {
        println!(
            "{:<30} {:<30} {:>8}",
            stats.name, stats.email, stats.commit_count
        );
    }
    println!("{:<30} {:<30} {:>8}", "total", "", analysis.total_commits());

    if let Some(aggregate) = analysis.aggregate() {
        let histogram = commit_hour_histogram(&aggregate.commit_times, histogram_bins);
        let counts: Vec<String> = histogram.iter().map(|count| count.to_string()).collect();
        println!("\nCommits by hour of day: [{}]", counts.join(", "));
    }
}
