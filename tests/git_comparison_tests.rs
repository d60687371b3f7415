use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use git2::{Repository, Signature};
use tempfile::TempDir;

use repostats::analysis::{AnalysisCoordinator, GitCommitSource};
use repostats::types::AnalysisConfig;

fn run_git_command(repo_path: &Path, args: &[&str]) -> String {
    Command::new("git")
        .current_dir(repo_path)
        .args(args)
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).to_string())
        .unwrap_or_default()
}

fn get_git_commit_count(repo_path: &Path) -> usize {
    let output = run_git_command(repo_path, &["rev-list", "--count", "HEAD"]);
    output.trim().parse().unwrap_or(0)
}

fn get_git_author_counts(repo_path: &Path) -> HashMap<String, usize> {
    let output = run_git_command(repo_path, &["log", "--format=%an:%ae"]);
    let mut counts = HashMap::new();
    for line in output.lines() {
        if !line.is_empty() {
            *counts.entry(line.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

fn setup_test_repo() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().unwrap();
    let repo = Repository::init(temp_dir.path()).unwrap();

    let signature = Signature::now("Test User", "test@example.com").unwrap();
    let tree_id = {
        let mut index = repo.index().unwrap();
        index.write_tree().unwrap()
    };

    {
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            "Initial commit",
            &tree,
            &[],
        )
        .unwrap();
    }

    let other = Signature::now("Another User", "another@example.com").unwrap();
    for i in 0..10 {
        let file_name = format!("file_{}.txt", i);
        let content = format!("Content for file {}\n", i);
        fs::write(temp_dir.path().join(&file_name), content).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(&file_name)).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let parent = repo.head().unwrap().peel_to_commit().unwrap();
        let author = if i % 2 == 0 { &signature } else { &other };

        {
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(
                Some("HEAD"),
                author,
                author,
                &format!("Add {}", file_name),
                &tree,
                &[&parent],
            )
            .unwrap();
        }
    }

    (temp_dir, repo)
}

#[tokio::test]
async fn test_commit_count_accuracy() {
    let (temp_dir, _repo) = setup_test_repo();
    let repo_path = temp_dir.path();

    // Get git's count
    let git_count = get_git_commit_count(repo_path);
    assert!(git_count > 0, "fixture repository has no commits");

    // Get our count, with pages small enough to require several fetches
    let config = AnalysisConfig {
        page_size: 3,
        max_fetches: 50,
        ..AnalysisConfig::default()
    };
    let coordinator = AnalysisCoordinator::new(Arc::new(GitCommitSource), config);
    let analysis = coordinator
        .analyze_repository(repo_path.to_str().unwrap(), "main", false)
        .await
        .unwrap();

    assert_eq!(
        git_count,
        analysis.total_commits(),
        "Commit counts don't match! Git: {}, Ours: {}",
        git_count,
        analysis.total_commits()
    );
}

#[tokio::test]
async fn test_author_count_accuracy() {
    let (temp_dir, _repo) = setup_test_repo();
    let repo_path = temp_dir.path();

    let git_counts = get_git_author_counts(repo_path);
    assert!(!git_counts.is_empty(), "fixture repository has no authors");

    let coordinator =
        AnalysisCoordinator::new(Arc::new(GitCommitSource), AnalysisConfig::default());
    let analysis = coordinator
        .analyze_repository(repo_path.to_str().unwrap(), "main", false)
        .await
        .unwrap();

    for (author, git_count) in &git_counts {
        let ours = analysis
            .authors
            .get(author)
            .map(|stats| stats.commit_count)
            .unwrap_or(0);
        assert_eq!(
            *git_count, ours,
            "Counts for {} don't match! Git: {}, Ours: {}",
            author, git_count, ours
        );
    }
    assert_eq!(analysis.per_author().count(), git_counts.len());
}
