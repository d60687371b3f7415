mod cache;
mod fetch;
pub mod coordinator;
pub mod source;

pub use cache::ResultCache;
pub use coordinator::{AnalysisCoordinator, AnalysisOutcome};
pub use source::{CommitSource, GitCommitSource};
