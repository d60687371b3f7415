use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, error, info};
use tokio::sync::oneshot;

use crate::error::AnalysisError;
use crate::types::{AnalysisConfig, RepoAnalysis, RepoKey};

use super::cache::ResultCache;
use super::fetch::run_fetch_loop;
use super::source::CommitSource;

/// The resolution of one analysis request.
pub type AnalysisOutcome = Result<Arc<RepoAnalysis>, AnalysisError>;

type Waiter = oneshot::Sender<AnalysisOutcome>;

/// Mutable coordinator state: the cache of completed results and the
/// registry of in-flight analyses with their queued waiters.
struct CoordinatorState {
    cache: ResultCache,
    in_flight: HashMap<RepoKey, Vec<Waiter>>,
}

/// Routes each analysis request to a cache hit, an in-flight run, or a
/// fresh fetch loop, and fans the eventual result out to every caller that
/// asked for it while the analysis was running.
///
/// At most one fetch loop is active per repository+branch at any time.
pub struct AnalysisCoordinator {
    source: Arc<dyn CommitSource>,
    config: AnalysisConfig,
    state: Arc<Mutex<CoordinatorState>>,
}

impl AnalysisCoordinator {
    /// Create a coordinator over the given commit source
    pub fn new(source: Arc<dyn CommitSource>, config: AnalysisConfig) -> Self {
        Self {
            source,
            config,
            state: Arc::new(Mutex::new(CoordinatorState {
                cache: ResultCache::new(),
                in_flight: HashMap::new(),
            })),
        }
    }

    /// Analyze a repository branch, reusing cached or in-flight work.
    ///
    /// With `force_pull` set the cache is bypassed and a successful run
    /// replaces the cached entry; an in-flight analysis for the same key is
    /// still joined rather than duplicated.
    pub async fn analyze_repository(
        &self,
        repo: &str,
        branch: &str,
        force_pull: bool,
    ) -> AnalysisOutcome {
        let key = RepoKey::new(repo, branch);
        let (tx, rx) = oneshot::channel();

        {
            // Cache lookup, in-flight check and registry insert all happen
            // under one lock acquisition; nothing awaits while it is held.
            let mut state = lock_state(&self.state);

            if !force_pull {
                if let Some(hit) = state.cache.get(&key) {
                    debug!("cache hit for {}@{}", repo, branch);
                    return Ok(hit);
                }
            }

            if let Some(waiters) = state.in_flight.get_mut(&key) {
                debug!("joining in-flight analysis for {}@{}", repo, branch);
                waiters.push(tx);
            } else {
                state.in_flight.insert(key.clone(), Vec::new());
                info!("starting analysis for {}@{}", repo, branch);
                tokio::spawn(run_analysis(
                    Arc::clone(&self.source),
                    self.config.clone(),
                    Arc::clone(&self.state),
                    key.clone(),
                    tx,
                ));
            }
        }

        match rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(AnalysisError::Disconnected(key.repo)),
        }
    }

    /// Drop every cached result
    pub fn clear_cache(&self) {
        lock_state(&self.state).cache.clear();
    }
}

/// Run one fetch loop to completion and resolve everyone waiting on it.
async fn run_analysis(
    source: Arc<dyn CommitSource>,
    config: AnalysisConfig,
    state: Arc<Mutex<CoordinatorState>>,
    key: RepoKey,
    caller: Waiter,
) {
    let outcome = run_fetch_loop(source.as_ref(), &key.repo, &key.branch, &config)
        .await
        .map(Arc::new);

    let waiters = {
        let mut state = lock_state(&state);
        if let Ok(analysis) = &outcome {
            state.cache.store(key.clone(), Arc::clone(analysis));
        }
        // Removing the registry entry and draining its queue is one atomic
        // step; the key is free for a retry the moment the lock drops.
        state.in_flight.remove(&key).unwrap_or_default()
    };

    match &outcome {
        Ok(analysis) => info!(
            "analysis for {}@{} finished with {} commits",
            key.repo,
            key.branch,
            analysis.total_commits()
        ),
        Err(e) => error!("analysis for {}@{} failed: {}", key.repo, key.branch, e),
    }

    // Queued waiters resolve in FIFO order, the original caller last
    for waiter in waiters {
        let _ = waiter.send(outcome.clone());
    }
    let _ = caller.send(outcome);
}

/// Lock the shared state, recovering the guard if a panicked task poisoned it.
fn lock_state(state: &Mutex<CoordinatorState>) -> MutexGuard<'_, CoordinatorState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
