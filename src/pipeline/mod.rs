//! Bounded concurrent fetcher
//!
//! Every work item is handed to a [`Probe`] on its own task. A semaphore
//! keeps at most `workers` probes in flight. The caller drains results in
//! completion order through [`Completions::next`], which waits the pacing
//! delay before every result after the first. Submission is eager, so the
//! pacing never holds back workers.

use async_trait::async_trait;
use futures::FutureExt;
use log::{debug, warn};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::sleep;

use crate::config::Settings;
use crate::core::types::WorkItem;

/// One network operation per work item.
///
/// Implementations report expected failures through their own output type.
/// A probe that panics degrades to a `None` result for that item only.
#[async_trait]
pub trait Probe: Send + Sync + 'static {
    type Output: Send + 'static;

    async fn probe(&self, item: &WorkItem) -> Self::Output;
}

/// Fixed-size worker pool with a pacing delay between drained results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkFetcher {
    workers: usize,
    pacing: Duration,
}

impl BulkFetcher {
    pub fn new(workers: usize, pacing: Duration) -> Self {
        Self {
            workers: workers.max(1),
            pacing,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.workers, settings.pacing)
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Submit every item at once and return the completion stream.
    ///
    /// Must be called from inside a Tokio runtime.
    pub fn run<P: Probe>(&self, probe: Arc<P>, items: Vec<WorkItem>) -> Completions<P::Output> {
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let total = items.len();
        let mut tasks = JoinSet::new();

        debug!(
            "Dispatching {total} items across {} workers",
            self.workers
        );

        for item in items {
            let probe = Arc::clone(&probe);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (item, None);
                };

                let output = AssertUnwindSafe(probe.probe(&item)).catch_unwind().await;
                if output.is_err() {
                    warn!("Probe panicked for {}", item.url);
                }
                (item, output.ok())
            });
        }

        Completions {
            tasks,
            pacing: self.pacing,
            total,
            yielded: 0,
        }
    }
}

/// Results of a [`BulkFetcher::run`] in completion order
pub struct Completions<T> {
    tasks: JoinSet<(WorkItem, Option<T>)>,
    pacing: Duration,
    total: usize,
    yielded: usize,
}

impl<T: Send + 'static> Completions<T> {
    /// Next finished item, or `None` once all items are drained. The output
    /// is `None` when the probe for that item panicked.
    pub async fn next(&mut self) -> Option<(WorkItem, Option<T>)> {
        if self.yielded > 0 && !self.pacing.is_zero() && !self.tasks.is_empty() {
            sleep(self.pacing).await;
        }

        loop {
            match self.tasks.join_next().await? {
                Ok(pair) => {
                    self.yielded += 1;
                    return Some(pair);
                }
                Err(err) => warn!("Worker task failed: {err}"),
            }
        }
    }

    /// Number of results handed out so far
    pub fn completed(&self) -> usize {
        self.yielded
    }

    /// Drain everything, ignoring the completion order
    pub async fn collect(mut self) -> Vec<(WorkItem, Option<T>)> {
        let mut results = Vec::with_capacity(self.total);
        while let Some(pair) = self.next().await {
            results.push(pair);
        }
        results
    }
}
