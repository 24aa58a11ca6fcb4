use crate::domain::model::{CollegeRecord, Enrichment, RecordKey};
use crate::domain::ports::Enricher;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex, Semaphore};
use tokio::task::JoinSet;

pub const DEFAULT_CONCURRENCY: usize = 4;

/// Enrichment results memoized by college name for a single run.
/// Clones share the same entries; dropping the last clone drops the cache.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentCache {
    entries: Arc<Mutex<HashMap<String, Enrichment>>>,
}

impl EnrichmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, name: &str) -> Option<Enrichment> {
        self.entries.lock().await.get(name).cloned()
    }

    pub async fn insert(&self, name: impl Into<String>, enrichment: Enrichment) {
        self.entries.lock().await.insert(name.into(), enrichment);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[derive(Debug)]
pub struct EnrichmentUpdate {
    pub key: RecordKey,
    pub outcome: Result<Enrichment>,
    pub cached: bool,
}

/// Runs an [`Enricher`] over ranked colleges with bounded concurrency.
pub struct EnrichmentDispatcher<E: Enricher> {
    enricher: Arc<E>,
    concurrency: usize,
    cache: EnrichmentCache,
}

impl<E: Enricher> EnrichmentDispatcher<E> {
    pub fn new(enricher: E, concurrency: usize, cache: EnrichmentCache) -> Self {
        Self {
            enricher: Arc::new(enricher),
            concurrency: concurrency.max(1),
            cache,
        }
    }

    pub fn cache(&self) -> &EnrichmentCache {
        &self.cache
    }

    /// Spawns one unit per college. Must be called inside a tokio runtime.
    pub fn dispatch(&self, colleges: &[CollegeRecord]) -> EnrichmentRun {
        let (sender, receiver) = mpsc::channel(colleges.len().max(1));
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        tracing::debug!(
            "Dispatching enrichment for {} colleges ({} at a time)",
            colleges.len(),
            self.concurrency
        );

        for (index, college) in colleges.iter().enumerate() {
            let key = RecordKey {
                rank: index + 1,
                name: college.name.clone(),
            };
            let college = college.clone();
            let enricher = Arc::clone(&self.enricher);
            let cache = self.cache.clone();
            let semaphore = Arc::clone(&semaphore);
            let sender = sender.clone();

            tasks.spawn(async move {
                let update = match cache.get(&college.name).await {
                    Some(hit) => EnrichmentUpdate {
                        key,
                        outcome: Ok(hit),
                        cached: true,
                    },
                    None => {
                        let Ok(_permit) = semaphore.acquire_owned().await else {
                            return;
                        };
                        let outcome = enricher.enrich(&college).await;
                        if let Ok(enrichment) = &outcome {
                            cache.insert(college.name.clone(), enrichment.clone()).await;
                        }
                        EnrichmentUpdate {
                            key,
                            outcome,
                            cached: false,
                        }
                    }
                };

                if sender.send(update).await.is_err() {
                    tracing::debug!("Enrichment receiver dropped before delivery");
                }
            });
        }

        EnrichmentRun { receiver, tasks }
    }
}

/// Handle to in-flight enrichment. Updates arrive in completion order.
/// Dropping the run aborts whatever is still outstanding.
pub struct EnrichmentRun {
    receiver: mpsc::Receiver<EnrichmentUpdate>,
    tasks: JoinSet<()>,
}

impl EnrichmentRun {
    /// Next finished unit, or `None` once every unit has reported or been cancelled.
    pub async fn next_update(&mut self) -> Option<EnrichmentUpdate> {
        self.receiver.recv().await
    }

    pub async fn collect(mut self) -> Vec<EnrichmentUpdate> {
        let mut updates = Vec::new();
        while let Some(update) = self.next_update().await {
            updates.push(update);
        }
        updates
    }

    pub fn cancel(&mut self) {
        tracing::debug!("Cancelling outstanding enrichment");
        self.tasks.abort_all();
    }
}
