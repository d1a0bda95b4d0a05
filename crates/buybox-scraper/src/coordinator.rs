//! Fans identifiers out across a fixed pool of workers.
//!
//! Each worker task owns its own [`SessionProvider`] and pulls identifiers
//! from a shared queue, running one recovery loop to completion before
//! taking the next. Records flow back over a channel in completion order
//! and are re-associated by identifier.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use buybox_core::{collect_product_ids, ClassifiedRecord, ProductId};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

use crate::error::ScraperError;
use crate::recovery::resolve_one;
use crate::session::SessionProvider;
use crate::settings::ResolverConfig;

/// Entry point for batch resolution.
#[derive(Debug, Clone)]
pub struct Resolver {
    config: Arc<ResolverConfig>,
}

impl Resolver {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if the configured marketplace
    /// URL is not an absolute http(s) URL.
    pub fn new(config: ResolverConfig) -> Result<Self, ScraperError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Validates raw identifier strings and resolves the valid ones.
    ///
    /// Malformed tokens are dropped without error; the returned map holds one
    /// record per distinct valid identifier.
    pub async fn resolve_raw<I, S>(&self, raw: I) -> HashMap<ProductId, ClassifiedRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = collect_product_ids(raw);
        self.resolve_all(&ids).await
    }

    /// Resolves every identifier in `ids`.
    ///
    /// The result has exactly one entry per distinct identifier. A worker
    /// that dies mid-run cannot drop entries: anything left unresolved is
    /// recorded as needing reprocessing.
    pub async fn resolve_all(&self, ids: &[ProductId]) -> HashMap<ProductId, ClassifiedRecord> {
        let mut seen = HashSet::with_capacity(ids.len());
        let unique: Vec<ProductId> = ids
            .iter()
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect();
        if unique.is_empty() {
            return HashMap::new();
        }

        let started = Instant::now();
        let worker_count = self.config.max_workers.clamp(1, unique.len());
        tracing::info!(
            identifiers = unique.len(),
            workers = worker_count,
            "resolving batch"
        );

        let (job_tx, job_rx) = mpsc::unbounded_channel();
        for id in &unique {
            if job_tx.send(id.clone()).is_err() {
                break;
            }
        }
        drop(job_tx);
        let jobs = Arc::new(Mutex::new(job_rx));

        let (record_tx, record_rx) = mpsc::unbounded_channel();
        let mut workers = JoinSet::new();
        for worker in 0..worker_count {
            let jobs = Arc::clone(&jobs);
            let records = record_tx.clone();
            let config = Arc::clone(&self.config);
            workers.spawn(async move {
                let mut sessions = SessionProvider::new(worker, config.user_agent.clone());
                loop {
                    let next = jobs.lock().await.recv().await;
                    let Some(id) = next else {
                        break;
                    };
                    let record = resolve_one(&id, &mut sessions, &config).await;
                    if records.send(record).is_err() {
                        break;
                    }
                }
                tracing::debug!(
                    worker,
                    sessions = sessions.sessions_built(),
                    "worker finished"
                );
            });
        }
        drop(record_tx);

        let results = gather_records(unique, record_rx, workers).await;

        tracing::info!(
            identifiers = results.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "batch resolved"
        );
        results
    }
}

/// Drains worker output until every sender is gone, then joins the workers.
///
/// Identifiers in `expected` with no record (their worker panicked or was
/// cancelled) are filled in as needing reprocessing.
async fn gather_records(
    expected: Vec<ProductId>,
    mut records: mpsc::UnboundedReceiver<ClassifiedRecord>,
    mut workers: JoinSet<()>,
) -> HashMap<ProductId, ClassifiedRecord> {
    let mut results = HashMap::with_capacity(expected.len());
    while let Some(record) = records.recv().await {
        results.insert(record.id().clone(), record);
    }

    while let Some(joined) = workers.join_next().await {
        if let Err(err) = joined {
            tracing::error!(error = %err, "resolution worker failed");
        }
    }

    for id in expected {
        results.entry(id).or_insert_with_key(|id| {
            tracing::warn!(product_id = %id, "no record produced; marking for reprocessing");
            ClassifiedRecord::needs_reprocess(id.clone())
        });
    }
    results
}
