use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use gsf::config::GSFConfig;
use gsf::gsf_optimizer::GSFOptimizer;
use log::{debug, error, info};
use polyplan::io::export::export_plan;
use polyplan::io::ext_repr::{ExtPlan, ExtPlanRequest};
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinHandle;

use crate::store::{JobId, JobRecord, JobStore};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Dispatches optimization requests to the blocking thread pool.
/// At most `max_concurrent_jobs` optimizations run at the same time, the others wait in the queue.
#[derive(Clone)]
pub struct Dispatcher {
    store: JobStore,
    config: GSFConfig,
    semaphore: Arc<Semaphore>,
    finished_tx: Option<mpsc::UnboundedSender<JobRecord>>,
}

impl Dispatcher {
    pub fn new(store: JobStore, config: GSFConfig, max_concurrent_jobs: usize) -> Self {
        Self {
            store,
            config,
            semaphore: Arc::new(Semaphore::new(max_concurrent_jobs.max(1))),
            finished_tx: None,
        }
    }

    /// Every job submitted from now on sends its record over `finished_tx` once it is finished
    pub fn with_finished_channel(mut self, finished_tx: mpsc::UnboundedSender<JobRecord>) -> Self {
        self.finished_tx = Some(finished_tx);
        self
    }

    pub fn store(&self) -> &JobStore {
        &self.store
    }

    /// Queues the request and returns immediately. Must be called within a tokio runtime.
    pub fn submit(&self, request: ExtPlanRequest) -> JobId {
        self.spawn(request).0
    }

    /// Same as [`Dispatcher::submit`], also returns the handle of the task driving the job
    pub fn spawn(&self, request: ExtPlanRequest) -> (JobId, JoinHandle<()>) {
        let id = self.store.enqueue(&request.name);
        info!("[WORKER] job {id} queued ({})", request.name);

        let dispatcher = self.clone();
        let handle = tokio::spawn(async move {
            let _permit = match dispatcher.semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    dispatcher.store.fail(id, format!("dispatcher closed: {e}"));
                    dispatcher.notify_finished(id);
                    return;
                }
            };
            dispatcher.store.mark_running(id);
            info!("[WORKER] job {id} running");

            let config = dispatcher.config.clone();
            let outcome = tokio::task::spawn_blocking(move || run_job(&request, config))
                .await
                .context("optimization task panicked");

            match outcome {
                Ok(Ok(plan)) => {
                    info!(
                        "[WORKER] job {id} completed with {} structures, coverage: {:.3}%",
                        plan.structures.len(),
                        plan.coverage * 100.0
                    );
                    dispatcher.store.complete(id, plan);
                }
                Ok(Err(e)) | Err(e) => {
                    error!("[WORKER] job {id} failed: {e:#}");
                    dispatcher.store.fail(id, format!("{e:#}"));
                }
            }
            dispatcher.notify_finished(id);
        });
        (id, handle)
    }

    fn notify_finished(&self, id: JobId) {
        let (Some(tx), Some(record)) = (&self.finished_tx, self.store.get(id)) else {
            return;
        };
        if tx.send(record).is_err() {
            debug!("[WORKER] nobody listens for job {id} anymore");
        }
    }

    /// Polls the store until the job is finished. Returns `None` for unknown jobs.
    pub async fn wait(&self, id: JobId) -> Option<JobRecord> {
        loop {
            let record = self.store.get(id)?;
            if record.status.is_finished() {
                return Some(record);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

/// Runs a single optimization to completion on the current thread
pub fn run_job(request: &ExtPlanRequest, config: GSFConfig) -> Result<ExtPlan> {
    let mut optimizer = GSFOptimizer::from_request(request, config)?;
    let solution = optimizer.solve()?;
    Ok(export_plan(
        &request.name,
        &solution,
        &optimizer.layout.land.projection,
    ))
}
