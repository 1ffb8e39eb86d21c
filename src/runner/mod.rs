//! Concurrent request dispatch: job queue, worker pool and result fan-in
//!
//! The engine is a fixed-size pool of worker tasks draining a bounded job
//! queue. Each job token stands for one request to issue; workers execute
//! requests against a shared [`RequestExecutor`] and push one [`Outcome`]
//! per job into a bounded result channel. After every worker has returned,
//! the collected outcomes are reduced into a [`Summary`].
//!
//! Coordination happens only through the job queue, the result channel
//! and the cancellation signal; workers share no mutable state.

use crate::client::RequestExecutor;
use crate::config::Config;
use crate::models::{Outcome, RequestSpec, Summary};
use crate::stats;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, trace};

/// Opaque unit of work: "issue one request". Only its count matters.
type Job = ();

/// Execute one complete load-generation run.
///
/// Fills the job queue, starts `config.concurrency` workers, waits for
/// all of them to finish (or observe cancellation), then reduces the
/// gathered outcomes. The returned summary's `total_time` is zero; the
/// caller that measured the run stamps it.
///
/// Raising `cancel` stops workers from taking new jobs; requests already
/// in flight run to completion or to their own timeout, so the summary
/// may cover fewer outcomes than `config.requests`.
pub async fn run(
    config: &Config,
    executor: Arc<dyn RequestExecutor>,
    cancel: watch::Receiver<bool>,
) -> Summary {
    let spec = Arc::new(config.spec.clone());

    // Fill the queue with one token per request before any worker starts,
    // then drop the sender: workers observe the closed, empty queue as
    // normal termination.
    let (job_tx, job_rx) = crossbeam_channel::bounded::<Job>(config.requests as usize);
    for _ in 0..config.requests {
        if job_tx.send(()).is_err() {
            break;
        }
    }
    drop(job_tx);

    // Sized so worker sends never block, even if the collector drains late.
    let (result_tx, mut result_rx) = mpsc::channel::<Outcome>(config.requests as usize);

    info!(
        requests = config.requests,
        concurrency = config.concurrency,
        "starting worker pool"
    );

    let mut workers = Vec::with_capacity(config.concurrency);
    for id in 0..config.concurrency {
        workers.push(tokio::spawn(worker_loop(
            id,
            job_rx.clone(),
            result_tx.clone(),
            executor.clone(),
            spec.clone(),
            cancel.clone(),
        )));
    }
    drop(job_rx);
    drop(result_tx);

    // All workers must have returned before the result channel is drained;
    // a late write after the drain would be lost.
    for join_result in join_all(workers).await {
        if let Err(e) = join_result {
            debug!("worker task join failed: {}", e);
        }
    }

    let mut outcomes = Vec::with_capacity(config.requests as usize);
    while let Some(outcome) = result_rx.recv().await {
        outcomes.push(outcome);
    }

    info!(collected = outcomes.len(), "worker pool finished");
    stats::collect(&outcomes)
}

/// One worker: pull a job, execute a request, record the outcome, repeat.
///
/// The cancellation signal is polled at the top of every iteration, so a
/// cancelled worker refuses new work but never aborts an in-flight
/// request. Executor failures become sentinel outcomes; they are
/// recorded, not retried, and never stop the loop.
async fn worker_loop(
    id: usize,
    jobs: crossbeam_channel::Receiver<Job>,
    results: mpsc::Sender<Outcome>,
    executor: Arc<dyn RequestExecutor>,
    spec: Arc<RequestSpec>,
    cancel: watch::Receiver<bool>,
) {
    loop {
        if *cancel.borrow() {
            trace!(worker = id, "cancellation observed, stopping");
            break;
        }

        // The queue was fully loaded before this task started and its
        // sender is gone, so any failed receive means exhaustion.
        if jobs.try_recv().is_err() {
            trace!(worker = id, "job queue exhausted");
            break;
        }

        let start = Instant::now();
        let outcome = match executor.execute(&spec).await {
            Ok(status) => Outcome::response(status, start.elapsed()),
            Err(err) => {
                debug!(worker = id, error = %err, "request failed, recording sentinel");
                Outcome::failure(start.elapsed())
            }
        };

        if results.send(outcome).await.is_err() {
            break;
        }
    }
}
