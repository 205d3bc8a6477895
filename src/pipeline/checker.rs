//! Concurrent check orchestration
//!
//! Dispatches one probe task per unique hostname under a bounded worker
//! pool and two time bounds: the per-host timeout enforced inside the
//! prober, and a global wall-clock budget for the whole batch. Partial
//! failure never aborts the batch, and there are no retries within a run.

use crate::checks::classify::classify;
use crate::checks::probe::Probe;
use crate::models::{CheckResult, Domain};
use crate::pipeline::dedup::dedupe;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};
use tokio::time::Instant;

/// Error string recorded for hosts that did not finish before the global
/// budget expired.
pub const BATCH_TIMEOUT_ERROR: &str = "batch timeout";

/// Tunables for one batch run.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub threshold_days: i64,
    pub port: u16,
    pub per_host_timeout: Duration,
    pub global_budget: Duration,
    pub concurrency: usize,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            threshold_days: 30,
            port: 443,
            per_host_timeout: Duration::from_secs(10),
            global_budget: Duration::from_secs(300),
            concurrency: 16,
        }
    }
}

/// Orchestrates concurrent probing and classification across a domain
/// batch.
pub struct Checker {
    prober: Arc<dyn Probe>,
}

impl Checker {
    pub fn new(prober: Arc<dyn Probe>) -> Self {
        Self { prober }
    }

    /// Check every unique hostname in `domains` and return one result per
    /// hostname, in deduplicated submission order regardless of completion
    /// order.
    pub async fn run(&self, domains: Vec<Domain>, opts: &CheckOptions) -> Vec<CheckResult> {
        let unique = dedupe(domains);
        let total = unique.len();
        if total == 0 {
            return Vec::new();
        }

        tracing::debug!(
            hosts = total,
            concurrency = opts.concurrency,
            "dispatching certificate probes"
        );

        let deadline = Instant::now() + opts.global_budget;
        let semaphore = Arc::new(Semaphore::new(opts.concurrency.max(1)));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut handles = Vec::with_capacity(total);

        for (index, domain) in unique.iter().enumerate() {
            let prober = Arc::clone(&self.prober);
            let semaphore = Arc::clone(&semaphore);
            let tx = tx.clone();
            let hostname = domain.hostname.clone();
            let threshold_days = opts.threshold_days;
            let port = opts.port;
            let per_host_timeout = opts.per_host_timeout;

            handles.push(tokio::spawn(async move {
                // The semaphore is never closed while run() waits, so a
                // failed acquire only happens after abort
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return;
                };
                let outcome = prober.probe(&hostname, port, per_host_timeout).await;
                let result = classify(&hostname, outcome, threshold_days, Utc::now());
                let _ = tx.send((index, result));
            }));
        }
        drop(tx);

        // Each result lands in the slot of its submission index, so
        // concurrent completion never disturbs the output order
        let mut slots: Vec<Option<CheckResult>> = vec![None; total];
        let mut completed = 0;
        while completed < total {
            match tokio::time::timeout_at(deadline, rx.recv()).await {
                Ok(Some((index, result))) => {
                    slots[index] = Some(result);
                    completed += 1;
                }
                Ok(None) => break,
                Err(_) => {
                    tracing::warn!(
                        completed,
                        total,
                        "global budget exhausted, recording unfinished hosts as errors"
                    );
                    break;
                }
            }
        }

        // In-flight and not-yet-started tasks are detached here; aborting
        // drops their sockets before run() returns
        for handle in &handles {
            handle.abort();
        }

        // Probes that finished right at the deadline may still sit in the
        // channel; keep their real results over a timeout label
        drain_queued(&mut slots, &mut rx);

        unique
            .into_iter()
            .zip(slots)
            .map(|(domain, slot)| {
                slot.unwrap_or_else(|| CheckResult::probe_error(domain.hostname, BATCH_TIMEOUT_ERROR))
            })
            .collect()
    }
}

/// Move any still-queued results into their slots without blocking.
fn drain_queued(
    slots: &mut [Option<CheckResult>],
    rx: &mut mpsc::UnboundedReceiver<(usize, CheckResult)>,
) {
    while let Ok((index, result)) = rx.try_recv() {
        if slots[index].is_none() {
            slots[index] = Some(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CheckStatus;
    use chrono::Utc;

    #[test]
    fn queued_results_fill_their_slots_before_timeout_labeling() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let result = CheckResult {
            hostname: "edge.example".to_string(),
            expiry_time: Some(Utc::now()),
            days_left: Some(42),
            status: CheckStatus::Pass,
            error: None,
        };
        tx.send((1, result)).unwrap();
        drop(tx);

        let mut slots: Vec<Option<CheckResult>> = vec![None, None, None];
        drain_queued(&mut slots, &mut rx);

        assert!(slots[0].is_none());
        assert_eq!(
            slots[1].as_ref().map(|r| r.status),
            Some(CheckStatus::Pass)
        );
        assert!(slots[2].is_none());
    }

    #[test]
    fn draining_never_overwrites_a_received_result() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send((0, CheckResult::probe_error("late.example", "second send")))
            .unwrap();
        drop(tx);

        let mut slots = vec![Some(CheckResult::probe_error("late.example", "first send"))];
        drain_queued(&mut slots, &mut rx);

        assert_eq!(
            slots[0].as_ref().and_then(|r| r.error.as_deref()),
            Some("first send")
        );
    }
}
