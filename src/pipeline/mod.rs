//! Concurrent batch verification.
//!
//! ```text
//! domains -> dispatcher -> work queue -> workers (rate limiter, verifier)
//!         -> result channel -> collector -> sorted outcomes
//! ```
//!
//! Workers are plain OS threads. The only shared state is the two channels
//! and the rate limiter's next-slot timestamp.

mod collect;
mod config;
mod pool;
mod rate;

pub use config::PipelineConfig;
pub use rate::RateLimiter;

use std::sync::{Mutex, mpsc};
use std::thread;
use std::time::Instant;

use tracing::info;

use crate::outcome::{VerificationOutcome, sort_by_domain};
use crate::verifier::Verify;

/// A configured batch runner.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    limiter: Option<RateLimiter>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let limiter = RateLimiter::per_second(config.rate_per_second);
        Self { config, limiter }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Verifies every domain and returns one outcome per input, sorted by
    /// domain. Duplicates are verified independently and all reported.
    ///
    /// `build` is called once per worker, before any thread starts, so each
    /// worker owns its verifier; the first error aborts the run with no
    /// outcome produced. `on_outcome` is invoked on the calling thread as
    /// each outcome arrives, in completion order.
    pub fn run<V, E, B, O>(
        &self,
        domains: Vec<String>,
        mut build: B,
        on_outcome: O,
    ) -> Result<Vec<VerificationOutcome>, E>
    where
        V: Verify + Send,
        B: FnMut() -> Result<V, E>,
        O: FnMut(&VerificationOutcome),
    {
        let total = domains.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let workers = self.config.workers().min(total);
        let verifiers = (0..workers)
            .map(|_| build())
            .collect::<Result<Vec<V>, E>>()?;

        info!(
            domains = total,
            workers,
            rate = self.config.rate_per_second,
            smtp = self.config.smtp_check,
            "verification started"
        );
        let started = Instant::now();

        let (queue_tx, queue_rx) = mpsc::sync_channel::<String>(0);
        let queue_rx = Mutex::new(queue_rx);
        let queue = &queue_rx;
        let (result_tx, result_rx) = mpsc::channel();
        let limiter = self.limiter.as_ref();
        let smtp_check = self.config.smtp_check;

        let mut outcomes = thread::scope(|scope| {
            for (worker, verifier) in verifiers.into_iter().enumerate() {
                let results = result_tx.clone();
                scope.spawn(move || {
                    pool::work(worker, verifier, queue, limiter, smtp_check, results)
                });
            }
            drop(result_tx);

            scope.spawn(move || pool::dispatch(domains, queue_tx));

            collect::collect(result_rx, total, on_outcome)
        });

        sort_by_domain(&mut outcomes);
        info!(
            outcomes = outcomes.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "verification finished"
        );
        Ok(outcomes)
    }
}
