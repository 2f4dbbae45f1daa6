use std::sync::mpsc::{Receiver, Sender, SyncSender};
use std::sync::{Mutex, PoisonError};

use tracing::trace;

use super::RateLimiter;
use crate::outcome::VerificationOutcome;
use crate::verifier::Verify;

/// Feeds every domain into the work queue, then closes it by dropping the
/// sender. Blocks while no worker is ready to take the next domain.
pub(crate) fn dispatch(domains: Vec<String>, queue: SyncSender<String>) {
    for domain in domains {
        if queue.send(domain).is_err() {
            break;
        }
    }
}

/// Worker loop: one domain at a time until the queue is closed and drained.
pub(crate) fn work<V>(
    worker: usize,
    verifier: V,
    queue: &Mutex<Receiver<String>>,
    limiter: Option<&RateLimiter>,
    smtp_check: bool,
    results: Sender<VerificationOutcome>,
) where
    V: Verify,
{
    loop {
        let next = {
            let receiver = queue.lock().unwrap_or_else(PoisonError::into_inner);
            receiver.recv()
        };
        let Ok(domain) = next else {
            break;
        };

        if let Some(limiter) = limiter {
            limiter.admit();
        }

        trace!(worker, domain = %domain, "verifying");
        let outcome = verifier.verify(&domain, smtp_check);
        if results.send(outcome).is_err() {
            break;
        }
    }
    trace!(worker, "worker done");
}
