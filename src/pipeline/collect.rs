use std::sync::mpsc::Receiver;

use crate::outcome::VerificationOutcome;

/// Drains outcomes in arrival order until `expected` have been received or
/// every worker has hung up. `on_outcome` runs on the collecting thread once
/// per outcome; the result channel is unbounded, so a slow observer never
/// stalls the workers.
pub(crate) fn collect<O>(
    results: Receiver<VerificationOutcome>,
    expected: usize,
    mut on_outcome: O,
) -> Vec<VerificationOutcome>
where
    O: FnMut(&VerificationOutcome),
{
    let mut collected = Vec::with_capacity(expected);
    while collected.len() < expected {
        let Ok(outcome) = results.recv() else {
            break;
        };
        on_outcome(&outcome);
        collected.push(outcome);
    }
    collected
}
