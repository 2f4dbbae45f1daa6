//! Lightweight SMTP reachability probe.
//!
//! The entry point is [`probe_targets`]: connect to port 25 of each target in
//! order, exchange a greeting/`EHLO`/`QUIT` handshake with the first one that
//! answers, and report how long it took.

mod error;
mod options;
mod probe;
mod session;

pub use error::SmtpProbeError;
pub use options::SmtpProbeOptions;
pub use probe::{ProbeSuccess, probe_targets};

#[cfg(test)]
pub(crate) use probe::tests as mock;
