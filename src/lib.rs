#![forbid(unsafe_code)]
//! mailaudit_lib: batch audit of mail posture (MX, SPF, DMARC, SMTP).

pub mod dns;
pub mod outcome;
pub mod pipeline;
pub mod smtp;
pub mod verifier;

pub use dns::{DnsLookup, LookupError};
pub use outcome::{VerificationOutcome, sort_by_domain};
pub use pipeline::{Pipeline, PipelineConfig, RateLimiter};
pub use smtp::{ProbeSuccess, SmtpProbeError, SmtpProbeOptions, probe_targets};
pub use verifier::{DomainVerifier, Verify};
