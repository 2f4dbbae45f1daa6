//! Per-domain verification: MX, SPF, DMARC, then an optional SMTP probe.

use trust_dns_resolver::Resolver;
use tracing::debug;

use crate::dns::{self, DnsLookup, LookupError, query_name, system_resolver};
use crate::outcome::VerificationOutcome;
use crate::smtp::{SmtpProbeOptions, probe_targets};

/// Anything able to turn a domain into a [`VerificationOutcome`].
///
/// Implementations never fail: every problem is recorded in the outcome.
pub trait Verify {
    fn verify(&self, domain: &str, smtp_check: bool) -> VerificationOutcome;
}

/// The real verifier, backed by a DNS resolver and the SMTP probe.
///
/// It holds no mutable state, but the synchronous resolver serializes its
/// lookups internally, so concurrent callers should each own an instance.
#[derive(Debug)]
pub struct DomainVerifier<R = Resolver> {
    resolver: R,
    options: SmtpProbeOptions,
}

impl DomainVerifier<Resolver> {
    /// Verifier using the system resolver configuration.
    pub fn from_system_conf(options: SmtpProbeOptions) -> Result<Self, LookupError> {
        Ok(Self::with_resolver(system_resolver()?, options))
    }
}

impl<R> DomainVerifier<R>
where
    R: DnsLookup,
{
    pub fn with_resolver(resolver: R, options: SmtpProbeOptions) -> Self {
        Self { resolver, options }
    }

    pub fn options(&self) -> &SmtpProbeOptions {
        &self.options
    }
}

impl<R> Verify for DomainVerifier<R>
where
    R: DnsLookup,
{
    fn verify(&self, domain: &str, smtp_check: bool) -> VerificationOutcome {
        let mut outcome = VerificationOutcome::new(domain);
        let name = query_name(domain);

        match name.as_deref() {
            Some(name) => {
                outcome.mx_hosts = dns::mx_hosts(&self.resolver, name);
                outcome.has_mx = !outcome.mx_hosts.is_empty();

                if let Some(record) = dns::spf_record(&self.resolver, name) {
                    outcome.has_spf = true;
                    outcome.spf_record = record;
                }
                if let Some(record) = dns::dmarc_record(&self.resolver, name) {
                    outcome.has_dmarc = true;
                    outcome.dmarc_record = record;
                }
            }
            None => debug!(domain, "domain cannot be turned into a DNS query name"),
        }

        if !smtp_check {
            return outcome;
        }

        // Without MX hosts the domain itself is the implicit mail server,
        // dialed under its query name (trimmed, IDNA) when it has one.
        let targets = if outcome.mx_hosts.is_empty() {
            vec![name.unwrap_or_else(|| domain.to_string())]
        } else {
            outcome.mx_hosts.clone()
        };

        match probe_targets(&targets, &self.options) {
            Ok(success) => {
                outcome.smtp_reachable = true;
                outcome.latency_ms = success.latency_ms();
            }
            Err(err) => outcome.error = err.to_string(),
        }

        outcome
    }
}
