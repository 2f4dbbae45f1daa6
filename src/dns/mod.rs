//! DNS stages of a domain verification: MX hosts, SPF and DMARC records.
//!
//! Every stage swallows lookup failures. A failed or empty lookup simply
//! yields "nothing found"; the underlying error is only logged at `debug`.

mod error;
mod records;
mod resolver;

pub use error::LookupError;
pub use resolver::{DnsLookup, query_name, system_resolver};

use records::{DMARC_PREFIX, SPF_PREFIX, first_with_prefix, normalize_exchange};
use resolver::fqdn;
use tracing::debug;

/// MX hosts for `name` in resolver order, trailing dots stripped. Empty
/// exchange names (null MX) are skipped.
pub fn mx_hosts<R>(resolver: &R, name: &str) -> Vec<String>
where
    R: DnsLookup + ?Sized,
{
    match resolver.lookup_mx(name) {
        Ok(exchanges) => exchanges
            .iter()
            .map(|exchange| normalize_exchange(exchange))
            .filter(|host| !host.is_empty())
            .map(str::to_string)
            .collect(),
        Err(err) => {
            debug!(domain = name, error = %err, "MX lookup failed");
            Vec::new()
        }
    }
}

/// First SPF policy published at `name`.
pub fn spf_record<R>(resolver: &R, name: &str) -> Option<String>
where
    R: DnsLookup + ?Sized,
{
    first_txt_with_prefix(resolver, name, SPF_PREFIX)
}

/// First DMARC policy published at `_dmarc.<name>`.
pub fn dmarc_record<R>(resolver: &R, name: &str) -> Option<String>
where
    R: DnsLookup + ?Sized,
{
    first_txt_with_prefix(resolver, &fqdn("_dmarc", name), DMARC_PREFIX)
}

fn first_txt_with_prefix<R>(resolver: &R, name: &str, prefix: &str) -> Option<String>
where
    R: DnsLookup + ?Sized,
{
    match resolver.lookup_txt(name) {
        Ok(records) => first_with_prefix(&records, prefix).map(str::to_string),
        Err(err) => {
            debug!(record_name = name, error = %err, "TXT lookup failed");
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod tests;
