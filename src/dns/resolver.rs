use trust_dns_resolver::{
    Resolver,
    error::{ResolveError, ResolveErrorKind},
};

use super::LookupError;

/// Builds a synchronous resolver from the system configuration
/// (`/etc/resolv.conf` or the platform equivalent).
pub fn system_resolver() -> Result<Resolver, LookupError> {
    Resolver::from_system_conf().map_err(LookupError::resolver_init)
}

/// ASCII form of `domain` suitable for a DNS query, or `None` when the input
/// is blank or cannot be converted through IDNA.
pub fn query_name(domain: &str) -> Option<String> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return None;
    }
    idna::domain_to_ascii(trimmed).ok()
}

pub(crate) fn fqdn(label: &str, domain: &str) -> String {
    format!("{label}.{domain}")
}

/// Minimal DNS surface needed by the verifier.
///
/// Records are returned in the order the resolver produced them; callers rely
/// on that order and never re-sort.
pub trait DnsLookup {
    /// Raw exchange names, trailing root dot included when the resolver
    /// reports one.
    fn lookup_mx(&self, name: &str) -> Result<Vec<String>, LookupError>;

    /// TXT records, each one the concatenation of its character strings.
    fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError>;
}

impl DnsLookup for Resolver {
    fn lookup_mx(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let lookup = match Resolver::mx_lookup(self, name) {
            Ok(lookup) => lookup,
            Err(err) if should_treat_as_empty(&err) => return Ok(Vec::new()),
            Err(err) => return Err(LookupError::query("MX", name, err)),
        };
        Ok(lookup.iter().map(|mx| mx.exchange().to_utf8()).collect())
    }

    fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let lookup = match Resolver::txt_lookup(self, name) {
            Ok(lookup) => lookup,
            Err(err) if should_treat_as_empty(&err) => return Ok(Vec::new()),
            Err(err) => return Err(LookupError::query("TXT", name, err)),
        };
        let mut records = Vec::new();
        for txt in lookup.iter() {
            let mut record = String::new();
            for piece in txt.txt_data().iter() {
                record.push_str(&String::from_utf8_lossy(piece));
            }
            records.push(record);
        }
        Ok(records)
    }
}

fn should_treat_as_empty(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}
