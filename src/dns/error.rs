use thiserror::Error;

/// Errors raised while querying DNS for mail records.
///
/// The verifier treats every lookup failure as "nothing found"; the error is
/// only surfaced in logs, or as a fatal error when the resolver itself cannot
/// be built.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: std::io::Error,
    },
    #[error("{record} lookup failed for {name}: {source}")]
    Query {
        record: &'static str,
        name: String,
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
}

impl LookupError {
    pub(crate) fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit { source }
    }

    pub fn query(
        record: &'static str,
        name: impl Into<String>,
        source: trust_dns_resolver::error::ResolveError,
    ) -> Self {
        Self::Query {
            record,
            name: name.into(),
            source,
        }
    }
}
