pub(crate) const SPF_PREFIX: &str = "v=spf1";
pub(crate) const DMARC_PREFIX: &str = "v=DMARC1";

/// First record (in input order) that starts with `prefix`. Matching is exact
/// and case-sensitive; the scan stops at the first hit.
pub(crate) fn first_with_prefix<'a>(records: &'a [String], prefix: &str) -> Option<&'a str> {
    for record in records {
        if record.starts_with(prefix) {
            return Some(record.as_str());
        }
    }
    None
}

/// Strips a single trailing root-zone dot. Case is preserved.
pub(crate) fn normalize_exchange(exchange: &str) -> &str {
    exchange.strip_suffix('.').unwrap_or(exchange)
}
