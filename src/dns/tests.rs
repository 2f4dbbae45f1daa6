use std::collections::HashMap;

use trust_dns_resolver::error::ResolveError;

use super::{DnsLookup, LookupError, dmarc_record, mx_hosts, query_name, records, spf_record};

/// In-memory resolver. Names without an entry fail like an NXDOMAIN would.
#[derive(Debug, Clone, Default)]
pub(crate) struct StubResolver {
    mx: HashMap<String, Vec<String>>,
    txt: HashMap<String, Vec<String>>,
}

impl StubResolver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_mx<I, S>(mut self, name: &str, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mx
            .insert(name.to_string(), hosts.into_iter().map(Into::into).collect());
        self
    }

    pub(crate) fn with_txt<I, S>(mut self, name: &str, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.txt
            .insert(name.to_string(), records.into_iter().map(Into::into).collect());
        self
    }
}

fn missing(record: &'static str, name: &str) -> LookupError {
    LookupError::query(record, name, ResolveError::from("stub: no such name"))
}

impl DnsLookup for StubResolver {
    fn lookup_mx(&self, name: &str) -> Result<Vec<String>, LookupError> {
        self.mx.get(name).cloned().ok_or_else(|| missing("MX", name))
    }

    fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        self.txt.get(name).cloned().ok_or_else(|| missing("TXT", name))
    }
}

#[test]
fn mx_hosts_keep_resolver_order_and_strip_root_dot() {
    let stub = StubResolver::new().with_mx(
        "example.com",
        ["mx2.example.com.", "mx1.example.com.", "Backup.Example.net"],
    );
    let hosts = mx_hosts(&stub, "example.com");
    assert_eq!(
        hosts,
        ["mx2.example.com", "mx1.example.com", "Backup.Example.net"]
    );
}

#[test]
fn mx_lookup_failure_yields_no_hosts() {
    let stub = StubResolver::new();
    assert!(mx_hosts(&stub, "example.com").is_empty());
}

#[test]
fn null_mx_is_skipped() {
    let stub = StubResolver::new().with_mx("example.com", ["."]);
    assert!(mx_hosts(&stub, "example.com").is_empty());
}

#[test]
fn spf_first_match_wins() {
    let stub = StubResolver::new().with_txt(
        "example.com",
        [
            "google-site-verification=abc",
            "v=spf1 include:_spf.example.com ~all",
            "v=spf1 -all",
        ],
    );
    assert_eq!(
        spf_record(&stub, "example.com").as_deref(),
        Some("v=spf1 include:_spf.example.com ~all")
    );
}

#[test]
fn spf_absent_without_prefixed_record() {
    let stub = StubResolver::new().with_txt("example.com", ["other=1", "spf1 ~all"]);
    assert_eq!(spf_record(&stub, "example.com"), None);
}

#[test]
fn spf_prefix_is_case_sensitive() {
    let stub = StubResolver::new().with_txt("example.com", ["V=SPF1 -all"]);
    assert_eq!(spf_record(&stub, "example.com"), None);
}

#[test]
fn dmarc_is_read_from_underscore_subdomain() {
    let stub = StubResolver::new()
        .with_txt("example.com", ["v=DMARC1; p=reject"])
        .with_txt("_dmarc.example.com", ["junk", "v=DMARC1; p=none"]);
    assert_eq!(
        dmarc_record(&stub, "example.com").as_deref(),
        Some("v=DMARC1; p=none")
    );
}

#[test]
fn dmarc_lookup_failure_is_silent() {
    let stub = StubResolver::new().with_txt("example.com", ["v=spf1 -all"]);
    assert_eq!(dmarc_record(&stub, "example.com"), None);
}

#[test]
fn first_with_prefix_returns_none_on_empty_set() {
    assert_eq!(records::first_with_prefix(&[], "v=spf1"), None);
}

#[test]
fn normalize_exchange_strips_single_dot() {
    assert_eq!(records::normalize_exchange("mx.example.com."), "mx.example.com");
    assert_eq!(records::normalize_exchange("mx.example.com"), "mx.example.com");
}

#[test]
fn query_name_handles_blank_and_unicode() {
    assert_eq!(query_name("   "), None);
    assert_eq!(query_name(" example.com ").as_deref(), Some("example.com"));
    assert_eq!(query_name("bücher.example").as_deref(), Some("xn--bcher-kva.example"));
}
