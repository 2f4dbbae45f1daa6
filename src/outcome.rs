#[cfg(feature = "with-serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Result of verifying a single domain.
///
/// Produced once by the verifier and then only moved around: the pipeline
/// collects and reorders outcomes but never edits them.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub domain: String,
    pub has_mx: bool,
    /// Encoded as `null` rather than `[]` when no host was found.
    #[cfg_attr(
        feature = "with-serde",
        serde(
            default,
            serialize_with = "empty_as_null",
            deserialize_with = "null_as_empty"
        )
    )]
    pub mx_hosts: Vec<String>,
    pub has_spf: bool,
    #[cfg_attr(
        feature = "with-serde",
        serde(default, skip_serializing_if = "String::is_empty")
    )]
    pub spf_record: String,
    pub has_dmarc: bool,
    #[cfg_attr(
        feature = "with-serde",
        serde(default, skip_serializing_if = "String::is_empty")
    )]
    pub dmarc_record: String,
    pub smtp_reachable: bool,
    #[cfg_attr(feature = "with-serde", serde(default, skip_serializing_if = "is_zero"))]
    pub latency_ms: u64,
    #[cfg_attr(
        feature = "with-serde",
        serde(default, skip_serializing_if = "String::is_empty")
    )]
    pub error: String,
}

impl VerificationOutcome {
    /// Empty outcome for `domain`: nothing found, nothing probed.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    pub fn mx_hosts_joined(&self, separator: &str) -> String {
        self.mx_hosts.join(separator)
    }
}

#[cfg(feature = "with-serde")]
fn is_zero(value: &u64) -> bool {
    *value == 0
}

#[cfg(feature = "with-serde")]
fn empty_as_null<S>(hosts: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if hosts.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.collect_seq(hosts)
    }
}

#[cfg(feature = "with-serde")]
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Orders outcomes by domain, byte-wise ascending. The sort is stable, so
/// duplicate domains keep their arrival order.
pub fn sort_by_domain(outcomes: &mut [VerificationOutcome]) {
    outcomes.sort_by(|a, b| a.domain.cmp(&b.domain));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_outcome_reports_nothing() {
        let outcome = VerificationOutcome::new("example.com");
        assert_eq!(outcome.domain, "example.com");
        assert!(!outcome.has_mx);
        assert!(outcome.mx_hosts.is_empty());
        assert!(!outcome.smtp_reachable);
        assert!(outcome.error.is_empty());
    }

    #[test]
    fn sort_is_bytewise() {
        let mut outcomes = vec![
            VerificationOutcome::new("b.example"),
            VerificationOutcome::new("B.example"),
            VerificationOutcome::new("a.example"),
        ];
        sort_by_domain(&mut outcomes);
        let domains: Vec<_> = outcomes.iter().map(|o| o.domain.as_str()).collect();
        assert_eq!(domains, ["B.example", "a.example", "b.example"]);
    }

    #[cfg(feature = "with-serde")]
    #[test]
    fn json_omits_empty_optional_fields() {
        let outcome = VerificationOutcome::new("example.com");
        let value = serde_json::to_value(&outcome).expect("serialize");
        let object = value.as_object().expect("object");
        assert!(object.contains_key("has_mx"));
        assert_eq!(object.get("mx_hosts"), Some(&serde_json::Value::Null));
        assert!(object.contains_key("smtp_reachable"));
        assert!(!object.contains_key("spf_record"));
        assert!(!object.contains_key("dmarc_record"));
        assert!(!object.contains_key("latency_ms"));
        assert!(!object.contains_key("error"));
    }

    #[cfg(feature = "with-serde")]
    #[test]
    fn mx_hosts_read_back_from_null_and_list() {
        let encoded = |hosts: &str| {
            format!(
                r#"{{"domain":"a.example","has_mx":false,"mx_hosts":{hosts},"has_spf":false,"has_dmarc":false,"smtp_reachable":false}}"#
            )
        };
        let empty: VerificationOutcome =
            serde_json::from_str(&encoded("null")).expect("null hosts");
        assert_eq!(empty, VerificationOutcome::new("a.example"));

        let listed: VerificationOutcome =
            serde_json::from_str(&encoded(r#"["mx.a.example"]"#)).expect("listed hosts");
        assert_eq!(listed.mx_hosts, ["mx.a.example"]);
    }
}
