use std::borrow::Cow;
use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_HELO_IDENTITY: &str = "example.com";

/// Configuration knobs for the SMTP reachability probe.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpProbeOptions {
    pub port: u16,
    pub helo_identity: String,
    pub connect_timeout_ms: u64,
    pub exchange_timeout_ms: u64,
}

impl Default for SmtpProbeOptions {
    fn default() -> Self {
        Self {
            port: 25,
            helo_identity: DEFAULT_HELO_IDENTITY.to_string(),
            connect_timeout_ms: 6_000,
            exchange_timeout_ms: 6_000,
        }
    }
}

impl SmtpProbeOptions {
    /// Budget for establishing the TCP connection, across every address the
    /// target resolves to. Never zero.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms.max(1))
    }

    /// Budget for the whole exchange after connecting: greeting, EHLO and the
    /// multi-line reply. Never zero.
    pub fn exchange_timeout(&self) -> Duration {
        Duration::from_millis(self.exchange_timeout_ms.max(1))
    }

    pub fn helo_name(&self) -> Cow<'_, str> {
        if self.helo_identity.trim().is_empty() {
            Cow::Borrowed(DEFAULT_HELO_IDENTITY)
        } else {
            Cow::Borrowed(self.helo_identity.as_str())
        }
    }
}
