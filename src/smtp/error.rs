use std::io;

use thiserror::Error;

/// Failure to reach a probe target. The display form is what ends up in the
/// outcome's `error` field when every target fails.
#[derive(Debug, Error)]
pub enum SmtpProbeError {
    #[error("no SMTP target to probe")]
    NoTargets,
    #[error("cannot resolve {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    #[error("no address found for {host}:{port}")]
    NoAddress { host: String, port: u16 },
    #[error("connection to {host}:{port} failed: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
}

impl SmtpProbeError {
    pub(crate) fn resolve(host: &str, port: u16, source: io::Error) -> Self {
        Self::Resolve {
            host: host.to_string(),
            port,
            source,
        }
    }

    pub(crate) fn connect(host: &str, port: u16, source: io::Error) -> Self {
        Self::Connect {
            host: host.to_string(),
            port,
            source,
        }
    }
}
