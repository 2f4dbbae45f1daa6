use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::session::{ProbeSession, connect, is_continuation};
use super::{SmtpProbeError, SmtpProbeOptions};

/// First target that accepted a TCP connection and the time it took to run
/// the handshake against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSuccess {
    pub host: String,
    pub latency: Duration,
}

impl ProbeSuccess {
    pub fn latency_ms(&self) -> u64 {
        u64::try_from(self.latency.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Tries each target in order and stops at the first one that accepts a
/// connection. Once connected the target counts as reachable whatever the
/// server answers; the dialogue is a diagnostic handshake only.
///
/// When every target fails, the error of the last attempt is returned.
pub fn probe_targets<S>(
    targets: &[S],
    options: &SmtpProbeOptions,
) -> Result<ProbeSuccess, SmtpProbeError>
where
    S: AsRef<str>,
{
    let mut last_err = None;
    for target in targets {
        let host = target.as_ref();
        let started = Instant::now();
        match connect(host, options.port, options.connect_timeout()) {
            Ok(stream) => {
                match ProbeSession::start(stream, options.exchange_timeout()) {
                    Ok(mut session) => handshake(&mut session, host, &options.helo_name()),
                    Err(err) => {
                        debug!(smtp_host = host, error = %err, "cannot set up SMTP session")
                    }
                }
                let success = ProbeSuccess {
                    host: host.to_string(),
                    latency: started.elapsed(),
                };
                debug!(
                    smtp_host = host,
                    latency_ms = success.latency_ms(),
                    "SMTP target reachable"
                );
                return Ok(success);
            }
            Err(err) => {
                debug!(smtp_host = host, error = %err, "SMTP target unreachable");
                last_err = Some(err);
            }
        }
    }
    Err(last_err.unwrap_or(SmtpProbeError::NoTargets))
}

/// Greeting, `EHLO`, multi-line reply, `QUIT`. Every I/O failure just ends
/// the dialogue early; the connection is closed when the session drops.
fn handshake(session: &mut ProbeSession, host: &str, helo: &str) {
    if let Ok(greeting) = session.read_line() {
        trace!(smtp_host = host, line = %String::from_utf8_lossy(&greeting).trim_end(), "S");
    }

    let ehlo = format!("EHLO {helo}");
    if let Err(err) = session.send_command(&ehlo) {
        debug!(smtp_host = host, error = %err, "EHLO not sent");
    }

    loop {
        match session.read_line() {
            Ok(line) => {
                trace!(smtp_host = host, line = %String::from_utf8_lossy(&line).trim_end(), "S");
                if !is_continuation(&line) {
                    break;
                }
            }
            Err(err) => {
                debug!(smtp_host = host, error = %err, "EHLO reply interrupted");
                break;
            }
        }
    }

    session.send_command("QUIT").ok();
}
