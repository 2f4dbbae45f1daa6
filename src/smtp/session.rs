use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use super::SmtpProbeError;

/// Opens a TCP connection to `host:port`, trying each resolved address in
/// turn. `timeout` bounds the connect attempts as a whole, not each address.
///
/// Name resolution goes through the system resolver and cannot be
/// interrupted: its duration is charged against `timeout`, but a slow lookup
/// can still overrun it before the first connect attempt is made.
pub(crate) fn connect(
    host: &str,
    port: u16,
    timeout: Duration,
) -> Result<TcpStream, SmtpProbeError> {
    let deadline = Instant::now() + timeout;
    let addrs = (host, port)
        .to_socket_addrs()
        .map_err(|err| SmtpProbeError::resolve(host, port, err))?;

    let mut last_err = None;
    for addr in addrs {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            last_err = Some(io::Error::new(io::ErrorKind::TimedOut, "connect timed out"));
            break;
        }
        match TcpStream::connect_timeout(&addr, remaining) {
            Ok(stream) => return Ok(stream),
            Err(err) => last_err = Some(err),
        }
    }

    match last_err {
        Some(err) => Err(SmtpProbeError::connect(host, port, err)),
        None => Err(SmtpProbeError::NoAddress {
            host: host.to_string(),
            port,
        }),
    }
}

/// An established connection running under a single deadline.
pub(crate) struct ProbeSession {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
    deadline: Instant,
}

impl ProbeSession {
    pub(crate) fn start(stream: TcpStream, budget: Duration) -> io::Result<Self> {
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self {
            stream,
            reader,
            deadline: Instant::now() + budget,
        })
    }

    /// Reads one raw line, line terminator included.
    ///
    /// The read timeout is re-armed with the time left before every socket
    /// read, so a peer trickling bytes without a newline still hits the
    /// session deadline.
    pub(crate) fn read_line(&mut self) -> io::Result<Vec<u8>> {
        let mut line = Vec::new();
        loop {
            let remaining = self.remaining()?;
            self.stream.set_read_timeout(Some(remaining))?;
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if available.is_empty() {
                if line.is_empty() {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "connection closed by peer",
                    ));
                }
                return Ok(line);
            }
            match available.iter().position(|&byte| byte == b'\n') {
                Some(end) => {
                    line.extend_from_slice(&available[..=end]);
                    self.reader.consume(end + 1);
                    return Ok(line);
                }
                None => {
                    let used = available.len();
                    line.extend_from_slice(available);
                    self.reader.consume(used);
                }
            }
        }
    }

    pub(crate) fn send_command(&mut self, command: &str) -> io::Result<()> {
        let remaining = self.remaining()?;
        self.stream.set_write_timeout(Some(remaining))?;
        let mut line = command.as_bytes().to_vec();
        line.extend_from_slice(b"\r\n");
        self.stream.write_all(&line)?;
        self.stream.flush()
    }

    fn remaining(&self) -> io::Result<Duration> {
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                "SMTP exchange deadline exceeded",
            ));
        }
        Ok(remaining)
    }
}

/// A reply line continues when its fourth byte is `-`. Status codes are not
/// checked.
pub(crate) fn is_continuation(line: &[u8]) -> bool {
    line.get(3) == Some(&b'-')
}
