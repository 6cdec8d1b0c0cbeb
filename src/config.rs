//! Sink configuration.

use std::time::Duration;

use crate::error::{self, Error};

/// Where and how metrics are shipped.
///
/// Frozen once the sink is constructed. Setters consume and return the
/// config so targets can be assembled in one expression.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Graphite server hostname.
    pub host: String,
    /// Graphite plaintext port. Zero is rejected.
    pub port: u16,
    /// Namespace prepended to every key, if any.
    pub prefix: Option<String>,
    /// Connect/send cycles allowed per delivery. At least 2.
    pub attempts: usize,
    /// Suffix dashed onto every key, if any.
    pub append: Option<String>,
    /// Overrides the host segment spliced into metric paths.
    /// `None` resolves the machine hostname at sink construction.
    pub host_segment: Option<String>,
    /// Bound on connection establishment. `None` leaves the OS default.
    pub connect_timeout: Option<Duration>,
    /// Bound on socket writes. `None` leaves the OS default.
    pub write_timeout: Option<Duration>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        SinkConfig {
            host: "localhost".into(),
            port: 2003,
            prefix: Some("statsite".into()),
            attempts: 3,
            append: None,
            host_segment: None,
            connect_timeout: None,
            write_timeout: None,
        }
    }
}

impl SinkConfig {
    /// Target a graphite server by hostname.
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }

    /// Target a non-default port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Prepend a namespace to every key.
    pub fn prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Ship keys without a namespace prefix.
    pub fn no_prefix(mut self) -> Self {
        self.prefix = None;
        self
    }

    /// Allow this many connect/send cycles per delivery.
    pub fn attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    /// Dash a suffix onto every key.
    pub fn append<S: Into<String>>(mut self, append: S) -> Self {
        self.append = Some(append.into());
        self
    }

    /// Splice this segment into metric paths instead of the machine hostname.
    pub fn host_segment<S: Into<String>>(mut self, segment: S) -> Self {
        self.host_segment = Some(segment.into());
        self
    }

    /// Give up on connection establishment after this long.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Give up on a socket write after this long.
    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }

    /// Reject values the sink cannot operate with.
    pub(crate) fn validate(&self) -> error::Result<()> {
        if self.port == 0 {
            return Err(Error::Config {
                reason: "port must be positive".into(),
            });
        }
        if self.attempts <= 1 {
            return Err(Error::Config {
                reason: format!("need at least 2 attempts, got {}", self.attempts),
            });
        }
        Ok(())
    }
}
