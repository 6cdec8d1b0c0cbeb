//! Batch delivery of metric records to graphite.

use std::io;

use log::{debug, error, info, warn};

use crate::config::SinkConfig;
use crate::error::{self, DeliveryError, Error};
use crate::format::LineTemplate;
use crate::record::MetricRecord;
use crate::socket::{RetrySocket, Transport};

/// Invoked with the exhausted-attempts error when a batch is dropped.
pub type FailureHook = Box<dyn FnMut(&DeliveryError) + Send>;

/// Formats metric records and ships them over a persistent connection.
///
/// Delivery is best effort: `flush` retries up to the configured attempt
/// budget, then logs the failure and drops the batch. It never fails to
/// the caller. Install a [failure hook](MetricSink::on_failure) to observe
/// dropped batches programmatically.
///
/// A sink owns its connection exclusively; `flush` takes `&mut self` and
/// is not meant to be shared between workers. Give each worker its own
/// sink, or serialize access externally.
pub struct MetricSink<T: Transport = RetrySocket> {
    template: LineTemplate,
    attempts: usize,
    transport: T,
    failure_hook: Option<FailureHook>,
}

impl MetricSink<RetrySocket> {
    /// Open a sink to the configured graphite server.
    ///
    /// Validates the configuration, resolves the local hostname once and
    /// caches it for the sink's lifetime, then eagerly connects. A failed
    /// first connection is not retried and leaves the sink unbuilt.
    pub fn new(config: SinkConfig) -> error::Result<Self> {
        config.validate()?;
        let socket = RetrySocket::new(
            (config.host.as_str(), config.port),
            config.connect_timeout,
            config.write_timeout,
        )
        .map_err(Error::Connection)?;
        Self::with_transport(config, socket)
    }
}

impl<T: Transport> MetricSink<T> {
    /// Assemble a sink over a caller-provided transport.
    pub fn with_transport(config: SinkConfig, mut transport: T) -> error::Result<Self> {
        config.validate()?;
        let host_segment = match config.host_segment {
            Some(segment) => segment,
            None => local_hostname()?,
        };
        transport.connect().map_err(Error::Connection)?;
        Ok(MetricSink {
            template: LineTemplate::new(host_segment, config.prefix, config.append),
            attempts: config.attempts,
            transport,
            failure_hook: None,
        })
    }

    /// Install a callback observing abandoned deliveries.
    pub fn on_failure<F>(&mut self, hook: F)
    where
        F: FnMut(&DeliveryError) + Send + 'static,
    {
        self.failure_hook = Some(Box::new(hook));
    }

    /// Format and deliver a batch of raw `key|value|timestamp` records.
    ///
    /// Blank lines are ignored; malformed lines are skipped with a log
    /// entry and never abort the rest of the batch. An empty batch
    /// performs no socket writes at all. Delivery errors are logged and
    /// swallowed.
    pub fn flush<I>(&mut self, records: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut payload = String::new();
        let mut count = 0usize;
        for raw in records {
            let raw = raw.as_ref();
            if raw.is_empty() {
                continue;
            }
            match MetricRecord::parse(raw) {
                Ok(record) => {
                    payload.push_str(&self.template.line(&record));
                    payload.push('\n');
                    count += 1;
                }
                Err(err) => warn!("Skipping record: {}", err),
            }
        }
        if count == 0 {
            return;
        }
        info!("Outputting {} metrics", count);

        if let Err(err) = self.deliver(payload.as_bytes()) {
            error!("Failed to write out the metrics: {}", err);
            if let Some(hook) = self.failure_hook.as_mut() {
                hook(&err);
            }
        }
    }

    /// Release the connection. The next `flush` reconnects transparently.
    pub fn close(&mut self) {
        self.transport.disconnect();
    }

    /// Push the payload, replacing the connection and retrying on error.
    ///
    /// Each attempt resends the whole payload from the start; a receiver
    /// may observe bytes of a failed attempt again on the next one. A
    /// failed reconnect consumes an attempt like a failed send does.
    fn deliver(&mut self, payload: &[u8]) -> Result<(), DeliveryError> {
        let mut last_error = None;
        for attempt in 1..=self.attempts {
            match self.transport.send(payload) {
                Ok(()) => {
                    debug!("Sent {} bytes to graphite", payload.len());
                    return Ok(());
                }
                Err(err) => {
                    warn!(
                        "Error while flushing to graphite, reattempting ({}/{}): {}",
                        attempt, self.attempts, err
                    );
                    self.transport.disconnect();
                    last_error = Some(err);
                }
            }
        }
        Err(DeliveryError {
            attempts: self.attempts,
            source: last_error.unwrap_or_else(|| io::Error::from(io::ErrorKind::NotConnected)),
        })
    }
}

fn local_hostname() -> error::Result<String> {
    let name = hostname::get().map_err(Error::Hostname)?;
    Ok(name.to_string_lossy().into_owned())
}
