//! Ships metric samples to a graphite server over plaintext TCP.
//!
//! Records arrive as raw `key|value|timestamp` lines. Each key is stamped
//! with the local hostname and decorated with the configured prefix and
//! append strings, then the batch goes out as newline-delimited graphite
//! plaintext over a persistent connection.
//!
//! Delivery is best effort: a failed write discards the connection and
//! retries with a fresh one, up to a configured attempt budget. Once the
//! budget is exhausted the batch is dropped with an error log; `flush`
//! never fails. Callers that need to observe dropped batches can install
//! a failure hook on the sink.
//!
//! ```no_run
//! use graphite_relay::{MetricSink, SinkConfig};
//!
//! let config = SinkConfig::default()
//!     .host("graphite.example.com")
//!     .prefix("statsite");
//!
//! let mut sink = MetricSink::new(config)?;
//! sink.flush(vec!["app.requests|42|1564527600"]);
//! sink.close();
//! # Ok::<(), graphite_relay::Error>(())
//! ```

#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications
)]

pub mod config;
pub mod error;
pub mod format;
pub mod name;
pub mod record;
pub mod sink;
pub mod socket;

pub use crate::config::SinkConfig;
pub use crate::error::{DeliveryError, Error, ParseError, Result};
pub use crate::record::MetricRecord;
pub use crate::sink::MetricSink;
pub use crate::socket::{RetrySocket, Transport};
