//! Errors raised while assembling or driving the sink.

use std::io;
use std::result;

use thiserror::Error;

/// Fatal failures surfaced at sink construction.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value the sink cannot operate with.
    /// Reported before any socket is opened.
    #[error("invalid configuration: {reason}")]
    Config {
        /// What was rejected and why.
        reason: String,
    },

    /// The initial connection could not be established.
    /// Not retried; the sink is unusable without it.
    #[error("could not connect to graphite: {0}")]
    Connection(#[source] io::Error),

    /// The local hostname could not be resolved.
    #[error("could not resolve local hostname: {0}")]
    Hostname(#[source] io::Error),
}

/// Result of fallible sink operations.
pub type Result<T> = result::Result<T, Error>;

/// A raw record that does not match the `key|value|timestamp` layout.
#[derive(Error, Debug)]
#[error("malformed record {raw:?}: expected 3 pipe-delimited fields, got {fields}")]
pub struct ParseError {
    /// The offending raw line, verbatim.
    pub raw: String,
    /// How many fields the line actually had.
    pub fields: usize,
}

/// A batch abandoned after exhausting the attempt budget.
#[derive(Error, Debug)]
#[error("delivery failed after {attempts} attempts")]
pub struct DeliveryError {
    /// Connect/send cycles consumed before giving up.
    pub attempts: usize,
    /// The error observed on the final attempt.
    #[source]
    pub source: io::Error,
}
