//! Reads raw metric records from stdin and relays them to graphite.
//!
//! Positional arguments: `[host] [port] [prefix] [attempts] [append]`.
//! Missing arguments take the built-in defaults; an empty prefix argument
//! clears the prefix entirely.

use std::env;
use std::io::{self, Read};
use std::process;

use graphite_relay::{MetricSink, SinkConfig};

fn config_from_args<I>(mut args: I) -> Result<SinkConfig, String>
where
    I: Iterator<Item = String>,
{
    let mut config = SinkConfig::default();
    if let Some(host) = args.next() {
        config = config.host(host);
    }
    if let Some(port) = args.next() {
        let port = port
            .parse::<u16>()
            .map_err(|e| format!("invalid port {:?}: {}", port, e))?;
        config = config.port(port);
    }
    if let Some(prefix) = args.next() {
        config = if prefix.is_empty() {
            config.no_prefix()
        } else {
            config.prefix(prefix)
        };
    }
    if let Some(attempts) = args.next() {
        let attempts = attempts
            .parse::<usize>()
            .map_err(|e| format!("invalid attempts {:?}: {}", attempts, e))?;
        config = config.attempts(attempts);
    }
    if let Some(append) = args.next() {
        config = config.append(append);
    }
    Ok(config)
}

fn main() {
    env_logger::init();

    let config = match config_from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    let mut sink = match MetricSink::new(config) {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        eprintln!("could not read stdin: {}", e);
        process::exit(1);
    }

    sink.flush(input.lines());
    sink.close();
}
