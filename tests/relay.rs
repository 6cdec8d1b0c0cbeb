//! End-to-end delivery against a loopback graphite server.

use std::io::Read;
use std::net::TcpListener;
use std::thread;

use graphite_relay::{Error, MetricSink, SinkConfig};

fn local_server() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let port = listener.local_addr().expect("local addr").port();
    (listener, port)
}

#[test]
fn delivers_one_batch() {
    let (listener, port) = local_server();
    let reader = thread::spawn(move || {
        let (mut conn, _) = listener.accept().expect("accept");
        let mut payload = String::new();
        conn.read_to_string(&mut payload).expect("read payload");
        payload
    });

    let config = SinkConfig::default()
        .host("127.0.0.1")
        .port(port)
        .host_segment("h1")
        .append("prod");
    let mut sink = MetricSink::new(config).expect("open sink");
    sink.flush(vec!["app.requests|42|1000", "", "app.errors|7|1000"]);
    sink.close();

    assert_eq!(
        reader.join().expect("reader thread"),
        "statsite.app.h1.requests-prod 42 1000\nstatsite.app.h1.errors-prod 7 1000\n"
    );
}

#[test]
fn reconnects_after_close() {
    let (listener, port) = local_server();
    let reader = thread::spawn(move || {
        let mut payloads = Vec::new();
        for _ in 0..2 {
            let (mut conn, _) = listener.accept().expect("accept");
            let mut payload = String::new();
            conn.read_to_string(&mut payload).expect("read payload");
            payloads.push(payload);
        }
        payloads
    });

    let config = SinkConfig::default()
        .host("127.0.0.1")
        .port(port)
        .no_prefix()
        .host_segment("h1");
    let mut sink = MetricSink::new(config).expect("open sink");
    sink.flush(vec!["first|1|1000"]);
    sink.close();
    // a closed sink must come back on its own for the next batch
    sink.flush(vec!["second|2|2000"]);
    sink.close();

    assert_eq!(
        reader.join().expect("reader thread"),
        vec!["h1.first 1 1000\n", "h1.second 2 2000\n"]
    );
}

#[test]
fn empty_flush_sends_nothing() {
    let (listener, port) = local_server();
    let reader = thread::spawn(move || {
        let (mut conn, _) = listener.accept().expect("accept");
        let mut payload = Vec::new();
        conn.read_to_end(&mut payload).expect("read payload");
        payload
    });

    let config = SinkConfig::default()
        .host("127.0.0.1")
        .port(port)
        .host_segment("h1");
    let mut sink = MetricSink::new(config).expect("open sink");
    sink.flush(Vec::<&str>::new());
    sink.close();

    assert!(reader.join().expect("reader thread").is_empty());
}

#[test]
fn rejects_bad_config_without_a_server() {
    // no listener anywhere near these configs; validation fires first
    let config = SinkConfig::default().port(0).host_segment("h1");
    assert!(matches!(MetricSink::new(config), Err(Error::Config { .. })));

    let config = SinkConfig::default().attempts(1).host_segment("h1");
    assert!(matches!(MetricSink::new(config), Err(Error::Config { .. })));
}

#[test]
fn unreachable_server_fails_construction() {
    // grab a loopback port, then free it so nothing is listening there
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        listener.local_addr().expect("local addr").port()
    };

    let config = SinkConfig::default()
        .host("127.0.0.1")
        .port(port)
        .host_segment("h1");
    assert!(matches!(
        MetricSink::new(config),
        Err(Error::Connection(_))
    ));
}
