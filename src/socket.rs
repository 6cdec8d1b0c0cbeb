//! TCP connection handling with wholesale replacement on failure.

use std::fmt;
use std::io::{self, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::{debug, info};

/// The wire half of a sink.
///
/// One whole payload per `send`; implementations reconnect as needed and
/// never leave a dead connection behind after an error.
pub trait Transport {
    /// Establish the connection if there is none.
    fn connect(&mut self) -> io::Result<()>;

    /// Deliver one whole payload, connecting first if needed.
    fn send(&mut self, payload: &[u8]) -> io::Result<()>;

    /// Drop the current connection, if any.
    fn disconnect(&mut self);
}

/// A TCP socket that is replaced wholesale when a write fails.
/// Exactly one connection is live at a time.
pub struct RetrySocket {
    addresses: Vec<SocketAddr>,
    connect_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
    socket: Option<TcpStream>,
}

impl fmt::Debug for RetrySocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RetrySocket {{ addresses: {:?}, connected: {} }}",
            self.addresses,
            self.socket.is_some()
        )
    }
}

impl RetrySocket {
    /// Resolve the target address once. Does not connect yet.
    pub fn new<A: ToSocketAddrs>(
        addresses: A,
        connect_timeout: Option<Duration>,
        write_timeout: Option<Duration>,
    ) -> io::Result<Self> {
        let addresses: Vec<SocketAddr> = addresses.to_socket_addrs()?.collect();
        if addresses.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                "target resolved to no addresses",
            ));
        }
        Ok(RetrySocket {
            addresses,
            connect_timeout,
            write_timeout,
            socket: None,
        })
    }

    fn open(&self) -> io::Result<TcpStream> {
        let socket = match self.connect_timeout {
            Some(timeout) => Self::connect_first(&self.addresses, timeout)?,
            None => TcpStream::connect(&self.addresses[..])?,
        };
        socket.set_write_timeout(self.write_timeout)?;
        Ok(socket)
    }

    // TcpStream::connect_timeout takes a single address; try each in turn.
    fn connect_first(addresses: &[SocketAddr], timeout: Duration) -> io::Result<TcpStream> {
        let mut last_error = None;
        for address in addresses {
            match TcpStream::connect_timeout(address, timeout) {
                Ok(socket) => return Ok(socket),
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error.unwrap_or_else(|| io::Error::from(io::ErrorKind::AddrNotAvailable)))
    }
}

impl Transport for RetrySocket {
    fn connect(&mut self) -> io::Result<()> {
        if self.socket.is_none() {
            let socket = self.open()?;
            info!("Connected to {:?}", self.addresses);
            self.socket = Some(socket);
        }
        Ok(())
    }

    fn send(&mut self, payload: &[u8]) -> io::Result<()> {
        self.connect()?;
        let result = match self.socket.as_mut() {
            Some(socket) => match socket.write_all(payload) {
                Ok(()) => socket.flush(),
                Err(e) => Err(e),
            },
            None => Err(io::Error::from(io::ErrorKind::NotConnected)),
        };
        if let Err(e) = result {
            // the handle is never left dangling after an error
            self.socket = None;
            return Err(e);
        }
        Ok(())
    }

    fn disconnect(&mut self) {
        if self.socket.take().is_some() {
            debug!("Disconnected from {:?}", self.addresses);
        }
    }
}
