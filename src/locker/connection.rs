//! Stream transports for the locker connection.

use crate::config::Config;
use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::debug;

/// Opens stream connections to the lock server.
pub trait Connector {
    type Stream: Read + Write;

    /// Open a new connection.
    fn connect(&self) -> io::Result<Self::Stream>;

    /// Human-readable endpoint, used in errors and logs.
    fn describe(&self) -> String;
}

/// Plain TCP transport.
#[derive(Debug, Clone)]
pub struct TcpConnector {
    host: String,
    port: u16,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
}

impl TcpConnector {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: None,
            read_timeout: None,
        }
    }

    /// Build a connector from the endpoint and transport options in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            connect_timeout: config.connect_timeout_ms.map(Duration::from_millis),
            read_timeout: config.read_timeout_ms.map(Duration::from_millis),
        }
    }

    /// Bound the time spent establishing the connection.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Bound each blocking read. An elapsed timeout surfaces as a read fault.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    fn open(&self) -> io::Result<TcpStream> {
        let Some(timeout) = self.connect_timeout else {
            return TcpStream::connect((self.host.as_str(), self.port));
        };

        let mut last_err = None;
        for addr in (self.host.as_str(), self.port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => last_err = Some(e),
            }
        }

        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("could not resolve {}", self.describe()),
            )
        }))
    }
}

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(&self) -> io::Result<TcpStream> {
        let stream = self.open()?;
        stream.set_nodelay(true)?;
        stream.set_read_timeout(self.read_timeout)?;
        debug!(addr = %self.describe(), "connected to locker");
        Ok(stream)
    }

    fn describe(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
