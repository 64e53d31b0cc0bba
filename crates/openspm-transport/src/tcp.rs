use std::io::ErrorKind;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::time::Duration;

use tracing::{debug, info};

use crate::addr::ControllerAddr;
use crate::error::{Result, TransportError};
use crate::traits::Connector;

/// Default timeout for establishing a controller connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default timeout for writing one command.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

/// Socket-level settings for controller connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Connect timeout; `None` blocks until the OS gives up.
    pub connect_timeout: Option<Duration>,
    /// Write timeout; `None` blocks indefinitely.
    pub write_timeout: Option<Duration>,
    /// Disable Nagle so the small command frame leaves immediately.
    pub nodelay: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            write_timeout: Some(DEFAULT_WRITE_TIMEOUT),
            nodelay: true,
        }
    }
}

/// Opens TCP connections to a controller address.
#[derive(Debug, Clone, Default)]
pub struct TcpConnector {
    addr: ControllerAddr,
    config: TransportConfig,
}

impl TcpConnector {
    pub fn new(addr: ControllerAddr) -> Self {
        Self::with_config(addr, TransportConfig::default())
    }

    pub fn with_config(addr: ControllerAddr, config: TransportConfig) -> Self {
        Self { addr, config }
    }

    pub fn addr(&self) -> &ControllerAddr {
        &self.addr
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn connect_one(&self, target: &SocketAddr) -> std::io::Result<TcpStream> {
        match self.config.connect_timeout {
            Some(timeout) => TcpStream::connect_timeout(target, timeout),
            None => TcpStream::connect(target),
        }
    }
}

impl Connector for TcpConnector {
    type Stream = TcpStream;

    /// Try each resolved address in turn; the last failure is reported.
    fn connect(&self) -> Result<TcpStream> {
        let mut last_err = None;
        for target in self.addr.resolve()? {
            match self.connect_one(&target) {
                Ok(stream) => {
                    stream.set_write_timeout(self.config.write_timeout)?;
                    stream.set_nodelay(self.config.nodelay)?;
                    debug!(addr = %target, "connected to controller");
                    return Ok(stream);
                }
                Err(err) => {
                    debug!(addr = %target, error = %err, "connect attempt failed");
                    last_err = Some(err);
                }
            }
        }
        Err(TransportError::Connect {
            addr: self.addr.to_string(),
            source: last_err.unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::AddrNotAvailable, "no addresses")
            }),
        })
    }
}

/// A listening socket that accepts controller-side connections.
///
/// Used by the mock controller and by tests.
pub struct ControllerListener {
    listener: TcpListener,
}

impl ControllerListener {
    /// Bind to `addr`. Port 0 picks a free port; see [`Self::local_addr`].
    pub fn bind(addr: &ControllerAddr) -> Result<Self> {
        let targets = addr.resolve()?;
        let listener = TcpListener::bind(targets.as_slice()).map_err(|source| {
            TransportError::Bind {
                addr: addr.to_string(),
                source,
            }
        })?;
        info!(addr = %listener.local_addr()?, "listening for controller commands");
        Ok(Self { listener })
    }

    /// Accept one connection (blocking).
    pub fn accept(&self) -> Result<(TcpStream, SocketAddr)> {
        let (stream, peer) = self.listener.accept().map_err(TransportError::Accept)?;
        debug!(%peer, "accepted connection");
        Ok((stream, peer))
    }

    /// Accept one connection if one is pending. Never blocks.
    ///
    /// The returned stream is in blocking mode.
    pub fn try_accept(&self) -> Result<Option<(TcpStream, SocketAddr)>> {
        self.listener.set_nonblocking(true)?;
        let accepted = self.listener.accept();
        self.listener.set_nonblocking(false)?;

        match accepted {
            Ok((stream, peer)) => {
                stream.set_nonblocking(false)?;
                debug!(%peer, "accepted connection");
                Ok(Some((stream, peer)))
            }
            Err(err) if err.kind() == ErrorKind::WouldBlock => Ok(None),
            Err(err) => Err(TransportError::Accept(err)),
        }
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }
}
