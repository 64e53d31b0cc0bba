use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};

use crate::error::{Result, TransportError};

/// Default controller host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default controller command port.
pub const DEFAULT_PORT: u16 = 8070;

/// Host and port of the instrument controller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControllerAddr {
    pub host: String,
    pub port: u16,
}

impl ControllerAddr {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Resolve to socket addresses, in resolver order.
    pub fn resolve(&self) -> Result<Vec<SocketAddr>> {
        let addrs: Vec<SocketAddr> = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|source| TransportError::Resolve {
                addr: self.to_string(),
                source,
            })?
            .collect();
        if addrs.is_empty() {
            return Err(TransportError::Resolve {
                addr: self.to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::AddrNotAvailable,
                    "no addresses returned",
                ),
            });
        }
        Ok(addrs)
    }
}

impl Default for ControllerAddr {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for ControllerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl From<SocketAddr> for ControllerAddr {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr.ip().to_string(), addr.port())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_local_controller() {
        let addr = ControllerAddr::default();
        assert_eq!(addr.to_string(), "127.0.0.1:8070");
    }

    #[test]
    fn ipv6_host_is_bracketed() {
        assert_eq!(ControllerAddr::new("::1", 9000).to_string(), "[::1]:9000");
    }

    #[test]
    fn resolves_literal_ip() {
        let addrs = ControllerAddr::new("127.0.0.1", 8070).resolve().unwrap();
        assert_eq!(addrs, vec!["127.0.0.1:8070".parse::<SocketAddr>().unwrap()]);
    }

    #[test]
    fn from_socket_addr() {
        let addr: SocketAddr = "10.0.0.5:1234".parse().unwrap();
        assert_eq!(ControllerAddr::from(addr), ControllerAddr::new("10.0.0.5", 1234));
    }
}
