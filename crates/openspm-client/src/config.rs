use openspm_transport::{ControllerAddr, TransportConfig};

/// Where and how the client reaches the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Controller address. Default: `127.0.0.1:8070`.
    pub addr: ControllerAddr,
    /// Socket timeouts.
    pub transport: TransportConfig,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            addr: ControllerAddr::new(host, port),
            ..Self::default()
        }
    }
}
