use openspm_command::{
    AdvancedScan, Approach, Command, ControllerCommand, FeedbackConfig, Move, Note, OpenForm, Quit,
    Scan, ScanOutputList, SetAiGain, SetAoGain, SetAoRange, SetLoopTimer, SetSpeed, SetThreshold,
    SetTipGuard,
};
use openspm_frame::FrameWriter;
use openspm_transport::{Connector, TcpConnector};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Result;

/// Sends commands to the instrument controller.
///
/// Generic over the [`Connector`] so tests can capture the bytes instead of
/// opening sockets.
#[derive(Debug, Clone)]
pub struct Client<C = TcpConnector> {
    connector: C,
}

impl Client<TcpConnector> {
    /// Client for the controller at `host:port` with default timeouts.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::from_config(ClientConfig::new(host, port))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            connector: TcpConnector::with_config(config.addr, config.transport),
        }
    }
}

impl Default for Client<TcpConnector> {
    fn default() -> Self {
        Self::from_config(ClientConfig::default())
    }
}

impl<C: Connector> Client<C> {
    pub fn with_connector(connector: C) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Encode and send one command.
    pub fn send_command(&self, command: &Command) -> Result<()> {
        let wire = command.encode()?;
        self.send_wire(command.name(), &wire)
    }

    /// Send a typed command.
    pub fn send<T: ControllerCommand>(&self, command: &T) -> Result<()> {
        self.send_command(&command.to_command())
    }

    /// Send pre-rendered command text as-is.
    pub fn send_text(&self, text: &str) -> Result<()> {
        let stream = self.connector.connect()?;
        let mut writer = FrameWriter::new(stream);
        writer.send(text.as_bytes())?;
        debug!(bytes = text.len(), "sent raw command text");
        Ok(())
    }

    fn send_wire(&self, name: &str, wire: &[u8]) -> Result<()> {
        let stream = self.connector.connect()?;
        let mut writer = FrameWriter::new(stream);
        writer.send_framed(wire)?;
        debug!(command = name, bytes = wire.len(), "sent command");
        Ok(())
    }

    pub fn advanced_scan(&self, scan: &AdvancedScan) -> Result<()> {
        self.send(scan)
    }

    pub fn approach(&self, approach: &Approach) -> Result<()> {
        self.send(approach)
    }

    /// Change the target of output channel `ch`.
    pub fn move_output(&self, ch: i64, val: f64) -> Result<()> {
        self.send(&Move { ch, val })
    }

    /// Write a line to the controller log.
    pub fn note(&self, note: &str) -> Result<()> {
        self.send(&Note {
            note: note.to_string(),
        })
    }

    pub fn open_form(&self, name: &str) -> Result<()> {
        self.send(&OpenForm {
            name: name.to_string(),
        })
    }

    /// Ask the controller to exit.
    pub fn quit(&self) -> Result<()> {
        self.send(&Quit)
    }

    pub fn scan(&self, scan: &Scan) -> Result<()> {
        self.send(scan)
    }

    /// Scan through the output list saved under `filename`.
    pub fn scan_output_list(&self, filename: &str, avg: i64) -> Result<()> {
        self.send(&ScanOutputList {
            filename: filename.to_string(),
            avg,
        })
    }

    pub fn set_ai_gain(&self, gain: &[f64]) -> Result<()> {
        self.send(&SetAiGain {
            gain: gain.to_vec(),
        })
    }

    pub fn set_ao_gain(&self, gain: &[f64]) -> Result<()> {
        self.send(&SetAoGain {
            gain: gain.to_vec(),
        })
    }

    pub fn set_ao_range(&self, low: &[f64], high: &[f64]) -> Result<()> {
        self.send(&SetAoRange {
            low: low.to_vec(),
            high: high.to_vec(),
        })
    }

    pub fn set_feedback(&self, config: &FeedbackConfig) -> Result<()> {
        self.send_command(&Command::feedback(config.clone()))
    }

    pub fn set_loop_timer(&self, ticks: i64) -> Result<()> {
        self.send(&SetLoopTimer { val: ticks })
    }

    pub fn set_speed(&self, speed: &[f64]) -> Result<()> {
        self.send(&SetSpeed {
            speed: speed.to_vec(),
        })
    }

    pub fn set_threshold(&self, threshold: &SetThreshold) -> Result<()> {
        self.send(threshold)
    }

    pub fn set_tip_guard(&self, tip_guard: &SetTipGuard) -> Result<()> {
        self.send(tip_guard)
    }
}
