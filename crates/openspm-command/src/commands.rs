//! Typed builders for the controller's command set.
//!
//! Each struct maps one-to-one onto a controller command. Field names are the
//! argument names on the wire and field order is the argument order.
//! Per-channel arrays are 8 entries for analog channels and 2 for feedback
//! channels; lengths are passed through as given.

use crate::feedback::FeedbackConfig;
use crate::message::Command;
use crate::value::Arguments;

/// Default FPGA main-loop interval, in ticks.
pub const DEFAULT_LOOP_TIMER_TICKS: i64 = 350;

/// A command with a fixed name and flat arguments.
pub trait ControllerCommand {
    /// Command name on the wire.
    const NAME: &'static str;

    /// Arguments in wire order.
    fn arguments(&self) -> Arguments;

    fn to_command(&self) -> Command {
        Command::new(Self::NAME, self.arguments())
    }
}

/// Raster scan driven by per-channel deltas.
///
/// Outputs must already sit at the start position. Auto reversal needs
/// thresholds configured with [`SetThreshold`] first.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvancedScan {
    /// Fast-axis points.
    pub nx: i64,
    /// Slow-axis points.
    pub ny: i64,
    /// Fast-axis delta per channel (8ch).
    pub dx: Vec<f64>,
    /// Slow-axis delta per channel (8ch).
    pub dy: Vec<f64>,
    pub avg: i64,
    pub bidirectional_scan: bool,
    pub auto_reversal: bool,
}

impl AdvancedScan {
    /// Bidirectional scan without auto reversal.
    pub fn new(nx: i64, ny: i64, dx: Vec<f64>, dy: Vec<f64>, avg: i64) -> Self {
        Self {
            nx,
            ny,
            dx,
            dy,
            avg,
            bidirectional_scan: true,
            auto_reversal: false,
        }
    }
}

impl ControllerCommand for AdvancedScan {
    const NAME: &'static str = "advanced_scan";

    fn arguments(&self) -> Arguments {
        Arguments::new()
            .with("nx", self.nx)
            .with("ny", self.ny)
            .with("dx", self.dx.as_slice())
            .with("dy", self.dy.as_slice())
            .with("avg", self.avg)
            .with("bidirectional_scan", self.bidirectional_scan)
            .with("auto_reversal", self.auto_reversal)
    }
}

/// Coarse approach with a sawtooth on `z2` while `z` sweeps.
///
/// The approached condition comes from [`SetThreshold`].
#[derive(Debug, Clone, PartialEq)]
pub struct Approach {
    /// Delay between z2 motion and z motion.
    pub sleep: i64,
    pub avg: i64,
    pub dz: f64,
    pub zstart: f64,
    pub zend: f64,
    /// Output channel carrying the sawtooth.
    pub z2ch: i64,
    pub avg2: i64,
    pub dz2: f64,
    pub z2start: f64,
    pub z2end: f64,
}

impl ControllerCommand for Approach {
    const NAME: &'static str = "approach";

    fn arguments(&self) -> Arguments {
        Arguments::new()
            .with("sleep", self.sleep)
            .with("avg", self.avg)
            .with("dz", self.dz)
            .with("zstart", self.zstart)
            .with("zend", self.zend)
            .with("z2ch", self.z2ch)
            .with("avg2", self.avg2)
            .with("dz2", self.dz2)
            .with("z2start", self.z2start)
            .with("z2end", self.z2end)
    }
}

/// Change one output target.
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub ch: i64,
    pub val: f64,
}

impl ControllerCommand for Move {
    const NAME: &'static str = "move";

    fn arguments(&self) -> Arguments {
        Arguments::new().with("ch", self.ch).with("val", self.val)
    }
}

/// Free-text entry in the controller log.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub note: String,
}

impl ControllerCommand for Note {
    const NAME: &'static str = "note";

    fn arguments(&self) -> Arguments {
        Arguments::new().with("note", self.note.as_str())
    }
}

/// Open a GUI window on the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenForm {
    pub name: String,
}

impl ControllerCommand for OpenForm {
    const NAME: &'static str = "open_form";

    fn arguments(&self) -> Arguments {
        Arguments::new().with("name", self.name.as_str())
    }
}

/// Shut the controller down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quit;

impl ControllerCommand for Quit {
    const NAME: &'static str = "quit";

    fn arguments(&self) -> Arguments {
        Arguments::new()
    }
}

/// Simple x-y raster scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Scan {
    pub nx: i64,
    pub ny: i64,
    pub lx: f64,
    pub ly: f64,
    /// Scan center.
    pub cx: f64,
    pub cy: f64,
    pub avg: i64,
}

impl ControllerCommand for Scan {
    const NAME: &'static str = "scan";

    fn arguments(&self) -> Arguments {
        Arguments::new()
            .with("nx", self.nx)
            .with("ny", self.ny)
            .with("lx", self.lx)
            .with("ly", self.ly)
            .with("cx", self.cx)
            .with("cy", self.cy)
            .with("avg", self.avg)
    }
}

/// Scan through an output list written with `save_output_list`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutputList {
    /// Base name of the output-list file pair.
    pub filename: String,
    pub avg: i64,
}

impl ControllerCommand for ScanOutputList {
    const NAME: &'static str = "scan_output_list";

    fn arguments(&self) -> Arguments {
        Arguments::new()
            .with("filename", self.filename.as_str())
            .with("avg", self.avg)
    }
}

/// Analog input gain (8ch).
#[derive(Debug, Clone, PartialEq)]
pub struct SetAiGain {
    pub gain: Vec<f64>,
}

impl ControllerCommand for SetAiGain {
    const NAME: &'static str = "set_ai_gain";

    fn arguments(&self) -> Arguments {
        Arguments::new().with("gain", self.gain.as_slice())
    }
}

/// Analog output gain (8ch).
#[derive(Debug, Clone, PartialEq)]
pub struct SetAoGain {
    pub gain: Vec<f64>,
}

impl ControllerCommand for SetAoGain {
    const NAME: &'static str = "set_ao_gain";

    fn arguments(&self) -> Arguments {
        Arguments::new().with("gain", self.gain.as_slice())
    }
}

/// Analog output limits (8ch each).
#[derive(Debug, Clone, PartialEq)]
pub struct SetAoRange {
    pub low: Vec<f64>,
    pub high: Vec<f64>,
}

impl ControllerCommand for SetAoRange {
    const NAME: &'static str = "set_ao_range";

    fn arguments(&self) -> Arguments {
        Arguments::new()
            .with("low", self.low.as_slice())
            .with("high", self.high.as_slice())
    }
}

/// FPGA main-loop interval in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetLoopTimer {
    pub val: i64,
}

impl Default for SetLoopTimer {
    fn default() -> Self {
        Self {
            val: DEFAULT_LOOP_TIMER_TICKS,
        }
    }
}

impl ControllerCommand for SetLoopTimer {
    const NAME: &'static str = "set_loop_timer";

    fn arguments(&self) -> Arguments {
        Arguments::new().with("val", self.val)
    }
}

/// Maximum output change per loop (8ch).
#[derive(Debug, Clone, PartialEq)]
pub struct SetSpeed {
    pub speed: Vec<f64>,
}

impl ControllerCommand for SetSpeed {
    const NAME: &'static str = "set_speed";

    fn arguments(&self) -> Arguments {
        Arguments::new().with("speed", self.speed.as_slice())
    }
}

/// Auto-reversal thresholds: analog inputs (8ch) and feedback (2ch).
#[derive(Debug, Clone, PartialEq)]
pub struct SetThreshold {
    pub ai_low: Vec<f64>,
    pub fb_low: Vec<f64>,
    pub ai_high: Vec<f64>,
    pub fb_high: Vec<f64>,
}

impl ControllerCommand for SetThreshold {
    const NAME: &'static str = "set_threshold";

    fn arguments(&self) -> Arguments {
        Arguments::new()
            .with("ai_low", self.ai_low.as_slice())
            .with("fb_low", self.fb_low.as_slice())
            .with("ai_high", self.ai_high.as_slice())
            .with("fb_high", self.fb_high.as_slice())
    }
}

/// Tip-guard thresholds plus the z position to retract to when triggered.
#[derive(Debug, Clone, PartialEq)]
pub struct SetTipGuard {
    pub tg_position: i64,
    pub ai_low: Vec<f64>,
    pub fb_low: Vec<f64>,
    pub ai_high: Vec<f64>,
    pub fb_high: Vec<f64>,
}

impl ControllerCommand for SetTipGuard {
    const NAME: &'static str = "set_tip_guard";

    fn arguments(&self) -> Arguments {
        Arguments::new()
            .with("tg_position", self.tg_position)
            .with("ai_low", self.ai_low.as_slice())
            .with("fb_low", self.fb_low.as_slice())
            .with("ai_high", self.ai_high.as_slice())
            .with("fb_high", self.fb_high.as_slice())
    }
}

impl From<FeedbackConfig> for Command {
    fn from(config: FeedbackConfig) -> Self {
        Command::feedback(config)
    }
}
