//! Command message encoder for the SPM instrument controller.
//!
//! A command is a name plus an ordered set of typed arguments. It is rendered
//! to the JSON-like text the controller expects and framed with a 4-byte
//! big-endian length prefix:
//!
//! ```text
//! {"cmd":"move","args":{"ch":3,"val":1.5}}
//! ```
//!
//! The rendering is hand-built rather than delegated to a general serializer:
//! booleans are bare `true`/`false`, infinities are the bare tokens
//! `Infinity`/`-Infinity`, and a command without arguments omits the `args`
//! object entirely.

pub mod commands;
pub mod error;
pub mod feedback;
pub mod message;
pub mod render;
pub mod value;

pub use commands::{
    AdvancedScan, Approach, ControllerCommand, Move, Note, OpenForm, Quit, Scan, ScanOutputList,
    SetAiGain, SetAoGain, SetAoRange, SetLoopTimer, SetSpeed, SetThreshold, SetTipGuard,
    DEFAULT_LOOP_TIMER_TICKS,
};
pub use error::{EncodeError, Result};
pub use feedback::FeedbackConfig;
pub use message::{encode, encode_text, Command, CommandBody};
pub use value::{Arguments, Value};
