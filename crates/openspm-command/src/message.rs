use bytes::{Bytes, BytesMut};
use openspm_frame::encode_frame;
use tracing::debug;

use crate::error::{EncodeError, Result};
use crate::feedback::FeedbackConfig;
use crate::render::render_value;
use crate::value::{Arguments, Value};

/// Separator between members of the flat command layout.
const FLAT_SEPARATOR: &str = ",";

/// The argument layout a command is rendered with.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandBody {
    /// `"args":{"name":value,...}`, omitted entirely when empty.
    Flat(Arguments),
    /// The fixed nested layout of `set_feedback`.
    Feedback(FeedbackConfig),
}

/// A command addressed to the instrument controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: String,
    body: CommandBody,
}

impl Command {
    /// A command with flat arguments.
    pub fn new(name: impl Into<String>, args: Arguments) -> Self {
        Self {
            name: name.into(),
            body: CommandBody::Flat(args),
        }
    }

    /// A command with no arguments, rendered as `{"cmd":"name"}`.
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, Arguments::new())
    }

    /// The nested feedback-configuration command.
    pub fn feedback(config: FeedbackConfig) -> Self {
        Self {
            name: FeedbackConfig::COMMAND_NAME.to_string(),
            body: CommandBody::Feedback(config),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &CommandBody {
        &self.body
    }

    /// Render the command text (without the length prefix).
    pub fn to_text(&self) -> Result<String> {
        match &self.body {
            CommandBody::Flat(args) => encode_text(&self.name, args),
            CommandBody::Feedback(config) => config.to_text(),
        }
    }

    /// Render and frame the command into a wire message.
    pub fn encode(&self) -> Result<Bytes> {
        let text = self.to_text()?;
        frame_text(&self.name, &text)
    }
}

/// Render the flat command text for `name` and `args`.
pub fn encode_text(name: &str, args: &Arguments) -> Result<String> {
    let mut out = String::with_capacity(32 + 16 * args.len());
    let mut top = ObjectWriter::begin(&mut out, FLAT_SEPARATOR);
    top.command_name(&mut out, name)?;

    if !args.is_empty() {
        top.key(&mut out, "args");
        let mut inner = ObjectWriter::begin(&mut out, FLAT_SEPARATOR);
        for (arg, value) in args.iter() {
            inner.field(&mut out, arg, value)?;
        }
        inner.end(&mut out);
    }

    top.end(&mut out);
    Ok(out)
}

/// Encode `name` and `args` into a length-prefixed wire message.
pub fn encode(name: &str, args: &Arguments) -> Result<Bytes> {
    let text = encode_text(name, args)?;
    frame_text(name, &text)
}

fn frame_text(name: &str, text: &str) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(openspm_frame::HEADER_SIZE + text.len());
    encode_frame(text.as_bytes(), &mut buf)?;
    debug!(command = name, bytes = buf.len(), "encoded command");
    Ok(buf.freeze())
}

/// Incremental writer for one `{...}` object of the command text.
///
/// Both the flat and the nested layouts are built with it so that they
/// share the value rendering rules.
pub(crate) struct ObjectWriter {
    separator: &'static str,
    empty: bool,
}

impl ObjectWriter {
    pub(crate) fn begin(out: &mut String, separator: &'static str) -> Self {
        out.push('{');
        Self {
            separator,
            empty: true,
        }
    }

    /// Write `"key":` preceded by the separator when needed.
    pub(crate) fn key(&mut self, out: &mut String, key: &str) {
        if !self.empty {
            out.push_str(self.separator);
        }
        self.empty = false;
        out.push('"');
        out.push_str(key);
        out.push_str("\":");
    }

    /// Write `"key":value` using the standard value rendering.
    pub(crate) fn field(&mut self, out: &mut String, key: &str, value: &Value) -> Result<()> {
        self.key(out, key);
        render_value(key, value, out)
    }

    /// Write `"key":text` with pre-rendered text.
    pub(crate) fn raw(&mut self, out: &mut String, key: &str, text: &str) {
        self.key(out, key);
        out.push_str(text);
    }

    /// Write the leading `"cmd":"name"` member.
    pub(crate) fn command_name(&mut self, out: &mut String, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(EncodeError::EmptyCommandName);
        }
        self.key(out, "cmd");
        out.push('"');
        out.push_str(name);
        out.push('"');
        Ok(())
    }

    pub(crate) fn end(self, out: &mut String) {
        out.push('}');
    }
}
