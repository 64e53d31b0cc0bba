use clap::{Args, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use openspm_transport::{ControllerAddr, DEFAULT_HOST, DEFAULT_PORT};

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod args;
pub mod encode;
pub mod files;
pub mod inspect;
pub mod listen;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send one command to the controller.
    Send(SendArgs),
    /// Render a command without sending it.
    Encode(EncodeArgs),
    /// Act as a controller and print received commands.
    Listen(ListenArgs),
    /// Summarize an array data file.
    Inspect(InspectArgs),
    /// List numbered data files, oldest first.
    Files(FilesArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Listen(args) => listen::run(args, format),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Files(args) => files::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct ControllerArgs {
    /// Controller host.
    #[arg(long, env = "OPENSPM_HOST", default_value = DEFAULT_HOST)]
    pub host: String,
    /// Controller TCP port.
    #[arg(long, env = "OPENSPM_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl ControllerArgs {
    pub fn addr(&self) -> ControllerAddr {
        ControllerAddr::new(self.host.clone(), self.port)
    }
}

#[derive(Args, Debug)]
pub struct CommandSpec {
    /// Command name (e.g. move, scan, set_feedback).
    #[arg(required_unless_present = "text")]
    pub name: Option<String>,
    /// Command argument; repeat in controller order.
    #[arg(long = "arg", short = 'a', value_name = "NAME=VALUE")]
    pub args: Vec<String>,
    /// Pre-rendered command text, sent as-is.
    #[arg(long, conflicts_with_all = ["name", "args"])]
    pub text: Option<String>,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    #[command(flatten)]
    pub command: CommandSpec,
    #[command(flatten)]
    pub controller: ControllerArgs,
    /// Connect and write timeout (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub timeout: String,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub command: CommandSpec,
}

#[derive(Args, Debug)]
pub struct ListenArgs {
    #[command(flatten)]
    pub controller: ControllerArgs,
    /// Exit after receiving N commands.
    #[arg(long)]
    pub count: Option<usize>,
    /// Drop a connection that sends no complete command within this time.
    #[arg(long, default_value = "5s")]
    pub read_timeout: String,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Array data file.
    pub path: PathBuf,
    /// Channel-list file. Defaults to the `_ch.dat` sibling when present.
    #[arg(long, value_name = "FILE")]
    pub channels: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Directory to scan.
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Parse `5s`, `500ms`, or bare seconds.
pub(crate) fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, millis) = if let Some(num) = input.strip_suffix("ms") {
        (num, true)
    } else if let Some(num) = input.strip_suffix('s') {
        (num, false)
    } else {
        (input, false)
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;
    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    Ok(if millis {
        Duration::from_millis(value)
    } else {
        Duration::from_secs(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("bad").is_err());
        assert!(parse_duration("").is_err());
    }
}
