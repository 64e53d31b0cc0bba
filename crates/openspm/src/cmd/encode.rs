use openspm_frame::FrameWriter;

use crate::cmd::args::{resolve, Resolved};
use crate::cmd::EncodeArgs;
use crate::exit::{encode_error, frame_error, CliResult, SUCCESS};
use crate::output::{print_command, print_raw, CommandRecord, OutputFormat};

/// Render a command. `raw` writes the framed wire message to stdout.
pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let (text, wire) = match resolve(&args.command)? {
        Resolved::Command(command) => {
            let text = command
                .to_text()
                .map_err(|err| encode_error("encode failed", err))?;
            let wire = command
                .encode()
                .map_err(|err| encode_error("encode failed", err))?;
            (text, wire.to_vec())
        }
        Resolved::Text(text) => {
            let mut writer = FrameWriter::new(Vec::new());
            writer
                .send(text.as_bytes())
                .map_err(|err| frame_error("encode failed", err))?;
            (text, writer.into_inner())
        }
    };

    match format {
        OutputFormat::Raw => print_raw(&wire),
        other => print_command(&CommandRecord::new(text, None), other),
    }
    Ok(SUCCESS)
}
