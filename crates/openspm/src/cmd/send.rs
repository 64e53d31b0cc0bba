use openspm_client::{Client, ClientConfig};
use openspm_transport::TransportConfig;
use tracing::info;

use crate::cmd::args::{resolve, Resolved};
use crate::cmd::{parse_duration, SendArgs};
use crate::exit::{client_error, encode_error, CliResult, SUCCESS};
use crate::output::{print_command, CommandRecord, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let timeout = parse_duration(&args.timeout)?;
    let addr = args.controller.addr();
    let client = Client::from_config(ClientConfig {
        addr: addr.clone(),
        transport: TransportConfig {
            connect_timeout: Some(timeout),
            write_timeout: Some(timeout),
            ..TransportConfig::default()
        },
    });

    let text = match resolve(&args.command)? {
        Resolved::Command(command) => {
            let text = command
                .to_text()
                .map_err(|err| encode_error("encode failed", err))?;
            client
                .send_command(&command)
                .map_err(|err| client_error("send failed", err))?;
            text
        }
        Resolved::Text(text) => {
            client
                .send_text(&text)
                .map_err(|err| client_error("send failed", err))?;
            text
        }
    };

    info!(%addr, bytes = text.len(), "command sent");
    print_command(&CommandRecord::new(text, Some(addr.to_string())), format);
    Ok(SUCCESS)
}
