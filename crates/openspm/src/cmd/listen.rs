use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use openspm_frame::{FrameConfig, FrameError, FrameReader};
use openspm_transport::ControllerListener;
use tracing::{debug, warn};

use crate::cmd::{parse_duration, ListenArgs};
use crate::exit::{frame_error, transport_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{print_command, CommandRecord, OutputFormat};

/// Sleep between accept polls; bounds how long Ctrl-C takes to land.
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Mock controller: one command per connection, printed as it arrives.
pub fn run(args: ListenArgs, format: OutputFormat) -> CliResult<i32> {
    let read_timeout = parse_duration(&args.read_timeout)?;
    let listener = ControllerListener::bind(&args.controller.addr())
        .map_err(|err| transport_error("bind failed", err))?;

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let frame_config = FrameConfig {
        read_timeout: Some(read_timeout),
        ..FrameConfig::default()
    };
    let mut printed = 0usize;

    while running.load(Ordering::SeqCst) {
        let Some((stream, peer)) = listener
            .try_accept()
            .map_err(|err| transport_error("accept failed", err))?
        else {
            thread::sleep(ACCEPT_POLL_INTERVAL);
            continue;
        };

        let received = FrameReader::with_config_tcp(stream, frame_config.clone())
            .and_then(|mut reader| reader.read_text());
        let text = match received {
            Ok(text) => text,
            Err(FrameError::ConnectionClosed) => {
                debug!(%peer, "connection closed without a command");
                continue;
            }
            Err(err @ FrameError::PayloadTooLarge { .. }) => {
                warn!(%peer, error = %err, "dropping oversized command");
                continue;
            }
            Err(FrameError::Io(err)) if is_timeout(&err) => {
                warn!(%peer, timeout = ?read_timeout, "dropping silent connection");
                continue;
            }
            Err(err) => return Err(frame_error("receive failed", err)),
        };

        print_command(&CommandRecord::new(text, Some(peer.to_string())), format);
        printed = printed.saturating_add(1);

        if let Some(count) = args.count {
            if printed >= count {
                return Ok(SUCCESS);
            }
        }
    }

    debug!("interrupted, shutting down");
    Ok(SUCCESS)
}

fn is_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}
