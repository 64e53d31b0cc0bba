use openspm_command::DEFAULT_LOOP_TIMER_TICKS;
use openspm_frame::DEFAULT_MAX_PAYLOAD;
use openspm_transport::{DEFAULT_HOST, DEFAULT_PORT};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("openspm {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: openspm");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("OPENSPM_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!("controller_default: {DEFAULT_HOST}:{DEFAULT_PORT}");
    println!("max_payload: {DEFAULT_MAX_PAYLOAD}");
    println!("loop_timer_default: {DEFAULT_LOOP_TIMER_TICKS}");

    Ok(SUCCESS)
}
