use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use host_overlay_lib::cli::{Cli, USAGE};
use host_overlay_lib::logging::init_logging;

fn main() -> ExitCode {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                eprintln!("{}", err.render());
                eprintln!("{}", USAGE);
                return ExitCode::from(1);
            }
        },
    };

    match host_overlay_lib::run(&cli) {
        Ok(frames) => {
            log::info!("[main] Host closed after {} frames, exiting", frames);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("[main] {}", e);
            eprintln!("host-overlay: {}", e);
            ExitCode::from(1)
        }
    }
}
