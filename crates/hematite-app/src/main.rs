//! Main application entry point.

use std::io;
use std::process::ExitCode;

use hematite_app::{App, AppConfig};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting Hematite");

    let config = AppConfig::from_args(std::env::args().skip(1));
    let result = App::from_config(&config).and_then(|mut app| app.run(io::stdin().lock(), io::stdout().lock()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("hematite: {e}");
            ExitCode::FAILURE
        }
    }
}
