use std::process::ExitCode;

use clap::Parser;

use resizer_win::cli::Cli;
use resizer_win::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.log);
    run(cli)
}

#[cfg(windows)]
fn run(cli: Cli) -> ExitCode {
    use resizer_win::app::controller::GeometryController;
    use resizer_win::cli::execute;
    use resizer_win::platform::monitors::{enable_dpi_awareness, DpiAwareness};
    use resizer_win::platform::window::Win32System;

    // Must happen before any geometry is read
    let awareness = enable_dpi_awareness();
    if awareness == DpiAwareness::Unaware {
        tracing::warn!("could not enable DPI awareness; sizes may be scaled on high-DPI monitors");
    } else {
        tracing::debug!("DPI awareness: {:?}", awareness);
    }

    let config = match cli.resize_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("resizer-win: {}", e);
            return ExitCode::from(2);
        }
    };
    let controller = match GeometryController::new(Win32System::new(), config) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("resizer-win: {}", e);
            return ExitCode::from(2);
        }
    };

    let mut stdout = std::io::stdout().lock();
    match execute(&cli.command, &controller, &mut stdout) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("command failed: {}", e);
            eprintln!("resizer-win: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(windows))]
fn run(_cli: Cli) -> ExitCode {
    use resizer_win::platform::PlatformError;

    eprintln!("resizer-win: {}; this tool requires Windows", PlatformError::Unsupported);
    ExitCode::FAILURE
}
