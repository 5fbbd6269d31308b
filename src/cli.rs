//! Command-line front end
//!
//! Plays the part of the window list provider (`list`, `inspect`) and the
//! resize trigger (`resize`). Command execution is generic over the window
//! system so it runs against the simulated desktop in tests.

use std::io::{self, Write};
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::app::controller::{AppError, GeometryController};
use crate::config::{ConfigError, ResizeConfig};
use crate::domain::core::Size;
use crate::domain::window::WindowHandle;
use crate::engine::{FnLog, ResizeError};
use crate::logging::LogArgs;
use crate::platform::WindowSystem;

/// Resize a window's client area to an exact size for screen capture
#[derive(Debug, Parser)]
#[command(name = "resizer-win", version, about)]
pub struct Cli {
    /// Target client-area width in physical pixels
    #[arg(long, global = true, default_value_t = ResizeConfig::DEFAULT_TARGET.w)]
    pub width: i32,

    /// Target client-area height in physical pixels
    #[arg(long, global = true, default_value_t = ResizeConfig::DEFAULT_TARGET.h)]
    pub height: i32,

    /// Wait this long (ms) after restoring and after each resize
    #[arg(long, global = true)]
    pub settle_ms: Option<u64>,

    /// Poll the client size while settling instead of one fixed sleep
    #[arg(long, global = true)]
    pub poll: bool,

    #[command(flatten)]
    pub log: LogArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List windows that can be resized
    List,
    /// Show the geometry of one or more windows
    Inspect {
        /// Window handles, decimal or 0x-prefixed hex
        #[arg(required = true)]
        handles: Vec<WindowHandle>,
    },
    /// Resize windows so their client area matches the target size
    Resize {
        /// Window handles, decimal or 0x-prefixed hex
        handles: Vec<WindowHandle>,
        /// Align each window's visible top-left with its monitor's top-left
        #[arg(long)]
        move_to_origin: bool,
        /// Print the measurement log
        #[arg(long, short)]
        verbose: bool,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl Cli {
    /// Resize parameters selected by the global flags
    pub fn resize_config(&self) -> Result<ResizeConfig, ConfigError> {
        let mut config = ResizeConfig::new(Size::new(self.width, self.height))?;
        if let Some(ms) = self.settle_ms {
            config = config.with_settle_delay(Duration::from_millis(ms));
        }
        if self.poll {
            config = config.with_polling();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Runs one command; `Ok(false)` means the command ran but did not fully
/// succeed
pub fn execute<S: WindowSystem>(
    command: &Commands,
    controller: &GeometryController<S>,
    out: &mut dyn Write,
) -> Result<bool, CliError> {
    match command {
        Commands::List => {
            let windows = controller.list_windows()?;
            for window in &windows {
                writeln!(out, "{}  {}", window.handle, window.title)?;
            }
            writeln!(out, "{} windows", windows.len())?;
            Ok(true)
        }
        Commands::Inspect { handles } => {
            let mut all_ok = true;
            for &handle in handles {
                match inspect_one(controller, handle, out) {
                    Ok(()) => {}
                    Err(CliError::App(err)) => {
                        writeln!(out, "{}  {}", handle, err)?;
                        all_ok = false;
                    }
                    Err(err) => return Err(err),
                }
            }
            Ok(all_ok)
        }
        Commands::Resize {
            handles,
            move_to_origin,
            verbose,
        } => {
            let request = controller.request(handles.clone(), *move_to_origin);
            let mut lines: Vec<String> = Vec::new();
            let result = controller.resize(&request, &mut FnLog(|line: &str| lines.push(line.to_string())));

            let report = match result {
                Ok(report) => report,
                Err(AppError::Resize(ResizeError::NoSelection)) => {
                    writeln!(out, "No selection: pass at least one window handle (see `list`)")?;
                    return Ok(false);
                }
                Err(err) => return Err(err.into()),
            };

            if *verbose {
                for line in &lines {
                    writeln!(out, "{}", line)?;
                }
            }
            for outcome in &report.outcomes {
                writeln!(out, "{}  {:?}: {}", outcome.handle, outcome.title, outcome.message())?;
            }
            if report.outcomes.len() > 1 {
                writeln!(out, "{}", report.summary())?;
            }
            Ok(report.all_succeeded())
        }
    }
}

fn inspect_one<S: WindowSystem>(
    controller: &GeometryController<S>,
    handle: WindowHandle,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let report = controller.inspect(handle)?;
    let summary = controller.describe(handle)?;
    writeln!(out, "{}", report)?;
    writeln!(out, "  Summary  : {}", summary.text())?;
    Ok(())
}
