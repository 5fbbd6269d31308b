//! Logging setup and command-line log controls
//!
//! Log output goes to stderr so command output on stdout stays clean.

use std::env;

use clap::Args;
use tracing_subscriber::EnvFilter;

/// Crate target used in filter directives
const CRATE_TARGET: &str = "resizer_win";

/// Logging controls for the command line
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Set log level to trace for this program
    #[arg(long, global = true, conflicts_with_all = ["debug", "log_filter"])]
    pub trace: bool,

    /// Set log level to debug for this program
    #[arg(long, global = true, conflicts_with_all = ["trace", "log_filter"])]
    pub debug: bool,

    /// Explicit tracing filter directive (overrides other flags),
    /// e.g. "resizer_win::engine=trace"
    #[arg(long, global = true)]
    pub log_filter: Option<String>,
}

impl LogArgs {
    /// Final filter spec, in order of precedence: explicit filter, level
    /// flags, `RUST_LOG`, then `warn` for this crate
    pub fn filter_spec(&self) -> String {
        compute_spec(
            self.trace,
            self.debug,
            self.log_filter.as_deref(),
            env::var("RUST_LOG").ok().as_deref(),
        )
    }
}

/// Builds a filter spec from the individual controls
pub fn compute_spec(
    trace: bool,
    debug: bool,
    log_filter: Option<&str>,
    rust_log: Option<&str>,
) -> String {
    if let Some(spec) = log_filter {
        return spec.to_string();
    }
    if trace {
        return format!("{}=trace", CRATE_TARGET);
    }
    if debug {
        return format!("{}=debug", CRATE_TARGET);
    }
    match rust_log {
        Some(spec) if !spec.trim().is_empty() => spec.to_string(),
        _ => format!("{}=warn", CRATE_TARGET),
    }
}

/// Installs the global subscriber; a second call is a no-op
pub fn init(args: &LogArgs) {
    let spec = args.filter_spec();
    let result = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&spec))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if result.is_ok() {
        tracing::debug!("logging initialised with filter '{}'", spec);
    }
}
