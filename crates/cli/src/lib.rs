pub mod commands;

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use crashlog_core::CrashReport;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `warn`, or `debug` with
/// `--verbose`. Logs go to stderr so `--json` output stays parseable.
pub fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}

/// Make a report path absolute against the current working directory.
///
/// Symlinks are not resolved: the returned path names the file the way the
/// caller did.
pub fn resolve_report_path(path: &str) -> Result<PathBuf> {
    let input = Path::new(path);
    if input.is_absolute() {
        return Ok(input.to_path_buf());
    }
    let cwd = env::current_dir().context("Failed to get current directory")?;
    Ok(cwd.join(input))
}

/// Resolve `path` and load the crash report it points at.
pub fn open_report(path: &str) -> Result<CrashReport> {
    let report_path = resolve_report_path(path)?;
    tracing::debug!(path = %report_path.display(), "opening crash report");
    CrashReport::open(&report_path)
        .with_context(|| format!("Failed to load crash report at {}", report_path.display()))
}
