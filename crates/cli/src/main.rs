use anyhow::Result;
use clap::{Parser, Subcommand};
use crashlog::commands::{
    calls_command, images_command, inspect_command, save_path_command, translate_command,
    uuids_command,
};
use crashlog::init_logging;

/// Crash report inspection CLI.
///
/// This CLI is a thin wrapper around `crashlog-core` (exposed in code as `crashlog_core`).
/// All substantive logic lives in the library so it can be tested thoroughly
/// and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "crashlog",
    version,
    about = "Inspect crash reports and find the binaries that need symbols",
    long_about = None
)]
struct Cli {
    /// Log debug output to stderr (overridden by `RUST_LOG`).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a crash report.
    ///
    /// Shows the detected format and architecture, image and frame counts,
    /// the UUIDs that need symbols, and the symbolicated save path.
    Inspect {
        /// Path to a `.crash` or `.ips` report.
        path: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the UUIDs of binaries referenced by the backtraces, one per line.
    Uuids {
        /// Path to a `.crash` or `.ips` report.
        path: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List the report's `Binary Images:` table.
    Images {
        /// Path to a `.crash` or `.ips` report.
        path: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List the report's unsymbolicated stack frames.
    Calls {
        /// Path to a `.crash` or `.ips` report.
        path: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Render a report as legacy crash text.
    ///
    /// `.ips` reports are translated; legacy reports are echoed unchanged.
    Translate {
        /// Path to a `.crash` or `.ips` report.
        path: String,

        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<String>,
    },

    /// Print where the symbolicated copy of a report would be saved.
    SavePath {
        /// Path to a crash report (it does not need to exist).
        path: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Inspect { path, json } => inspect_command(&path, json)?,
        Command::Uuids { path, json } => uuids_command(&path, json)?,
        Command::Images { path, json } => images_command(&path, json)?,
        Command::Calls { path, json } => calls_command(&path, json)?,
        Command::Translate { path, output } => translate_command(&path, output.as_deref())?,
        Command::SavePath { path } => save_path_command(&path)?,
    }

    Ok(())
}
