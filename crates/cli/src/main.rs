// roster-sync - reconcile an organization roster against a CRM report export

mod exit_codes;
mod summary;
mod sync;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use exit_codes::{EXIT_CONFIG, EXIT_ERROR, EXIT_OUTPUT, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "roster-sync")]
#[command(about = "Reconcile an organization roster against a CRM report export")]
#[command(long_version = long_version())]
#[command(version)]
#[command(after_help = "\
The roster is rewritten in place once every change has been applied. \
Nothing is written if the run fails.

Examples:
  roster-sync report.csv organizations.json
  roster-sync report.csv organizations.json --dry-run
  roster-sync report.csv organizations.json --no-geocode --json
  roster-sync report.csv organizations.json --config roster-sync.toml
  RUST_LOG=info roster-sync report.csv organizations.json")]
struct Cli {
    /// CRM report export (CSV with a header row)
    report: PathBuf,

    /// Roster document (JSON array of organizations), updated in place
    roster: PathBuf,

    /// TOML config file (geocoder and output settings)
    #[arg(long, env = "ROSTER_SYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Skip coordinate lookups for added organizations
    #[arg(long)]
    no_geocode: bool,

    /// Indent width for the written roster (overrides config)
    #[arg(long, value_name = "N")]
    indent: Option<usize>,

    /// Reconcile and report, but do not write the roster
    #[arg(long)]
    dry_run: bool,

    /// Print the run summary as JSON instead of the human summary
    #[arg(long)]
    json: bool,

    /// Log each change as it is applied (stderr)
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

/// Log records go to stderr so stdout stays clean for the summary.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = sync::cmd_sync(sync::SyncArgs {
        report: cli.report,
        roster: cli.roster,
        config: cli.config,
        no_geocode: cli.no_geocode,
        indent: cli.indent,
        dry_run: cli.dry_run,
        json: cli.json,
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::new(EXIT_CONFIG, msg)
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self::new(EXIT_OUTPUT, msg)
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
