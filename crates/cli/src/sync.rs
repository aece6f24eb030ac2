//! `roster-sync`: load, reconcile, write.

use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

use roster_geocode::NominatimGeocoder;
use roster_recon::model::REPORT_COLUMNS;
use roster_recon::report::load_report;
use roster_recon::store::{load_roster, save_roster};
use roster_recon::{Geocoder, NullGeocoder, RosterError, SyncConfig};

use crate::exit_codes::{load_exit_code, run_exit_code};
use crate::summary::write_summary;
use crate::CliError;

pub struct SyncArgs {
    pub report: PathBuf,
    pub roster: PathBuf,
    pub config: Option<PathBuf>,
    pub no_geocode: bool,
    pub indent: Option<usize>,
    pub dry_run: bool,
    pub json: bool,
}

/// Progress lines: stdout normally, stderr when stdout carries JSON.
struct Progress {
    json: bool,
}

impl Progress {
    fn line(&self, msg: impl Display) {
        if self.json {
            eprintln!("{msg}");
        } else {
            println!("{msg}");
        }
    }
}

fn load_err(e: RosterError) -> CliError {
    let hint = match &e {
        RosterError::MissingColumn(_) => Some(format!("expected columns: {}", REPORT_COLUMNS.join(", "))),
        RosterError::DuplicateName(_) => Some("organization names must be unique".to_string()),
        _ => None,
    };
    let err = CliError::new(load_exit_code(&e), e.to_string());
    match hint {
        Some(hint) => err.with_hint(hint),
        None => err,
    }
}

fn load_config(path: Option<&Path>) -> Result<SyncConfig, CliError> {
    let Some(path) = path else {
        return Ok(SyncConfig::default());
    };
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| CliError::config(format!("cannot read config {}: {e}", path.display())))?;
    SyncConfig::from_toml(&config_str).map_err(load_err)
}

fn build_geocoder(config: &SyncConfig) -> Result<Box<dyn Geocoder>, CliError> {
    if !config.geocoder.enabled {
        log::info!("geocoding disabled");
        return Ok(Box::new(NullGeocoder));
    }
    let geocoder = NominatimGeocoder::from_config(&config.geocoder).map_err(|e| {
        CliError::general(format!("cannot set up geocoder: {e}"))
            .with_hint("rerun with --no-geocode to skip coordinate lookups")
    })?;
    log::info!("geocoding via {}", geocoder.endpoint());
    Ok(Box::new(geocoder))
}

pub fn cmd_sync(args: SyncArgs) -> Result<(), CliError> {
    let mut config = load_config(args.config.as_deref())?;
    if args.no_geocode {
        config.geocoder.enabled = false;
    }
    if let Some(indent) = args.indent {
        config.output.indent = indent;
        config.validate().map_err(|e| CliError::args(e.to_string()))?;
    }

    let progress = Progress { json: args.json };

    progress.line(format_args!("Reading report {}", args.report.display()));
    let report = load_report(&args.report).map_err(load_err)?;
    progress.line(format_args!("  {} rows", report.len()));

    progress.line(format_args!("Reading roster {}", args.roster.display()));
    let mut roster = load_roster(&args.roster).map_err(load_err)?;
    progress.line(format_args!("  {} organizations", roster.len()));

    let geocoder = build_geocoder(&config)?;

    progress.line("Reconciling");
    let summary = roster_recon::run(&mut roster, &report, geocoder.as_ref())
        .map_err(|e| CliError::new(run_exit_code(&e), e.to_string()))?;

    if args.json {
        let json_str = serde_json::to_string_pretty(&summary)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    } else {
        write_summary(&mut io::stdout().lock(), &summary)
            .map_err(|e| CliError::general(format!("cannot print summary: {e}")))?;
    }

    if args.dry_run {
        progress.line(format_args!("Dry run: {} not written", args.roster.display()));
        return Ok(());
    }

    save_roster(&args.roster, &roster, config.output.indent)
        .map_err(|e| CliError::output(e.to_string()))?;
    progress.line(format_args!("Wrote {}", args.roster.display()));

    Ok(())
}
