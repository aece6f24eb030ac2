use serde::Serialize;

use crate::error::RosterError;
use crate::geocode::Geocoder;
use crate::matcher::{find_extra, find_missing, find_renamed, find_tag_updates};
use crate::model::{NewOrganization, Rename, ReportRow};
use crate::roster::Roster;

/// What a reconciliation run found and what it changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncSummary {
    pub meta: SyncMeta,
    /// Report rows absent from the roster before renames were applied.
    pub missing: Vec<String>,
    /// Official roster records absent from the report before renames were applied.
    pub extra: Vec<String>,
    pub renamed: Vec<Rename>,
    pub tag_updated: Vec<String>,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    /// Removal targets that were not in the roster.
    pub remove_failed: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncMeta {
    pub engine_version: String,
    pub run_at: String,
    pub report_rows: usize,
    pub roster_before: usize,
    pub roster_after: usize,
}

impl SyncSummary {
    pub fn has_changes(&self) -> bool {
        !(self.renamed.is_empty()
            && self.tag_updated.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty())
    }
}

/// Reconcile `roster` against `report` in place.
///
/// Order matters: missing/extra are computed against the untouched roster,
/// renames consume entries from both lists, tag updates see the renamed
/// records, then the leftovers are added or demoted.
pub fn run(
    roster: &mut Roster,
    report: &[ReportRow],
    geocoder: &dyn Geocoder,
) -> Result<SyncSummary, RosterError> {
    let roster_before = roster.len();

    let mut missing: Vec<&ReportRow> = find_missing(roster.records(), report);
    let mut extra: Vec<String> = find_extra(roster.records(), report)
        .into_iter()
        .map(|r| r.name.clone())
        .collect();

    let mut summary = SyncSummary {
        missing: missing.iter().map(|r| r.account_name.clone()).collect(),
        extra: extra.clone(),
        ..SyncSummary::default()
    };
    log::info!("{} missing, {} extra", summary.missing.len(), summary.extra.len());

    let renames = find_renamed(&missing, roster.records());
    for rename in renames {
        roster.apply_rename(&rename, report, geocoder)?;

        if let Some(i) = missing.iter().position(|r| r.account_name == rename.new_name) {
            missing.remove(i);
        }
        if let Some(i) = extra.iter().position(|name| *name == rename.old_name) {
            extra.remove(i);
        }
        summary.renamed.push(rename);
    }

    for row in find_tag_updates(roster.records(), report) {
        roster.apply_tag_update(row)?;
        summary.tag_updated.push(row.account_name.clone());
    }

    for row in missing {
        roster.apply_add(NewOrganization::from(row), geocoder)?;
        summary.added.push(row.account_name.clone());
    }

    for name in extra {
        match roster.apply_remove(&name, false) {
            Ok(()) => summary.removed.push(name),
            Err(e) => {
                log::error!("could not remove '{}': {}", name, e);
                summary.remove_failed.push(name);
            }
        }
    }

    summary.meta = SyncMeta {
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        run_at: chrono::Utc::now().to_rfc3339(),
        report_rows: report.len(),
        roster_before,
        roster_after: roster.len(),
    };

    Ok(summary)
}
