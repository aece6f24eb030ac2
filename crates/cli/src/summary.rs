//! Human-readable run summary.

use std::io::{self, Write};

use roster_recon::SyncSummary;

fn write_names(out: &mut impl Write, label: &str, names: &[String]) -> io::Result<()> {
    writeln!(out, "{label}: {}", names.len())?;
    for name in names {
        writeln!(out, "  - {name}")?;
    }
    Ok(())
}

pub fn write_summary(out: &mut impl Write, summary: &SyncSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{} report rows, {} roster records ({} after sync)",
        summary.meta.report_rows, summary.meta.roster_before, summary.meta.roster_after,
    )?;

    write_names(out, "Missing from roster", &summary.missing)?;
    write_names(out, "Official but not in report", &summary.extra)?;

    writeln!(out, "Renamed: {}", summary.renamed.len())?;
    for rename in &summary.renamed {
        writeln!(out, "  - {} -> {}", rename.old_name, rename.new_name)?;
    }

    write_names(out, "Tags updated", &summary.tag_updated)?;
    write_names(out, "Added", &summary.added)?;
    write_names(out, "Removed from official list", &summary.removed)?;
    if !summary.remove_failed.is_empty() {
        write_names(out, "Could not remove (not in roster)", &summary.remove_failed)?;
    }

    if !summary.has_changes() {
        writeln!(out, "Roster already matches the report.")?;
    }
    Ok(())
}
