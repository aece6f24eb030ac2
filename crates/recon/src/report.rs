use std::path::Path;

use crate::error::RosterError;
use crate::model::{ReportRow, REPORT_COLUMNS};

/// Parse a CRM export. All columns in [`REPORT_COLUMNS`] must be present;
/// extra columns are ignored. Row order is kept.
pub fn parse_report(csv_data: &str) -> Result<Vec<ReportRow>, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| RosterError::ReportParse(e.to_string()))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    if let Some(column) = REPORT_COLUMNS.iter().find(|c| !headers.iter().any(|h| h == *c)) {
        return Err(RosterError::MissingColumn(column.to_string()));
    }
    reader.set_headers(csv::StringRecord::from(headers));

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: ReportRow = record.map_err(|e| RosterError::ReportParse(e.to_string()))?;
        rows.push(row);
    }

    log::debug!("parsed {} report rows", rows.len());
    Ok(rows)
}

pub fn load_report(path: &Path) -> Result<Vec<ReportRow>, RosterError> {
    let csv_data = std::fs::read_to_string(path)
        .map_err(|e| RosterError::Io(format!("cannot read {}: {e}", path.display())))?;
    parse_report(&csv_data)
}
