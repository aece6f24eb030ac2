//! Roster document load/save.
//!
//! The roster is a JSON array of organization objects. Output is pretty
//! printed with a configurable indent, non-ASCII kept literal, and no
//! trailing whitespace on any line.

use std::path::Path;

use serde::Serialize;

use crate::error::RosterError;
use crate::model::OrganizationRecord;
use crate::roster::Roster;

pub const DEFAULT_INDENT: usize = 2;

pub fn parse_roster(json: &str) -> Result<Roster, RosterError> {
    let records: Vec<OrganizationRecord> =
        serde_json::from_str(json).map_err(|e| RosterError::RosterParse(e.to_string()))?;
    Roster::from_records(records)
}

pub fn load_roster(path: &Path) -> Result<Roster, RosterError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| RosterError::Io(format!("cannot read {}: {e}", path.display())))?;
    parse_roster(&json)
}

pub fn render_roster(records: &[OrganizationRecord], indent: usize) -> Result<String, RosterError> {
    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records
        .serialize(&mut ser)
        .map_err(|e| RosterError::Serialize(e.to_string()))?;

    let text = String::from_utf8(buf)
        .map_err(|e| RosterError::Serialize(e.to_string()))?;

    let mut out = String::with_capacity(text.len() + 1);
    for line in text.lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    Ok(out)
}

pub fn save_roster(path: &Path, roster: &Roster, indent: usize) -> Result<(), RosterError> {
    let text = render_roster(roster.records(), indent)?;
    std::fs::write(path, text)
        .map_err(|e| RosterError::Io(format!("cannot write {}: {e}", path.display())))
}
