use std::collections::{HashMap, HashSet};

use crate::model::{non_empty, OrganizationRecord, ReportRow, Rename};
use crate::tags::{classify_official, compute_official_tags};

/// Compare two URLs ignoring a leading `http://` / `https://`.
/// Blank values never match, not even each other.
pub fn url_equivalent(a: &str, b: &str) -> bool {
    match (non_empty(a), non_empty(b)) {
        (Some(a), Some(b)) => strip_scheme(a) == strip_scheme(b),
        _ => false,
    }
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Report rows with no roster record of the same name, in report order.
/// A repeated account name keeps its first row only.
pub fn find_missing<'a>(records: &[OrganizationRecord], report: &'a [ReportRow]) -> Vec<&'a ReportRow> {
    let names: HashSet<&str> = records.iter().map(|r| r.name.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    report
        .iter()
        .filter(|row| !names.contains(row.account_name.as_str()))
        .filter(|row| {
            let first = seen.insert(row.account_name.as_str());
            if !first {
                log::warn!("report lists '{}' more than once; using the first row", row.account_name);
            }
            first
        })
        .collect()
}

/// Official roster records with no report row of the same name, in roster order.
pub fn find_extra<'a>(records: &'a [OrganizationRecord], report: &[ReportRow]) -> Vec<&'a OrganizationRecord> {
    let names: HashSet<&str> = report.iter().map(|r| r.account_name.as_str()).collect();
    records
        .iter()
        .filter(|r| classify_official(r) && !names.contains(r.name.as_str()))
        .collect()
}

/// Pair each missing row with a roster record sharing its website,
/// events URL or projects URL.
///
/// Pairs come back in first-seen order. Each roster record is renamed at
/// most once and each missing row names at most one record; later matches
/// on either side are skipped.
pub fn find_renamed(missing: &[&ReportRow], records: &[OrganizationRecord]) -> Vec<Rename> {
    let mut renames: Vec<Rename> = Vec::new();
    let mut claimed: HashMap<&str, &str> = HashMap::new();
    let mut taken: HashSet<&str> = HashSet::new();

    for row in missing {
        for record in records {
            if !shares_contact_url(record, row) {
                continue;
            }
            if let Some(new_name) = claimed.get(record.name.as_str()) {
                if *new_name != row.account_name {
                    log::warn!(
                        "'{}' also matches '{}', already renamed to '{}'; skipping",
                        row.account_name,
                        record.name,
                        new_name,
                    );
                }
                continue;
            }
            if !taken.insert(row.account_name.as_str()) {
                log::warn!(
                    "'{}' also matches '{}', already taken by another record; skipping",
                    row.account_name,
                    record.name,
                );
                continue;
            }
            claimed.insert(&record.name, &row.account_name);
            renames.push(Rename::new(&record.name, &row.account_name));
        }
    }

    renames
}

fn shares_contact_url(record: &OrganizationRecord, row: &ReportRow) -> bool {
    let pairs = [
        (&record.website, &row.website),
        (&record.events_url, &row.meetup_link),
        (&record.projects_list_url, &row.github_url),
    ];
    pairs.iter().any(|(ours, theirs)| {
        ours.as_deref()
            .map_or(false, |ours| url_equivalent(ours, theirs))
    })
}

/// Report rows whose roster record carries a different tag set than the
/// row implies. Rows without a roster record are skipped, and a repeated
/// account name is judged by its first row.
pub fn find_tag_updates<'a>(records: &[OrganizationRecord], report: &'a [ReportRow]) -> Vec<&'a ReportRow> {
    let by_name: HashMap<&str, &OrganizationRecord> =
        records.iter().map(|r| (r.name.as_str(), r)).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    report
        .iter()
        .filter(|row| seen.insert(row.account_name.as_str()))
        .filter(|row| {
            by_name.get(row.account_name.as_str()).map_or(false, |record| {
                !record.tags.iter().eq(compute_official_tags(row).iter())
            })
        })
        .collect()
}
