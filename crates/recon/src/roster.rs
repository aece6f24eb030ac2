use std::cmp::Ordering;

use crate::error::RosterError;
use crate::geocode::{resolve_coordinates, Geocoder};
use crate::model::{NewOrganization, OrganizationRecord, Rename, ReportRow};
use crate::tags::{compute_official_tags, strip_official_tags, OFFICIAL_BASE_TAGS};

/// The organization roster, kept sorted by name with names unique.
///
/// All mutation goes through name lookups (binary search), never through
/// positions handed out earlier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    records: Vec<OrganizationRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from loaded records.
    ///
    /// Unsorted input is re-sorted (stable) with a warning. Duplicate names
    /// are rejected. Every record's `type` is re-derived from its tags.
    pub fn from_records(mut records: Vec<OrganizationRecord>) -> Result<Self, RosterError> {
        if !records.windows(2).all(|w| compare_names(&w[0], &w[1]) != Ordering::Greater) {
            log::warn!("roster is not sorted by name; sorting {} records", records.len());
            records.sort_by(compare_names);
        }

        if let Some(w) = records.windows(2).find(|w| w[0].name == w[1].name) {
            return Err(RosterError::DuplicateName(w[0].name.clone()));
        }

        for record in &mut records {
            let stored = std::mem::take(&mut record.kind);
            record.sync_kind();
            if stored != record.kind {
                log::debug!("'{}': type '{}' rewritten as '{}'", record.name, stored, record.kind);
            }
        }

        Ok(Self { records })
    }

    fn search(&self, name: &str) -> Result<usize, usize> {
        self.records
            .binary_search_by(|r| r.name.as_str().cmp(name))
    }

    pub fn get(&self, name: &str) -> Option<&OrganizationRecord> {
        self.search(name).ok().map(|i| &self.records[i])
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut OrganizationRecord> {
        match self.search(name) {
            Ok(i) => Some(&mut self.records[i]),
            Err(_) => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.search(name).is_ok()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    pub fn records(&self) -> &[OrganizationRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<OrganizationRecord> {
        self.records
    }

    /// Insert a new official record at its sorted position.
    ///
    /// Coordinates are looked up when a city is given; a failed or empty
    /// lookup leaves both unset.
    pub fn apply_add(&mut self, org: NewOrganization, geocoder: &dyn Geocoder) -> Result<(), RosterError> {
        let index = match self.search(&org.name) {
            Ok(_) => return Err(RosterError::DuplicateName(org.name)),
            Err(i) => i,
        };

        let mut record = OrganizationRecord::named(org.name);
        record.website = org.website;
        record.events_url = org.events_url;
        record.projects_list_url = org.projects_list_url;
        record.previous_names = org.previous_names;

        if let Some(city) = org.city {
            if let Some(coords) = resolve_coordinates(geocoder, &city) {
                record.latitude = Some(coords.latitude);
                record.longitude = Some(coords.longitude);
            }
            record.city = Some(city);
        }

        if let Some(facebook) = org.facebook {
            record.social_profiles.insert("facebook".into(), facebook);
        }
        if let Some(twitter) = org.twitter {
            record.social_profiles.insert("twitter".into(), twitter);
        }

        record.set_tags(OFFICIAL_BASE_TAGS);

        log::info!("adding '{}'", record.name);
        self.records.insert(index, record);
        Ok(())
    }

    /// Drop a record's official status, or delete it outright when `full`.
    pub fn apply_remove(&mut self, name: &str, full: bool) -> Result<(), RosterError> {
        let index = self
            .search(name)
            .map_err(|_| RosterError::RecordNotFound(name.to_string()))?;

        if full {
            log::info!("deleting '{}'", name);
            self.records.remove(index);
        } else {
            log::info!("removing official tags from '{}'", name);
            let record = &mut self.records[index];
            strip_official_tags(&mut record.tags);
            record.sync_kind();
        }
        Ok(())
    }

    /// Replace `old_name` with a record built from the report row for
    /// `new_name`, carrying previous names forward.
    pub fn apply_rename(
        &mut self,
        rename: &Rename,
        report: &[ReportRow],
        geocoder: &dyn Geocoder,
    ) -> Result<(), RosterError> {
        let row = report
            .iter()
            .find(|r| r.account_name == rename.new_name)
            .ok_or_else(|| RosterError::ReportRowNotFound(rename.new_name.clone()))?;

        let old = self
            .get(&rename.old_name)
            .ok_or_else(|| RosterError::RecordNotFound(rename.old_name.clone()))?;
        let mut previous_names = old.previous_names.clone();
        previous_names.push(rename.old_name.clone());

        log::info!("renaming '{}' to '{}'", rename.old_name, rename.new_name);
        self.apply_remove(&rename.old_name, true)?;

        let mut org = NewOrganization::from(row);
        org.previous_names = previous_names;
        self.apply_add(org, geocoder)
    }

    /// Overwrite a record's tags with what its report row implies.
    pub fn apply_tag_update(&mut self, row: &ReportRow) -> Result<(), RosterError> {
        let record = self
            .get_mut(&row.account_name)
            .ok_or_else(|| RosterError::RecordNotFound(row.account_name.clone()))?;
        let tags = compute_official_tags(row);
        log::info!("updating tags of '{}' to [{}]", record.name, tags.join(", "));
        record.set_tags(tags);
        Ok(())
    }
}

/// Name order used for the roster. Plain code-point order.
pub fn compare_names(a: &OrganizationRecord, b: &OrganizationRecord) -> Ordering {
    a.name.cmp(&b.name)
}
