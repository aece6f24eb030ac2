use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::tags::render_type;

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// One organization in the roster document.
///
/// Field order here is the order fields are written back out. Fields the
/// roster carries that this struct does not model are kept in `extra` and
/// written after the known fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub events_url: Option<String>,
    #[serde(default)]
    pub projects_list_url: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub longitude: Option<String>,
    /// Always `tags` joined by ", ". Use [`OrganizationRecord::set_tags`].
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub social_profiles: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub previous_names: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl OrganizationRecord {
    /// Bare record with no URLs, location or tags.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            website: None,
            events_url: None,
            projects_list_url: None,
            city: None,
            latitude: None,
            longitude: None,
            kind: String::new(),
            tags: BTreeSet::new(),
            social_profiles: BTreeMap::new(),
            previous_names: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Replace the tag set and re-derive `type`.
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self.sync_kind();
    }

    /// Re-derive `type` from the current tags.
    pub fn sync_kind(&mut self) {
        self.kind = render_type(&self.tags);
    }
}

/// Coordinates come back from geocoders as decimal strings and are stored that way.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number coordinate, got {other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Column headers the CRM export must carry, in export order.
pub const REPORT_COLUMNS: [&str; 8] = [
    "Account Name",
    "Website",
    "MeetUp Link",
    "Github URL",
    "Brigade Location",
    "Organization Twitter",
    "Facebook Page URL",
    "Brigade Type",
];

/// One row of the CRM export. Blank cells deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "Account Name")]
    pub account_name: String,
    #[serde(rename = "Website", default)]
    pub website: String,
    #[serde(rename = "MeetUp Link", default)]
    pub meetup_link: String,
    #[serde(rename = "Github URL", default)]
    pub github_url: String,
    #[serde(rename = "Brigade Location", default)]
    pub brigade_location: String,
    #[serde(rename = "Organization Twitter", default)]
    pub twitter: String,
    #[serde(rename = "Facebook Page URL", default)]
    pub facebook: String,
    #[serde(rename = "Brigade Type", default)]
    pub brigade_type: String,
}

impl ReportRow {
    pub fn named(account_name: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            ..Self::default()
        }
    }
}

/// `None` for blank or whitespace-only cells.
pub(crate) fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

// ---------------------------------------------------------------------------
// Operation inputs / outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

/// A roster record that reappears in the report under a new name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Rename {
    pub old_name: String,
    pub new_name: String,
}

impl Rename {
    pub fn new(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            old_name: old_name.into(),
            new_name: new_name.into(),
        }
    }
}

/// Fields needed to add an organization to the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewOrganization {
    pub name: String,
    pub website: Option<String>,
    pub events_url: Option<String>,
    pub projects_list_url: Option<String>,
    pub city: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub previous_names: Vec<String>,
}

impl From<&ReportRow> for NewOrganization {
    fn from(row: &ReportRow) -> Self {
        let owned = |v: &str| non_empty(v).map(str::to_string);
        Self {
            name: row.account_name.clone(),
            website: owned(&row.website),
            events_url: owned(&row.meetup_link),
            projects_list_url: owned(&row.github_url),
            city: owned(&row.brigade_location),
            twitter: owned(&row.twitter),
            facebook: owned(&row.facebook),
            previous_names: Vec::new(),
        }
    }
}
