use std::collections::BTreeSet;

use crate::model::{OrganizationRecord, ReportRow};

pub const TAG_BRIGADE: &str = "Brigade";
pub const TAG_OFFICIAL: &str = "Official";
pub const TAG_CFA: &str = "Code for America";
pub const TAG_FISCALLY_SPONSORED: &str = "Code for America Fiscally Sponsored Brigade";
pub const TAG_PARTNER: &str = "Code for America Partner Brigade";

/// `Brigade Type` values in the report that carry an extra tag.
pub const BRIGADE_TYPE_FISCALLY_SPONSORED: &str = "Fiscally Sponsored Brigade";
pub const BRIGADE_TYPE_PARTNER: &str = "Partner";

/// Every official record carries at least these.
pub const OFFICIAL_BASE_TAGS: [&str; 3] = [TAG_BRIGADE, TAG_OFFICIAL, TAG_CFA];

/// Tags removed when a record drops out of the report. `Brigade` stays.
pub const OFFICIAL_ONLY_TAGS: [&str; 4] = [TAG_OFFICIAL, TAG_CFA, TAG_FISCALLY_SPONSORED, TAG_PARTNER];

/// True iff the record carries all of the base official tags.
pub fn classify_official(record: &OrganizationRecord) -> bool {
    OFFICIAL_BASE_TAGS.iter().all(|t| record.tags.contains(*t))
}

/// The tag set a report row says its organization should have, sorted.
pub fn compute_official_tags(row: &ReportRow) -> Vec<String> {
    let mut tags: BTreeSet<&str> = OFFICIAL_BASE_TAGS.into_iter().collect();
    match row.brigade_type.as_str() {
        BRIGADE_TYPE_FISCALLY_SPONSORED => {
            tags.insert(TAG_FISCALLY_SPONSORED);
        }
        BRIGADE_TYPE_PARTNER => {
            tags.insert(TAG_PARTNER);
        }
        _ => {}
    }
    tags.into_iter().map(str::to_string).collect()
}

/// Remove the official and sponsorship tags, leaving anything else alone.
pub fn strip_official_tags(tags: &mut BTreeSet<String>) {
    for tag in OFFICIAL_ONLY_TAGS {
        tags.remove(tag);
    }
}

/// Rendering of the tag set stored in a record's `type` field.
pub fn render_type<S: AsRef<str>>(tags: impl IntoIterator<Item = S>) -> String {
    tags.into_iter()
        .map(|t| t.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
