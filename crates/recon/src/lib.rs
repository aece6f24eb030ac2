//! `roster-recon`: organization roster reconciliation.
//!
//! Pure engine crate: receives a loaded roster and CRM report rows, works
//! out what was added, dropped, renamed or re-tagged upstream, and applies
//! it to the roster. Geocoding is behind the [`Geocoder`] trait.

pub mod config;
pub mod engine;
pub mod error;
pub mod geocode;
pub mod matcher;
pub mod model;
pub mod report;
pub mod roster;
pub mod store;
pub mod tags;

pub use config::SyncConfig;
pub use engine::{run, SyncSummary};
pub use error::RosterError;
pub use geocode::{GeocodeError, Geocoder, NullGeocoder};
pub use model::{Coordinates, NewOrganization, OrganizationRecord, Rename, ReportRow};
pub use roster::Roster;
