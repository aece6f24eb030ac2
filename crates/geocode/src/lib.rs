//! Nominatim geocoder.
//!
//! Blocking reqwest client (no Tokio runtime required). One request per
//! lookup, no retries: a failed lookup just leaves coordinates unset.

use std::time::Duration;

use roster_recon::config::GeocoderConfig;
use roster_recon::{Coordinates, GeocodeError, Geocoder};
use serde::Deserialize;

const DEFAULT_USER_AGENT: &str = concat!("roster-sync/", env!("CARGO_PKG_VERSION"));

/// Geocoder backed by a Nominatim-compatible `/search` endpoint.
#[derive(Clone)]
pub struct NominatimGeocoder {
    http: reqwest::blocking::Client,
    endpoint: String,
}

/// One search hit. Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimGeocoder {
    pub fn new(endpoint: &str, timeout: Duration, user_agent: Option<&str>) -> Result<Self, GeocodeError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .timeout(timeout)
            .build()
            .map_err(|e| GeocodeError::Network(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn from_config(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        Self::new(
            &config.endpoint,
            Duration::from_secs(config.timeout_secs),
            config.user_agent.as_deref(),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Geocoder for NominatimGeocoder {
    fn locate(&self, place: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(GeocodeError::Http(status.as_u16(), body));
        }

        let places: Vec<Place> = resp.json().map_err(|e| GeocodeError::Parse(e.to_string()))?;
        let Some(first) = places.into_iter().next() else {
            return Ok(None);
        };

        log::debug!(
            "'{}' resolved to {}",
            place,
            first.display_name.as_deref().unwrap_or("(unnamed place)")
        );
        Ok(Some(Coordinates {
            latitude: first.lat,
            longitude: first.lon,
        }))
    }
}
