//! Place-name lookup seam. The HTTP implementation lives in `roster-geocode`.

use std::fmt;

use crate::model::Coordinates;

/// Error type for geocoder lookups.
#[derive(Debug)]
pub enum GeocodeError {
    /// Request never got a response (DNS, connect, timeout).
    Network(String),
    /// Service answered with a non-success status.
    Http(u16, String),
    /// Response body was not what the service promised.
    Parse(String),
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeError::Network(msg) => write!(f, "network error: {}", msg),
            GeocodeError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            GeocodeError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for GeocodeError {}

/// Resolves a free-text place name to coordinates.
pub trait Geocoder {
    /// `Ok(None)` when the service has no match for `place`.
    fn locate(&self, place: &str) -> Result<Option<Coordinates>, GeocodeError>;
}

/// Geocoder for offline runs: never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGeocoder;

impl Geocoder for NullGeocoder {
    fn locate(&self, _place: &str) -> Result<Option<Coordinates>, GeocodeError> {
        Ok(None)
    }
}

/// Look up `place`, folding errors and empty results into `None`.
pub fn resolve_coordinates(geocoder: &dyn Geocoder, place: &str) -> Option<Coordinates> {
    match geocoder.locate(place) {
        Ok(Some(coords)) => {
            log::debug!("geocoded '{}' to {},{}", place, coords.latitude, coords.longitude);
            Some(coords)
        }
        Ok(None) => {
            log::warn!("no geocoding result for '{}'", place);
            None
        }
        Err(e) => {
            log::warn!("geocoding '{}' failed: {}", place, e);
            None
        }
    }
}
