use serde::Deserialize;

use crate::error::RosterError;
use crate::store::DEFAULT_INDENT;

pub const DEFAULT_GEOCODER_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_GEOCODER_TIMEOUT_SECS: u64 = 10;
const MAX_INDENT: usize = 8;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Run settings, read from an optional TOML file. Every key has a default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeocoderConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Sent with every lookup. Public Nominatim requires an identifying agent.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_endpoint(),
            timeout_secs: DEFAULT_GEOCODER_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { indent: DEFAULT_INDENT }
    }
}

fn default_true() -> bool {
    true
}

fn default_endpoint() -> String {
    DEFAULT_GEOCODER_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_GEOCODER_TIMEOUT_SECS
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

impl SyncConfig {
    pub fn from_toml(input: &str) -> Result<Self, RosterError> {
        let config: SyncConfig =
            toml::from_str(input).map_err(|e| RosterError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RosterError> {
        if self.geocoder.enabled {
            if self.geocoder.endpoint.trim().is_empty() {
                return Err(RosterError::ConfigValidation(
                    "geocoder.endpoint must not be empty".into(),
                ));
            }
            if self.geocoder.timeout_secs == 0 {
                return Err(RosterError::ConfigValidation(
                    "geocoder.timeout_secs must be greater than 0".into(),
                ));
            }
        }

        if self.output.indent > MAX_INDENT {
            return Err(RosterError::ConfigValidation(format!(
                "output.indent must be at most {MAX_INDENT}, got {}",
                self.output.indent
            )));
        }

        Ok(())
    }
}
