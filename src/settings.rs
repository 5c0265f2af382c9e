//! User settings: default airport and saved aircraft profiles.
//!
//! Settings are an explicit value handed to the CLI boundary, never ambient
//! state the core reaches for. Loading merges a TOML file over the built-in
//! defaults (absent fields keep their default), saving writes the full
//! document back.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A saved aircraft profile for SimBrief dispatch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Aircraft {
    pub name: String,
    /// ICAO type code, e.g. "A359"; empty to omit from the deep link
    pub base_type: String,
    /// SimBrief saved-airframe ID; empty to omit from the deep link
    pub airframe_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserSettings {
    /// Pre-filled departure airport ICAO
    pub default_airport: String,
    pub active_aircraft_index: usize,
    pub aircraft: Vec<Aircraft>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            default_airport: "LLBG".to_string(),
            active_aircraft_index: 0,
            aircraft: vec![Aircraft {
                name: "A359 iniBuilds".to_string(),
                base_type: "A359".to_string(),
                airframe_id: "1289435_1771861149220".to_string(),
            }],
        }
    }
}

impl UserSettings {
    /// Load settings from a TOML file, merging over the defaults. A missing
    /// file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Reading settings file {:?}", path))?;
        toml::from_str(&raw).with_context(|| format!("Parsing settings file {:?}", path))
    }

    /// Write settings back to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let raw = toml::to_string_pretty(self).context("Serializing settings")?;
        fs::write(path, raw).with_context(|| format!("Writing settings file {:?}", path))
    }

    /// The currently selected aircraft profile, if the index is valid.
    pub fn active_aircraft(&self) -> Option<&Aircraft> {
        self.aircraft.get(self.active_aircraft_index)
    }

    /// `Some(value)` for a non-empty string field, `None` otherwise.
    /// Empty profile fields mean "omit from the deep link".
    pub fn non_empty(value: &str) -> Option<&str> {
        let v = value.trim();
        if v.is_empty() { None } else { Some(v) }
    }
}
