use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reference data for a single airport, keyed by ICAO code in the index.
///
/// Loaded once per session and treated as read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportRecord {
    #[serde(rename = "lat")]
    pub latitude_deg: f64,
    #[serde(rename = "lon")]
    pub longitude_deg: f64,
    pub city: String,
    /// ISO 3166-1 alpha-2 country code, e.g. "IL"
    pub country: String,
    pub name: String,
    /// IANA timezone identifier, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// A search hit returned by [`AirportIndex::search`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AirportSearchHit {
    pub icao: String,
    pub name: String,
    pub city: String,
    pub country: String,
}

/// Immutable ICAO-keyed airport lookup built from a JSON object of
/// `{"ICAO": {lat, lon, city, country, name}, ...}` records.
#[derive(Debug, Clone, Default)]
pub struct AirportIndex {
    airports: HashMap<String, AirportRecord>,
}

impl AirportIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the index from a JSON file.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::open(path.as_ref())
            .with_context(|| format!("Opening airport database {:?}", path.as_ref()))?;
        let airports: HashMap<String, AirportRecord> = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("Parsing airport database {:?}", path.as_ref()))?;
        Ok(Self { airports })
    }

    /// Parse the index from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let airports: HashMap<String, AirportRecord> =
            serde_json::from_str(json).context("Parsing airport database JSON")?;
        Ok(Self { airports })
    }

    pub fn insert(&mut self, icao: &str, record: AirportRecord) {
        self.airports.insert(icao.trim().to_uppercase(), record);
    }

    /// Look up an airport by code. Matching is case-insensitive.
    pub fn get(&self, code: &str) -> Option<&AirportRecord> {
        self.airports.get(&code.trim().to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Search airports by ICAO prefix or name/city substring.
    ///
    /// ICAO prefix hits come first, with an exact ICAO match floated to the
    /// top; name/city substring hits follow. Results are capped at `limit`.
    pub fn search(&self, query: &str, limit: usize) -> Vec<AirportSearchHit> {
        let q = query.trim();
        if q.len() < 2 {
            return Vec::new();
        }
        let q_upper = q.to_uppercase();
        let q_lower = q.to_lowercase();

        let mut icao_hits: Vec<AirportSearchHit> = Vec::new();
        let mut name_hits: Vec<AirportSearchHit> = Vec::new();

        for (icao, rec) in &self.airports {
            let hit = AirportSearchHit {
                icao: icao.clone(),
                name: rec.name.clone(),
                city: rec.city.clone(),
                country: rec.country.clone(),
            };
            if icao.starts_with(&q_upper) {
                icao_hits.push(hit);
            } else if rec.name.to_lowercase().contains(&q_lower)
                || rec.city.to_lowercase().contains(&q_lower)
            {
                name_hits.push(hit);
            }
        }

        icao_hits.sort_by(|a, b| {
            if a.icao == q_upper {
                return std::cmp::Ordering::Less;
            }
            if b.icao == q_upper {
                return std::cmp::Ordering::Greater;
            }
            a.icao.cmp(&b.icao)
        });
        name_hits.sort_by(|a, b| a.icao.cmp(&b.icao));

        icao_hits.into_iter().chain(name_hits).take(limit).collect()
    }
}

/// Validate and normalize a user-supplied ICAO code: exactly 4 ASCII
/// letters, upper-cased. Returns `None` for anything else.
pub fn clean_icao(input: &str) -> Option<String> {
    let v = input.trim().to_uppercase();
    if v.len() == 4 && v.chars().all(|c| c.is_ascii_uppercase()) {
        Some(v)
    } else {
        None
    }
}
