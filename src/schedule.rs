//! Serde models for the raw departure-schedule feed.
//!
//! The feed (AeroDataBox-shaped) is loosely structured: nearly every field
//! is optional, timestamps come in two spellings, and the departure list
//! has shipped under three different envelopes over time. These models
//! absorb all of that so the aggregator works from a single flat list.

use serde::{Deserialize, Serialize};

/// A scheduled time as supplied by the feed: a UTC string and/or a local
/// string with a trailing `±HH:MM` offset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTime {
    pub utc: Option<String>,
    pub local: Option<String>,
}

/// Departure half of a raw entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeparture {
    pub scheduled_time: Option<ScheduledTime>,
    pub terminal: Option<String>,
}

/// Destination airport as described by the feed itself (not the local
/// reference data).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedAirport {
    pub icao: Option<String>,
    pub iata: Option<String>,
    pub country_code: Option<String>,
    pub time_zone: Option<String>,
}

/// Arrival half of a raw entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArrival {
    pub airport: Option<FeedAirport>,
    pub scheduled_time: Option<ScheduledTime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAirline {
    pub name: Option<String>,
    pub iata: Option<String>,
    pub icao: Option<String>,
}

/// One raw flight entry as received from the feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFlightEntry {
    pub departure: Option<RawDeparture>,
    pub arrival: Option<RawArrival>,
    pub number: Option<String>,
    pub airline: Option<RawAirline>,
}

/// The `departures` field has been observed both as a bare array and as an
/// object wrapping an `items` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DepartureList {
    Flat(Vec<RawFlightEntry>),
    Wrapped { items: Option<Vec<RawFlightEntry>> },
}

/// Top-level schedule feed response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleFeed {
    pub error: Option<String>,
    pub departures: Option<DepartureList>,
    /// Legacy envelope used by older feed versions
    pub departing: Option<Vec<RawFlightEntry>>,
}

impl ScheduleFeed {
    /// Flatten whichever envelope the feed used into a single entry list.
    ///
    /// Precedence: `departures` as array, then `departures.items`, then the
    /// legacy `departing` list, then empty.
    pub fn entries(&self) -> &[RawFlightEntry] {
        match &self.departures {
            Some(DepartureList::Flat(list)) => list,
            Some(DepartureList::Wrapped { items: Some(items) }) => items,
            Some(DepartureList::Wrapped { items: None }) | None => {
                self.departing.as_deref().unwrap_or(&[])
            }
        }
    }
}
