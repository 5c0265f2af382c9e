//! Flight-schedule aggregation.
//!
//! Normalizes raw schedule entries into canonical [`Row`] records: parses
//! the feed's loose UTC timestamp spellings, resolves destination codes and
//! countries, fills missing arrival timing from great-circle geometry, and
//! filters the list down to international departures.
//!
//! Every step degrades locally. A malformed timestamp becomes `None`, an
//! unknown airport just disables the affected derivations, and no entry can
//! abort processing of its siblings.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use tracing::debug;

use crate::airports::{AirportIndex, AirportRecord};
use crate::geometry::haversine_distance_km;
use crate::schedule::{RawFlightEntry, ScheduleFeed};

/// Assumed cruise speed for duration estimates (~480 kt).
pub const CRUISE_SPEED_KMH: f64 = 889.0;

/// Fixed climb/descent overhead added to every duration estimate.
pub const CLIMB_DESCENT_OVERHEAD_MINS: i64 = 30;

/// Destination airport code as resolved from a raw entry: ICAO preferred,
/// IATA as fallback, or unknown when the feed supplied neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationCode {
    Icao(String),
    Iata(String),
    Unknown,
}

impl DestinationCode {
    /// The code string, if any kind of code was present.
    pub fn code(&self) -> Option<&str> {
        match self {
            DestinationCode::Icao(c) | DestinationCode::Iata(c) => Some(c),
            DestinationCode::Unknown => None,
        }
    }
}

/// A canonical departure row derived from one raw feed entry.
///
/// Rows are ephemeral: recomputed in full on every query, never persisted.
/// Either a real scheduled arrival is carried (`arrival`) or an estimated
/// duration (`est_mins`) — never both, so each row has at most one active
/// estimate basis.
#[derive(Debug, Clone)]
pub struct Row {
    pub dest: DestinationCode,
    pub dest_city: Option<String>,
    /// ISO 3166-1 alpha-2, upper-cased
    pub dest_country: Option<String>,
    pub dest_timezone: Option<String>,
    pub number: Option<String>,
    pub airline_name: Option<String>,
    pub airline_icao: Option<String>,
    pub departure: Option<DateTime<Utc>>,
    /// Real scheduled arrival from the feed
    pub arrival: Option<DateTime<Utc>>,
    /// Great-circle duration estimate, only when no real arrival is present
    pub est_mins: Option<i64>,
}

impl Row {
    /// The arrival instant to display, and whether it is an estimate.
    pub fn arrival_instant(&self) -> Option<(DateTime<Utc>, bool)> {
        if let Some(arr) = self.arrival {
            return Some((arr, false));
        }
        match (self.departure, self.est_mins) {
            (Some(dep), Some(mins)) => Some((dep + Duration::minutes(mins), true)),
            _ => None,
        }
    }

    /// Flight duration in minutes, and whether it is an estimate.
    pub fn duration_mins(&self) -> Option<(i64, bool)> {
        if let (Some(dep), Some(arr)) = (self.departure, self.arrival) {
            let secs = (arr - dep).num_seconds();
            return Some(((secs as f64 / 60.0).round() as i64, false));
        }
        self.est_mins.map(|m| (m, true))
    }
}

/// Normalize a feed UTC timestamp string to a parsed instant.
///
/// The feed emits both `"2026-02-23 21:10"` and `"2026-02-23T21:10Z"`; the
/// space separator is replaced with `T` and a missing `Z` suffix appended
/// before parsing. Unparseable input resolves to `None`, never an error.
pub fn normalize_utc(s: &str) -> Option<DateTime<Utc>> {
    let t = s.trim().replace(' ', "T");
    if t.is_empty() {
        return None;
    }
    let t = t.strip_suffix('Z').unwrap_or(&t);

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(t, fmt) {
            return Some(naive.and_utc());
        }
    }
    debug!("Unparseable UTC timestamp in feed: {:?}", s);
    None
}

/// Estimated block time in minutes for a great-circle distance.
pub fn estimate_duration_mins(distance_km: f64) -> i64 {
    (distance_km / CRUISE_SPEED_KMH * 60.0).round() as i64 + CLIMB_DESCENT_OVERHEAD_MINS
}

fn build_row(
    entry: &RawFlightEntry,
    origin: Option<&AirportRecord>,
    index: &AirportIndex,
) -> Row {
    let departure = entry
        .departure
        .as_ref()
        .and_then(|d| d.scheduled_time.as_ref())
        .and_then(|t| t.utc.as_deref())
        .and_then(normalize_utc);
    let arrival = entry
        .arrival
        .as_ref()
        .and_then(|a| a.scheduled_time.as_ref())
        .and_then(|t| t.utc.as_deref())
        .and_then(normalize_utc);

    let feed_airport = entry.arrival.as_ref().and_then(|a| a.airport.as_ref());
    let dest = match feed_airport {
        Some(ap) => match (&ap.icao, &ap.iata) {
            (Some(icao), _) => DestinationCode::Icao(icao.trim().to_uppercase()),
            (None, Some(iata)) => DestinationCode::Iata(iata.trim().to_uppercase()),
            (None, None) => DestinationCode::Unknown,
        },
        None => DestinationCode::Unknown,
    };

    let dest_record = dest.code().and_then(|c| index.get(c));

    // Feed-supplied country wins; fall back to the local reference data
    let dest_country = feed_airport
        .and_then(|ap| ap.country_code.as_deref())
        .map(|c| c.trim().to_uppercase())
        .or_else(|| dest_record.map(|r| r.country.to_uppercase()));

    let est_mins = if arrival.is_none() {
        match (origin, dest_record) {
            (Some(o), Some(d)) => {
                let km = haversine_distance_km(
                    o.latitude_deg,
                    o.longitude_deg,
                    d.latitude_deg,
                    d.longitude_deg,
                );
                Some(estimate_duration_mins(km))
            }
            _ => None,
        }
    } else {
        None
    };

    Row {
        dest,
        dest_city: dest_record.map(|r| r.city.clone()),
        dest_country,
        dest_timezone: feed_airport.and_then(|ap| ap.time_zone.clone()),
        number: entry.number.clone(),
        airline_name: entry.airline.as_ref().and_then(|a| a.name.clone()),
        airline_icao: entry.airline.as_ref().and_then(|a| a.icao.clone()),
        departure,
        arrival,
        est_mins,
    }
}

/// Aggregate a raw schedule feed into international departure rows.
///
/// `origin` is the queried airport's reference record, when resolvable.
/// A row is excluded exactly when both the origin and destination country
/// are known and equal (a domestic flight); ambiguous data defaults to
/// inclusion.
pub fn aggregate_departures(
    feed: &ScheduleFeed,
    origin: Option<&AirportRecord>,
    index: &AirportIndex,
) -> Vec<Row> {
    let origin_country = origin.map(|o| o.country.to_uppercase());

    let rows: Vec<Row> = feed
        .entries()
        .iter()
        .map(|entry| build_row(entry, origin, index))
        .filter(|row| match (&origin_country, &row.dest_country) {
            (Some(oc), Some(dc)) => oc != dc,
            _ => true,
        })
        .collect();

    debug!(
        "Aggregated {} international rows from {} raw entries",
        rows.len(),
        feed.entries().len()
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airports::AirportRecord;
    use chrono::TimeZone;

    fn airport(lat: f64, lon: f64, city: &str, country: &str) -> AirportRecord {
        AirportRecord {
            latitude_deg: lat,
            longitude_deg: lon,
            city: city.to_string(),
            country: country.to_string(),
            name: format!("{} Airport", city),
            timezone: None,
        }
    }

    fn sample_index() -> AirportIndex {
        let mut index = AirportIndex::new();
        index.insert("LLBG", airport(32.0114, 34.8867, "Tel Aviv", "IL"));
        index.insert("EGLL", airport(51.4700, -0.4543, "London", "GB"));
        index.insert("LLER", airport(29.7234, 35.0115, "Eilat", "IL"));
        index
    }

    fn feed_from(json: &str) -> ScheduleFeed {
        serde_json::from_str(json).expect("Failed to parse test feed")
    }

    #[test]
    fn test_normalize_utc_spellings() {
        let space = normalize_utc("2026-02-23 21:10").expect("space separator should parse");
        let iso = normalize_utc("2026-02-23T21:10Z").expect("ISO form should parse");
        assert_eq!(space, iso);
        assert_eq!(space, Utc.with_ymd_and_hms(2026, 2, 23, 21, 10, 0).unwrap());

        assert!(normalize_utc("2026-02-23T21:10:45Z").is_some());
        assert!(normalize_utc("not a date").is_none());
        assert!(normalize_utc("").is_none());
    }

    #[test]
    fn test_estimate_duration() {
        // ~5,000 km leg
        assert_eq!(estimate_duration_mins(5000.0), 367);
        // Antipodal pair, half the Earth's circumference
        assert_eq!(estimate_duration_mins(20015.0), 1381);
    }

    #[test]
    fn test_domestic_flight_excluded() {
        let index = sample_index();
        let feed = feed_from(
            r#"{"departures": [
                {"arrival": {"airport": {"icao": "LLER", "countryCode": "IL"}}},
                {"arrival": {"airport": {"icao": "EGLL", "countryCode": "GB"}}}
            ]}"#,
        );
        let rows = aggregate_departures(&feed, index.get("LLBG"), &index);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].dest.code(), Some("EGLL"));
    }

    #[test]
    fn test_unknown_country_retained() {
        let index = sample_index();
        // No feed country and no reference record for the destination
        let feed = feed_from(r#"{"departures": [{"arrival": {"airport": {"icao": "ZZZZ"}}}]}"#);
        let rows = aggregate_departures(&feed, index.get("LLBG"), &index);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].dest_country.is_none());
    }

    #[test]
    fn test_unknown_origin_retains_all() {
        let index = sample_index();
        let feed = feed_from(
            r#"{"departures": [{"arrival": {"airport": {"icao": "LLER", "countryCode": "IL"}}}]}"#,
        );
        let rows = aggregate_departures(&feed, None, &index);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_country_falls_back_to_reference_data() {
        let index = sample_index();
        // Feed omits countryCode, reference data knows EGLL is in GB
        let feed = feed_from(r#"{"departures": [{"arrival": {"airport": {"icao": "EGLL"}}}]}"#);
        let rows = aggregate_departures(&feed, index.get("LLBG"), &index);
        assert_eq!(rows[0].dest_country.as_deref(), Some("GB"));
    }

    #[test]
    fn test_iata_fallback_and_unknown_sentinel() {
        let index = sample_index();
        let feed = feed_from(
            r#"{"departures": [
                {"arrival": {"airport": {"iata": "lhr"}}},
                {"arrival": {"airport": {}}},
                {}
            ]}"#,
        );
        let rows = aggregate_departures(&feed, None, &index);
        assert_eq!(rows[0].dest, DestinationCode::Iata("LHR".to_string()));
        assert_eq!(rows[1].dest, DestinationCode::Unknown);
        assert_eq!(rows[2].dest, DestinationCode::Unknown);
    }

    #[test]
    fn test_real_arrival_preferred_over_estimate() {
        let index = sample_index();
        let feed = feed_from(
            r#"{"departures": [{
                "departure": {"scheduledTime": {"utc": "2026-02-23 21:10"}},
                "arrival": {
                    "airport": {"icao": "EGLL", "countryCode": "GB"},
                    "scheduledTime": {"utc": "2026-02-24 02:25"}
                }
            }]}"#,
        );
        let rows = aggregate_departures(&feed, index.get("LLBG"), &index);
        let row = &rows[0];

        assert!(row.est_mins.is_none());
        let (arr, estimated) = row.arrival_instant().unwrap();
        assert!(!estimated);
        assert_eq!(arr, Utc.with_ymd_and_hms(2026, 2, 24, 2, 25, 0).unwrap());
        assert_eq!(row.duration_mins(), Some((315, false)));
    }

    #[test]
    fn test_missing_arrival_estimated_from_geometry() {
        let index = sample_index();
        let feed = feed_from(
            r#"{"departures": [{
                "departure": {"scheduledTime": {"utc": "2026-02-23 21:10"}},
                "arrival": {"airport": {"icao": "EGLL", "countryCode": "GB"}},
                "number": "LY 315"
            }]}"#,
        );
        let rows = aggregate_departures(&feed, index.get("LLBG"), &index);
        let row = &rows[0];

        // LLBG-EGLL is ~3590 km, so roughly 272 min including overhead
        let (mins, estimated) = row.duration_mins().unwrap();
        assert!(estimated);
        assert!((265..280).contains(&mins), "estimate {} min", mins);

        let (arr, estimated) = row.arrival_instant().unwrap();
        assert!(estimated);
        assert_eq!(arr, row.departure.unwrap() + Duration::minutes(mins));
    }

    #[test]
    fn test_malformed_entry_degrades_only_itself() {
        let index = sample_index();
        let feed = feed_from(
            r#"{"departures": [
                {"departure": {"scheduledTime": {"utc": "garbage"}},
                 "arrival": {"airport": {"icao": "EGLL", "countryCode": "GB"}}},
                {"departure": {"scheduledTime": {"utc": "2026-02-23 21:10"}},
                 "arrival": {"airport": {"icao": "EGLL", "countryCode": "GB"}}}
            ]}"#,
        );
        let rows = aggregate_departures(&feed, index.get("LLBG"), &index);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].departure.is_none());
        // The bad timestamp still leaves a usable duration estimate
        assert!(rows[0].est_mins.is_some());
        assert!(rows[0].arrival_instant().is_none());
        assert!(rows[1].departure.is_some());
    }
}
