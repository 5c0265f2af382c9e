//! SimBrief dispatch deep links.
//!
//! Builds a `dispatch.simbrief.com/options/custom` URL from a departure
//! row. Every optional input independently controls the presence of its
//! query parameter; a missing one never blocks the others.

use chrono::{DateTime, Datelike, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

const DISPATCH_URL: &str = "https://dispatch.simbrief.com/options/custom";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Leading 2-3 character carrier code, optionally followed by whitespace
static CARRIER_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[A-Z0-9]{2,3}\s*").unwrap());

/// Inputs for one deep link. Only origin and destination are required.
#[derive(Debug, Clone, Default)]
pub struct SimBriefLink {
    pub origin: String,
    pub destination: String,
    pub departure: Option<DateTime<Utc>>,
    pub duration_mins: Option<i64>,
    pub airline_icao: Option<String>,
    pub flight_number: Option<String>,
    /// ICAO aircraft type code, e.g. "A359"
    pub base_type: Option<String>,
    /// SimBrief saved-airframe internal ID
    pub airframe_id: Option<String>,
}

/// Extract the numeric part of a flight number by stripping the carrier
/// prefix: `"UA 91"` becomes `"91"`. A bare numeric flight number passes
/// through unchanged; a prefix-only or empty string yields `None`.
fn flight_number_digits(number: &str) -> Option<String> {
    let trimmed = number.trim();
    if trimmed.is_empty() {
        return None;
    }
    let stripped = CARRIER_PREFIX_RE.replace(trimmed, "");
    if !stripped.is_empty() {
        return Some(stripped.into_owned());
    }
    // Short all-numeric flight numbers look like a carrier code to the
    // prefix pattern; they are already the digits we want
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Some(trimmed.to_string());
    }
    None
}

/// Format a departure instant the way the dispatch form expects:
/// `"DD Mon YYYY - HH:MM"` in UTC.
fn format_dispatch_date(instant: DateTime<Utc>) -> String {
    format!(
        "{:02} {} {} - {:02}:{:02}",
        instant.day(),
        MONTHS[instant.month0() as usize],
        instant.year(),
        instant.hour(),
        instant.minute()
    )
}

impl SimBriefLink {
    pub fn new(origin: &str, destination: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            ..Default::default()
        }
    }

    /// Assemble the deep-link URL.
    pub fn build(&self) -> Url {
        // The base URL is a compile-time constant and always parses
        let mut url = Url::parse(DISPATCH_URL).expect("dispatch base URL is valid");
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("orig", &self.origin);
            q.append_pair("dest", &self.destination);

            if let Some(airline) = &self.airline_icao {
                q.append_pair("airline", airline);
            }
            if let Some(digits) = self
                .flight_number
                .as_deref()
                .and_then(flight_number_digits)
            {
                q.append_pair("fltnum", &digits);
            }
            if let Some(base_type) = &self.base_type {
                q.append_pair("basetype", base_type);
            }
            if let Some(airframe_id) = &self.airframe_id {
                q.append_pair("type", airframe_id);
            }
            if let Some(dep) = self.departure {
                q.append_pair("date", &format_dispatch_date(dep));
            }
            if let Some(mins) = self.duration_mins
                && mins > 0
            {
                let h = mins / 60;
                let m = mins % 60;
                q.append_pair("stehour", &(h * 3600).to_string());
                q.append_pair("stemin", &(m * 60).to_string());
            }
        }
        url
    }
}
