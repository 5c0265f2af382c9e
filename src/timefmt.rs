//! Time rendering for the departure table.
//!
//! A UTC instant is rendered under one of three display modes: the device's
//! local time, the airport's time, or Zulu. Airport zones come either from
//! the reference data (IANA identifiers, rendered via chrono-tz) or are
//! derived from the `±HH:MM` offset the feed appends to local-time strings.

use chrono::{DateTime, Local, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static OFFSET_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([+-]\d{2}:\d{2})$").unwrap());

/// Display mode for rendered times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeMode {
    /// Device-local time
    Local,
    /// The airport's own timezone, falling back to device-local
    Airport,
    /// UTC with a trailing "Z"
    Zulu,
}

fn fmt_with<Z: TimeZone>(instant: DateTime<Utc>, zone: &Z, hour12: bool) -> String
where
    Z::Offset: std::fmt::Display,
{
    let local = instant.with_timezone(zone);
    if hour12 {
        local.format("%b %d %I:%M %p").to_string()
    } else {
        local.format("%b %d %H:%M").to_string()
    }
}

/// Render a UTC instant under the given display mode.
///
/// `airport_tz` is consulted only in [`TimeMode::Airport`]; an absent or
/// unrecognized zone silently falls back to device-local time. Zulu mode
/// ignores `hour12` and always renders 24-hour UTC with a "Z" marker.
pub fn format_instant(
    instant: DateTime<Utc>,
    mode: TimeMode,
    airport_tz: Option<&str>,
    hour12: bool,
) -> String {
    match mode {
        TimeMode::Zulu => format!("{}Z", instant.format("%b %d %H:%M")),
        TimeMode::Airport => match airport_tz.and_then(|s| s.parse::<Tz>().ok()) {
            Some(tz) => fmt_with(instant, &tz, hour12),
            None => fmt_with(instant, &Local, hour12),
        },
        TimeMode::Local => fmt_with(instant, &Local, hour12),
    }
}

/// Derive a fixed-offset zone identifier from a feed local-time string with
/// a trailing `±HH:MM` offset, e.g. `"2026-02-23 23:10+02:00"`.
///
/// Offsets map to the POSIX-style `Etc/GMT∓H` identifiers (note the
/// inverted sign convention); a zero offset maps to `UTC`. Strings without
/// a recognizable offset yield `None`.
pub fn derive_offset_timezone(local: &str) -> Option<String> {
    let offset = OFFSET_SUFFIX_RE.captures(local)?.get(1)?.as_str();
    let sign: i32 = if offset.starts_with('+') { -1 } else { 1 };
    let hours: i32 = offset[1..3].parse().ok()?;
    if hours == 0 {
        return Some("UTC".to_string());
    }
    let etc = sign * hours;
    Some(format!("Etc/GMT{}{}", if etc > 0 { "+" } else { "" }, etc))
}

/// Whether the instant falls in daytime ([06:00, 20:00)) in the given zone,
/// device-local when no zone is supplied.
pub fn is_daytime(instant: DateTime<Utc>, tz: Option<&str>) -> bool {
    let hour = match tz.and_then(|s| s.parse::<Tz>().ok()) {
        Some(tz) => instant.with_timezone(&tz).hour(),
        None => instant.with_timezone(&Local).hour(),
    };
    (6..20).contains(&hour)
}

/// Render a minute count as `h:MM`.
pub fn format_duration_mins(mins: i64) -> String {
    format!("{}:{:02}", mins / 60, mins % 60)
}
