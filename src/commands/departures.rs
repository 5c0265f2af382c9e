use anyhow::{Context, Result, bail};
use chrono::Utc;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::aggregator::aggregate_departures;
use crate::airports::{AirportIndex, clean_icao};
use crate::atc::{NetworkData, atc_presence};
use crate::due::{Urgency, classify_due};
use crate::routes::group_routes;
use crate::schedule::ScheduleFeed;
use crate::settings::UserSettings;
use crate::simbrief::SimBriefLink;
use crate::timefmt::{TimeMode, derive_offset_timezone, format_duration_mins, format_instant, is_daytime};

fn ansi_for(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Muted => "\x1b[90m",
        Urgency::Urgent => "\x1b[31m",
        Urgency::Warning => "\x1b[33m",
        Urgency::Normal => "\x1b[0m",
    }
}

fn load_feed(path: &Path) -> Result<ScheduleFeed> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading schedule feed {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Parsing schedule feed {:?}", path))
}

fn load_atc(path: &Path) -> Result<HashMap<String, Vec<String>>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading network data {:?}", path))?;
    let data: NetworkData =
        serde_json::from_str(&raw).with_context(|| format!("Parsing network data {:?}", path))?;
    Ok(atc_presence(&data.controllers))
}

/// Print the international departure board for one airport.
#[allow(clippy::too_many_arguments)]
pub fn handle_departures(
    icao: Option<String>,
    feed_path: PathBuf,
    airports_path: PathBuf,
    settings_path: Option<PathBuf>,
    atc_path: Option<PathBuf>,
    time_mode: TimeMode,
    hour12: bool,
) -> Result<()> {
    let settings = match &settings_path {
        Some(p) => UserSettings::load(p)?,
        None => UserSettings::default(),
    };

    let requested = icao.unwrap_or_else(|| settings.default_airport.clone());
    let Some(origin_icao) = clean_icao(&requested) else {
        bail!("Invalid ICAO {:?}: expected 4 letters, e.g. LLBG", requested);
    };

    let index = AirportIndex::load_file(&airports_path)?;
    info!("Loaded {} airports from {:?}", index.len(), airports_path);

    let feed = load_feed(&feed_path)?;
    if let Some(err) = &feed.error {
        bail!("Schedule feed reported an error: {}", err);
    }

    let atc = match &atc_path {
        Some(p) => load_atc(p).unwrap_or_else(|e| {
            warn!("Ignoring ATC data: {:#}", e);
            HashMap::new()
        }),
        None => HashMap::new(),
    };

    let origin = index.get(&origin_icao);
    if origin.is_none() {
        warn!("Origin {} not in airport database; showing all departures", origin_icao);
    }

    let rows = aggregate_departures(&feed, origin, &index);
    let routes = group_routes(&rows, &index);
    let now = Utc::now();

    // The feed's local departure strings carry the origin's UTC offset
    let origin_tz = feed
        .entries()
        .first()
        .and_then(|e| e.departure.as_ref())
        .and_then(|d| d.scheduled_time.as_ref())
        .and_then(|t| t.local.as_deref())
        .and_then(derive_offset_timezone);
    let dep_tz = match time_mode {
        TimeMode::Airport => origin_tz.as_deref(),
        _ => None,
    };

    if let Some(origin) = origin {
        let positions = atc
            .get(&origin_icao)
            .map(|p| format!("  [{}]", p.join(" ")))
            .unwrap_or_default();
        println!(
            "{} - {}, {} ({}){}",
            origin.name, origin.city, origin.country, origin_icao, positions
        );
    }
    println!(
        "{:<10} {:<22} {:<26} {:<14} {:>6}  {}",
        "FLIGHT", "DEST", "DEP", "ARR", "DUR", "SIMBRIEF"
    );

    let active = settings.active_aircraft();
    for row in &rows {
        let dest_code = row.dest.code().unwrap_or("----");
        let dest_desc = match (&row.dest_city, &row.dest_country) {
            (Some(city), Some(country)) => format!("{} {}, {}", dest_code, city, country),
            (Some(city), None) => format!("{} {}", dest_code, city),
            (None, Some(country)) => format!("{} {}", dest_code, country),
            (None, None) => dest_code.to_string(),
        };
        let dest_atc = atc
            .get(dest_code)
            .map(|p| format!(" [{}]", p.join(" ")))
            .unwrap_or_default();

        let dep_cell = match row.departure {
            Some(dep) => {
                let sun = if is_daytime(dep, origin_tz.as_deref()) { "*" } else { " " };
                let due = classify_due(dep, now);
                format!(
                    "{}{} {}{}\x1b[0m",
                    sun,
                    format_instant(dep, time_mode, dep_tz, hour12),
                    ansi_for(due.urgency),
                    due.label
                )
            }
            None => "-".to_string(),
        };

        let arr_cell = match row.arrival_instant() {
            Some((arr, estimated)) => {
                let arr_tz = match time_mode {
                    TimeMode::Airport => row.dest_timezone.as_deref(),
                    _ => None,
                };
                format!(
                    "{}{}",
                    if estimated { "~" } else { "" },
                    format_instant(arr, time_mode, arr_tz, hour12)
                )
            }
            None => "-".to_string(),
        };

        let dur_cell = match row.duration_mins() {
            Some((mins, estimated)) => format!(
                "{}{}",
                if estimated { "~" } else { "" },
                format_duration_mins(mins)
            ),
            None => "-".to_string(),
        };

        let mut link = SimBriefLink::new(&origin_icao, dest_code);
        link.departure = row.departure;
        link.duration_mins = row.duration_mins().map(|(m, _)| m);
        link.airline_icao = row.airline_icao.clone();
        link.flight_number = row.number.clone();
        if let Some(ac) = active {
            link.base_type = UserSettings::non_empty(&ac.base_type).map(str::to_string);
            link.airframe_id = UserSettings::non_empty(&ac.airframe_id).map(str::to_string);
        }

        println!(
            "{:<10} {:<22}{} {:<26} {:<14} {:>6}  {}",
            row.number.as_deref().unwrap_or("-"),
            dest_desc,
            dest_atc,
            dep_cell,
            arr_cell,
            dur_cell,
            link.build()
        );
    }

    println!(
        "\n{} international flights to {} destinations",
        rows.len(),
        routes.len()
    );
    Ok(())
}
