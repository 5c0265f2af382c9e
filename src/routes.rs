//! Grouping of departure rows into per-destination route summaries for the
//! map layer.

use std::collections::HashMap;

use crate::aggregator::Row;
use crate::airports::AirportIndex;

/// One distinct destination with every flight number observed for it.
#[derive(Debug, Clone)]
pub struct RouteDestination {
    pub icao: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub city: Option<String>,
    /// Flight numbers in encounter order; duplicates permitted
    pub flights: Vec<String>,
    /// Index of the first row contributing to this destination, so the
    /// table can be scrolled to it from the map
    pub first_row_index: usize,
}

/// Group aggregated rows by destination, in first-seen order.
///
/// Rows whose destination code has no resolvable coordinates contribute to
/// no destination (they stay in the row sequence for table display only).
pub fn group_routes(rows: &[Row], index: &AirportIndex) -> Vec<RouteDestination> {
    let mut destinations: Vec<RouteDestination> = Vec::new();
    let mut by_code: HashMap<String, usize> = HashMap::new();

    for (row_index, row) in rows.iter().enumerate() {
        let Some(code) = row.dest.code() else {
            continue;
        };
        let Some(record) = index.get(code) else {
            continue;
        };

        let slot = *by_code.entry(code.to_string()).or_insert_with(|| {
            destinations.push(RouteDestination {
                icao: code.to_string(),
                latitude_deg: record.latitude_deg,
                longitude_deg: record.longitude_deg,
                city: row.dest_city.clone(),
                flights: Vec::new(),
                first_row_index: row_index,
            });
            destinations.len() - 1
        });

        if let Some(number) = &row.number {
            destinations[slot].flights.push(number.clone());
        }
    }

    destinations
}
