use anyhow::{Result, bail};
use std::path::PathBuf;
use tracing::info;

use crate::airports::{AirportIndex, clean_icao};
use crate::geometry::{GeoPoint, great_circle_points, split_at_antimeridian};

/// Print the great-circle path between two airports as renderable
/// segments, one `lat,lon` pair per line with a blank line between
/// segments (the antimeridian cuts).
pub fn handle_route(
    origin: String,
    destination: String,
    airports_path: PathBuf,
    points: usize,
) -> Result<()> {
    let index = AirportIndex::load_file(&airports_path)?;

    let resolve = |input: &str| -> Result<GeoPoint> {
        let Some(icao) = clean_icao(input) else {
            bail!("Invalid ICAO {:?}: expected 4 letters", input);
        };
        let Some(rec) = index.get(&icao) else {
            bail!("Unknown airport {}", icao);
        };
        Ok(GeoPoint::new(rec.latitude_deg, rec.longitude_deg))
    };

    let from = resolve(&origin)?;
    let to = resolve(&destination)?;

    let arc = great_circle_points(from, to, points);
    let segments = split_at_antimeridian(&arc);
    info!(
        "{} nm arc in {} segment(s), {} points",
        (from.distance_km(&to) / 1.852).round(),
        segments.len(),
        arc.len()
    );

    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            println!();
        }
        for p in seg {
            println!("{:.5},{:.5}", p.latitude, p.longitude);
        }
    }
    Ok(())
}
