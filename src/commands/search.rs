use anyhow::Result;
use std::path::PathBuf;

use crate::airports::AirportIndex;

const SEARCH_LIMIT: usize = 8;

/// Search the airport database by ICAO prefix or name/city substring.
pub fn handle_search(query: String, airports_path: PathBuf) -> Result<()> {
    let index = AirportIndex::load_file(&airports_path)?;
    let hits = index.search(&query, SEARCH_LIMIT);

    if hits.is_empty() {
        println!("No airports matching {:?}", query);
        return Ok(());
    }
    for hit in hits {
        println!("{}  {} - {}, {}", hit.icao, hit.name, hit.city, hit.country);
    }
    Ok(())
}
