//! ATC-presence extraction from a VATSIM-style controller list.
//!
//! Controller callsigns follow `ICAO[_SUBFIELD]_POSITION`, e.g.
//! `LLBG_TWR` or `EGLL_N_APP`. Only callsigns whose first token is a
//! 4-letter ICAO code and whose last token is a known position suffix
//! contribute to the presence map.

use serde::Deserialize;
use std::collections::HashMap;

/// Recognized controller position suffixes.
pub const POSITIONS: [&str; 7] = ["DEL", "GND", "TWR", "APP", "DEP", "CTR", "FSS"];

/// One online controller, as found in the network data feed.
#[derive(Debug, Clone, Deserialize)]
pub struct Controller {
    pub callsign: String,
}

/// Network data feed envelope: only the controller list is consumed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkData {
    #[serde(default)]
    pub controllers: Vec<Controller>,
}

/// Map online controllers to ICAO → ordered position-suffix tokens.
///
/// Tokens appear in controller-list order; duplicates are kept (two TWR
/// controllers online means two `TWR` entries).
pub fn atc_presence(controllers: &[Controller]) -> HashMap<String, Vec<String>> {
    let mut atc: HashMap<String, Vec<String>> = HashMap::new();

    for ctrl in controllers {
        let parts: Vec<&str> = ctrl.callsign.split('_').collect();
        if parts.len() < 2 {
            continue;
        }

        let icao = parts[0];
        if icao.len() != 4 || !icao.chars().all(|c| c.is_ascii_uppercase()) {
            continue;
        }

        let suffix = parts[parts.len() - 1];
        if !POSITIONS.contains(&suffix) {
            continue;
        }

        atc.entry(icao.to_string())
            .or_default()
            .push(suffix.to_string());
    }

    atc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(callsign: &str) -> Controller {
        Controller {
            callsign: callsign.to_string(),
        }
    }

    #[test]
    fn test_presence_grouped_by_icao() {
        let controllers = vec![
            ctrl("LLBG_TWR"),
            ctrl("LLBG_APP"),
            ctrl("EGLL_N_APP"),
            ctrl("EGLL_DEL"),
        ];
        let atc = atc_presence(&controllers);

        assert_eq!(atc["LLBG"], vec!["TWR", "APP"]);
        assert_eq!(atc["EGLL"], vec!["APP", "DEL"]);
    }

    #[test]
    fn test_invalid_callsigns_ignored() {
        let controllers = vec![
            ctrl("LLBG"),          // no suffix
            ctrl("LON_CTR"),       // 3-letter prefix, not an ICAO
            ctrl("llbg_TWR"),      // lowercase prefix
            ctrl("LLBG_RADIO"),    // unknown position
            ctrl("LLBG_1_GND"),
        ];
        let atc = atc_presence(&controllers);

        assert_eq!(atc.len(), 1);
        assert_eq!(atc["LLBG"], vec!["GND"]);
    }

    #[test]
    fn test_feed_parsing() {
        let data: NetworkData = serde_json::from_str(
            r#"{"controllers": [{"callsign": "LLBG_TWR", "frequency": "118.300"}], "pilots": []}"#,
        )
        .expect("Failed to parse network data");
        let atc = atc_presence(&data.controllers);
        assert_eq!(atc["LLBG"], vec!["TWR"]);
    }
}
