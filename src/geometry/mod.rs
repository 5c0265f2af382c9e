//! Spherical geometry for flight-path rendering.
//!
//! Great-circle arcs are generated as dense polylines and then split at the
//! antimeridian so the map layer never draws a segment that wraps the whole
//! globe.

pub mod antimeridian;
pub mod great_circle;

pub use antimeridian::split_at_antimeridian;
pub use great_circle::great_circle_points;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic point with latitude and longitude in decimal degrees.
///
/// Latitude is in [-90, 90] and longitude in [-180, 180] by convention;
/// intermediate values produced during interpolation may transiently fall
/// outside that range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another point in kilometers using the
    /// Haversine formula.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_distance_km(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

/// Calculate the great-circle distance between two points using the
/// Haversine formula. Returns distance in kilometers.
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
