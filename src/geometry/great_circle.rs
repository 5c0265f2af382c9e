//! Great-circle arc interpolation.
//!
//! Produces a dense polyline approximating the shortest path between two
//! points on the sphere, using spherical linear interpolation between the
//! unit Cartesian vectors of the endpoints.

use super::GeoPoint;

/// Angular distance below which two points are treated as identical
/// (~1e-6 rad, about 6 m on Earth).
const COINCIDENT_EPSILON: f64 = 1e-6;

/// Default number of arc subdivisions.
pub const DEFAULT_ARC_POINTS: usize = 80;

/// Convert a geographic point to a unit vector in Earth-centered Cartesian
/// coordinates.
fn to_unit_vector(p: &GeoPoint) -> [f64; 3] {
    let lat = p.latitude.to_radians();
    let lon = p.longitude.to_radians();
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

/// Convert a Cartesian vector back to latitude/longitude in degrees.
fn to_geo_point(v: [f64; 3]) -> GeoPoint {
    let [x, y, z] = v;
    GeoPoint {
        latitude: z.atan2((x * x + y * y).sqrt()).to_degrees(),
        longitude: y.atan2(x).to_degrees(),
    }
}

/// Interpolate `n + 1` points along the great-circle arc from `from` to
/// `to`, inclusive of both endpoints.
///
/// If the endpoints are indistinguishable (angular separation below ~1e-6
/// rad), returns just the origin point. Exactly antipodal endpoints have no
/// unique great circle; rather than producing NaN coordinates, the arc
/// degenerates to the two endpoints and the caller draws a straight segment.
pub fn great_circle_points(from: GeoPoint, to: GeoPoint, n: usize) -> Vec<GeoPoint> {
    let v1 = to_unit_vector(&from);
    let v2 = to_unit_vector(&to);

    let dot = v1[0] * v2[0] + v1[1] * v2[1] + v1[2] * v2[2];
    // Clamp guards acos against floating error at the poles/antipodes
    let d = dot.clamp(-1.0, 1.0).acos();

    if d < COINCIDENT_EPSILON {
        return vec![from];
    }
    if d > std::f64::consts::PI - COINCIDENT_EPSILON || n == 0 {
        // sin(d) ~ 0: the interpolation is undefined for antipodal points
        return vec![from, to];
    }

    let sin_d = d.sin();
    let mut pts = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let t = i as f64 / n as f64;
        let a = ((1.0 - t) * d).sin() / sin_d;
        let b = (t * d).sin() / sin_d;
        pts.push(to_geo_point([
            a * v1[0] + b * v2[0],
            a * v1[1] + b * v2[1],
            a * v1[2] + b * v2[2],
        ]));
    }
    pts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_endpoint_count_and_values() {
        let from = GeoPoint::new(32.0114, 34.8867); // LLBG
        let to = GeoPoint::new(51.4700, -0.4543); // EGLL
        let pts = great_circle_points(from, to, 80);

        assert_eq!(pts.len(), 81);
        assert!(close(pts[0].latitude, from.latitude));
        assert!(close(pts[0].longitude, from.longitude));
        assert!((pts[80].latitude - to.latitude).abs() < 1e-6);
        assert!((pts[80].longitude - to.longitude).abs() < 1e-6);
    }

    #[test]
    fn test_equal_angular_steps() {
        let from = GeoPoint::new(0.0, 0.0);
        let to = GeoPoint::new(0.0, 90.0);
        let pts = great_circle_points(from, to, 10);
        assert_eq!(pts.len(), 11);

        // Along the equator each step should cover the same angle
        let mut steps = Vec::new();
        for w in pts.windows(2) {
            steps.push((w[1].longitude - w[0].longitude).abs());
        }
        for s in &steps {
            assert!((s - 9.0).abs() < 1e-6, "step {} deg", s);
        }
    }

    #[test]
    fn test_identical_points_collapse() {
        let p = GeoPoint::new(40.0, -73.0);
        let pts = great_circle_points(p, p, 80);
        assert_eq!(pts.len(), 1);
        assert!(close(pts[0].latitude, 40.0));
    }

    #[test]
    fn test_antipodal_is_finite() {
        let pts = great_circle_points(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0), 80);
        assert_eq!(pts.len(), 2);
        for p in &pts {
            assert!(p.latitude.is_finite());
            assert!(p.longitude.is_finite());
        }
    }

    #[test]
    fn test_arc_crosses_pacific_longitudes() {
        // Tokyo to San Francisco: the arc runs east across the antimeridian
        let pts = great_circle_points(
            GeoPoint::new(35.7653, 140.3856),
            GeoPoint::new(37.6213, -122.3790),
            80,
        );
        assert_eq!(pts.len(), 81);
        assert!(pts.iter().any(|p| p.longitude > 170.0 || p.longitude < -170.0));
    }
}
