//! Antimeridian-aware polyline splitting.
//!
//! A polyline that crosses the ±180° meridian cannot be handed to a map
//! renderer as-is: the renderer would connect the two sides with a segment
//! spanning the whole map. This module cuts the polyline into segments at
//! each crossing, inserting interpolated boundary points at ±180°.

use super::GeoPoint;

/// Split a polyline into segments wherever it crosses the antimeridian.
///
/// Within each returned segment no two consecutive points differ in
/// longitude by more than 180°. Removing the synthetic ±180° boundary
/// points and concatenating the segments reconstructs the input path.
/// Inputs with fewer than two points pass through as a single segment.
pub fn split_at_antimeridian(points: &[GeoPoint]) -> Vec<Vec<GeoPoint>> {
    if points.len() < 2 {
        return vec![points.to_vec()];
    }

    let mut segments: Vec<Vec<GeoPoint>> = Vec::new();
    let mut seg: Vec<GeoPoint> = vec![points[0]];

    for p in &points[1..] {
        let last = seg[seg.len() - 1];
        let delta = p.longitude - last.longitude;

        if delta.abs() > 180.0 {
            // Normalize to the short crossing direction
            let short_delta = if delta > 180.0 {
                delta - 360.0
            } else {
                delta + 360.0
            };
            let exit_lon = if short_delta < 0.0 { -180.0 } else { 180.0 };
            let entry_lon = -exit_lon;
            let t = (exit_lon - last.longitude).abs() / short_delta.abs();
            let cross_lat = last.latitude + t * (p.latitude - last.latitude);

            seg.push(GeoPoint::new(cross_lat, exit_lon));
            segments.push(seg);
            seg = vec![GeoPoint::new(cross_lat, entry_lon), *p];
        } else {
            seg.push(*p);
        }
    }

    segments.push(seg);
    segments
}
