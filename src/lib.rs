//! flightboard - international departure board core
//!
//! Turns a raw airport-departure schedule feed into international-only
//! flight rows with estimated routing and timing, groups them into
//! map-ready routes, renders times and countdowns, and builds SimBrief
//! dispatch deep links. Flight paths are generated as great-circle
//! polylines split at the antimeridian so the map layer never draws a
//! wraparound artifact.

pub mod aggregator;
pub mod airports;
pub mod atc;
pub mod commands;
pub mod due;
pub mod geometry;
pub mod routes;
pub mod schedule;
pub mod settings;
pub mod simbrief;
pub mod timefmt;

pub use aggregator::{Row, aggregate_departures};
pub use airports::{AirportIndex, AirportRecord};
pub use geometry::{GeoPoint, great_circle_points, split_at_antimeridian};
pub use routes::{RouteDestination, group_routes};
pub use schedule::ScheduleFeed;
pub use settings::UserSettings;
pub use simbrief::SimBriefLink;
