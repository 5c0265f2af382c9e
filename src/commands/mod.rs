pub mod departures;
pub mod route;
pub mod search;

pub use departures::handle_departures;
pub use route::handle_route;
pub use search::handle_search;
