mod location;
mod quote;

pub use location::{find_station, is_valid_location_pair, stations, Location};
pub use quote::{Quote, QuoteRequest, DEFAULT_LOCATION_FACTOR};
