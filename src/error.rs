//! Error types, one per failing stage.

use thiserror::Error;

/// Failure to turn a free-text address into a coordinate.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("no match for address {address:?}")]
    NoMatch { address: String },
    #[error("geocoder request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("geocoder returned an unusable response: {0}")]
    InvalidResponse(String),
}

/// Failure while planning a route.
///
/// An empty candidate set is not an error; see `RoutePlan::Empty`.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("could not geocode start address {address:?}: {source}")]
    Geocoding {
        address: String,
        #[source]
        source: GeocodeError,
    },
    #[error("start coordinate ({latitude}, {longitude}) is not finite")]
    InvalidOrigin { latitude: f64, longitude: f64 },
}

/// Failure of a purchase history source.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("purchase history unavailable: {0}")]
    Unavailable(String),
}
