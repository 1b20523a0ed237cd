//! Collaborator seams.
//!
//! The planning core performs no I/O. Everything it needs from the outside
//! world is reached through these traits, implemented by the caller (or by the
//! adapters in this crate).

use chrono::NaiveDate;

use crate::error::{GeocodeError, HistoryError};
use crate::model::{Coordinate, LocationKey, PurchaseLine};

/// Resolves a free-text address to a coordinate.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError>;
}

/// Per-user "visited" flags for locations.
///
/// The planner only reads flags; writing them is left to the caller.
pub trait VisitTracker {
    fn is_visited(&self, key: &LocationKey) -> bool;

    fn set_visited(&mut self, key: &LocationKey, visited: bool);

    /// Flip the flag and return the new value.
    fn toggle(&mut self, key: &LocationKey) -> bool {
        let visited = !self.is_visited(key);
        self.set_visited(key, visited);
        visited
    }
}

/// Provides a pairwise distance matrix for a set of (lat, lng) points.
///
/// The matrix is indexed by the provided location order.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Vec<Vec<f64>>;
}

/// Source of raw purchase lines for one location.
pub trait PurchaseHistorySource {
    /// Lines for `location_id` dated within `since..=until`.
    fn lines_for(
        &self,
        location_id: &str,
        since: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<PurchaseLine>, HistoryError>;
}
