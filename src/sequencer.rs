//! Route sequencing (fixed-start nearest neighbour).
//!
//! Orders a set of locations into a single visiting sequence from an origin.
//! The heuristic is greedy and myopic; it makes no claim of optimality, only
//! that the same input always produces the same order.

use tracing::{debug, warn};

use crate::distance::EuclideanMatrix;
use crate::error::RouteError;
use crate::model::{Coordinate, Location, LocationKey, RouteStop};
use crate::traits::{DistanceMatrixProvider, Geocoder, VisitTracker};

/// Where the tour starts.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    /// No fixed start: the first candidate anchors the tour and is visited first.
    None,
    Coordinate(Coordinate),
    /// Free-text address, geocoded before sequencing.
    Address(String),
}

/// Result of planning a route.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutePlan {
    /// Nothing to route once locations without coordinates were dropped.
    Empty,
    Route {
        origin: Option<Coordinate>,
        stops: Vec<RouteStop>,
    },
}

impl RoutePlan {
    pub fn stops(&self) -> &[RouteStop] {
        match self {
            RoutePlan::Empty => &[],
            RoutePlan::Route { stops, .. } => stops,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stops().is_empty()
    }
}

/// Sorted, de-duplicated locality labels, ignoring blanks.
pub fn localities(locations: &[Location]) -> Vec<String> {
    let mut labels: Vec<String> = locations
        .iter()
        .map(|location| location.locality_label.trim())
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect();
    labels.sort();
    labels.dedup();
    labels
}

/// Locations whose locality matches `label`, ignoring case and surrounding whitespace.
pub fn in_locality(locations: &[Location], label: &str) -> Vec<Location> {
    let wanted = label.trim().to_uppercase();
    locations
        .iter()
        .filter(|location| location.locality_label.trim().to_uppercase() == wanted)
        .cloned()
        .collect()
}

/// Order `destinations` by nearest neighbour from `origin`, using planar distance.
pub fn sequence<'a>(
    origin: Option<Coordinate>,
    destinations: &'a [Location],
) -> Result<Vec<&'a Location>, RouteError> {
    sequence_with(origin, destinations, &EuclideanMatrix)
}

/// Order `destinations` by nearest neighbour from `origin` over `matrix_provider`.
///
/// Locations without usable coordinates are dropped. With no origin, the first
/// remaining destination starts the tour. A non-finite origin is rejected.
pub fn sequence_with<'a, M>(
    origin: Option<Coordinate>,
    destinations: &'a [Location],
    matrix_provider: &M,
) -> Result<Vec<&'a Location>, RouteError>
where
    M: DistanceMatrixProvider,
{
    let origin = origin.map(check_origin).transpose()?;
    let ordered = order_candidates(origin, routable(destinations), matrix_provider);
    Ok(ordered.into_iter().map(|(location, _)| location).collect())
}

/// Greedy tour over `matrix` anchored at index 0.
///
/// Ties go to the lowest index. NaN or missing entries count as unreachable,
/// so they are only taken once nothing finite is left. The returned path
/// starts with 0 and contains every row index exactly once.
pub fn nearest_neighbor_path(matrix: &[Vec<f64>]) -> Vec<usize> {
    let n = matrix.len();
    if n == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; n];
    let mut path = Vec::with_capacity(n);
    visited[0] = true;
    path.push(0);

    while path.len() < n {
        let last = path[path.len() - 1];
        let mut best: Option<(usize, f64)> = None;

        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }
            let distance = match matrix[last].get(candidate) {
                Some(distance) if !distance.is_nan() => *distance,
                _ => f64::INFINITY,
            };
            // Strict comparison keeps the earliest index on ties.
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((candidate, distance)),
            }
        }

        match best {
            Some((next, _)) => {
                visited[next] = true;
                path.push(next);
            }
            None => break,
        }
    }

    path
}

/// Resolve an [`Origin`] to a coordinate, geocoding addresses.
///
/// A failed or empty geocoding result is an error; it never degrades to an
/// unanchored tour. Non-finite coordinates, given or geocoded, are rejected.
pub fn resolve_origin<G>(origin: &Origin, geocoder: &G) -> Result<Option<Coordinate>, RouteError>
where
    G: Geocoder,
{
    match origin {
        Origin::None => Ok(None),
        Origin::Coordinate(coordinate) => check_origin(*coordinate).map(Some),
        Origin::Address(address) => match geocoder.geocode(address) {
            Ok(coordinate) => {
                debug!(address = %address, ?coordinate, "geocoded start address");
                check_origin(coordinate).map(Some)
            }
            Err(source) => {
                warn!(address = %address, error = %source, "geocoding start address failed");
                Err(RouteError::Geocoding {
                    address: address.clone(),
                    source,
                })
            }
        },
    }
}

/// Plan a route for `user`: filter, resolve the origin, sequence, and attach
/// visit order and visited flags.
pub fn plan_route<G, T, M>(
    user: &str,
    origin: &Origin,
    destinations: &[Location],
    geocoder: &G,
    tracker: &T,
    matrix_provider: &M,
) -> Result<RoutePlan, RouteError>
where
    G: Geocoder,
    T: VisitTracker,
    M: DistanceMatrixProvider,
{
    let candidates = routable(destinations);
    let dropped = destinations.len() - candidates.len();
    if dropped > 0 {
        debug!(dropped, "dropped locations without coordinates");
    }
    if candidates.is_empty() {
        debug!("no routable locations");
        return Ok(RoutePlan::Empty);
    }

    let origin = resolve_origin(origin, geocoder)?;

    let stops = order_candidates(origin, candidates, matrix_provider)
        .into_iter()
        .zip(1u32..)
        .map(|((location, coordinate), visit_order)| {
            let key = LocationKey::for_location(user, location);
            RouteStop {
                visit_order,
                id: location.id.clone(),
                address_label: location.address_label.clone(),
                locality_label: location.locality_label.clone(),
                latitude: coordinate.latitude,
                longitude: coordinate.longitude,
                visited: tracker.is_visited(&key),
            }
        })
        .collect::<Vec<_>>();

    debug!(stops = stops.len(), anchored = origin.is_some(), "route planned");
    Ok(RoutePlan::Route { origin, stops })
}

fn check_origin(coordinate: Coordinate) -> Result<Coordinate, RouteError> {
    if coordinate.is_finite() {
        Ok(coordinate)
    } else {
        warn!(?coordinate, "rejecting non-finite origin");
        Err(RouteError::InvalidOrigin {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        })
    }
}

fn routable(locations: &[Location]) -> Vec<(&Location, Coordinate)> {
    locations
        .iter()
        .filter_map(|location| location.coordinate().map(|coordinate| (location, coordinate)))
        .collect()
}

fn order_candidates<'a, M>(
    origin: Option<Coordinate>,
    candidates: Vec<(&'a Location, Coordinate)>,
    matrix_provider: &M,
) -> Vec<(&'a Location, Coordinate)>
where
    M: DistanceMatrixProvider,
{
    if candidates.len() <= 1 {
        return candidates;
    }

    let mut points = Vec::with_capacity(candidates.len() + 1);
    if let Some(origin) = origin {
        points.push(origin.coords());
    }
    points.extend(candidates.iter().map(|(_, coordinate)| coordinate.coords()));

    let mut matrix = matrix_provider.matrix_for(&points);
    if !is_square(&matrix, points.len()) {
        warn!(
            points = points.len(),
            rows = matrix.len(),
            "distance matrix has the wrong shape, falling back to planar distance"
        );
        matrix = EuclideanMatrix.matrix_for(&points);
    }

    // With an origin, point 0 is the origin and candidates are shifted by one.
    let offset = usize::from(origin.is_some());
    nearest_neighbor_path(&matrix)
        .into_iter()
        .filter(|&index| index >= offset)
        .map(|index| candidates[index - offset])
        .collect()
}

fn is_square(matrix: &[Vec<f64>], n: usize) -> bool {
    matrix.len() == n && matrix.iter().all(|row| row.len() == n)
}
