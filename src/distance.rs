//! Distance matrix providers.
//!
//! `EuclideanMatrix` treats (lat, lng) as plane coordinates. It is only a proxy
//! for geographic distance, but over a handful of nearby stops it orders them
//! the same way and costs nothing. `HaversineMatrix` gives great-circle metres
//! for callers that need real distances.

use crate::traits::DistanceMatrixProvider;

/// Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Planar distance over raw degrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanMatrix;

impl EuclideanMatrix {
    fn distance(from: (f64, f64), to: (f64, f64)) -> f64 {
        (from.0 - to.0).hypot(from.1 - to.1)
    }
}

impl DistanceMatrixProvider for EuclideanMatrix {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Vec<Vec<f64>> {
        pairwise(locations, Self::distance)
    }
}

/// Great-circle distance in metres.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineMatrix;

impl HaversineMatrix {
    fn distance_m(from: (f64, f64), to: (f64, f64)) -> f64 {
        let (lat1, lng1) = from;
        let (lat2, lng2) = to;

        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lng = (lng2 - lng1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.to_radians().cos() * lat2.to_radians().cos() * (delta_lng / 2.0).sin().powi(2);

        EARTH_RADIUS_M * 2.0 * a.sqrt().asin()
    }
}

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Vec<Vec<f64>> {
        pairwise(locations, Self::distance_m)
    }
}

fn pairwise(locations: &[(f64, f64)], distance: fn((f64, f64), (f64, f64)) -> f64) -> Vec<Vec<f64>> {
    let n = locations.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let d = distance(locations[i], locations[j]);
            matrix[i][j] = d;
            matrix[j][i] = d;
        }
    }

    matrix
}
