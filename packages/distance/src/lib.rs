#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Great-circle distance and radius filtering.
//!
//! Distances use the haversine formula on a sphere of radius
//! [`EARTH_RADIUS_MILES`].

use candidate_finder_candidate_models::{Candidate, Coordinates, RunResult};

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Haversine distance between two points given in decimal degrees, in miles.
#[must_use]
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for near-antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// [`haversine_miles`] over [`Coordinates`].
#[must_use]
pub fn distance_between(from: Coordinates, to: Coordinates) -> f64 {
    haversine_miles(from.latitude, from.longitude, to.latitude, to.longitude)
}

/// Sets `distance_miles` on every candidate: the distance to `target` for
/// resolved candidates, `None` for the rest.
pub fn annotate_distances(candidates: &mut [Candidate], target: Coordinates) {
    for candidate in candidates {
        candidate.distance_miles = candidate
            .coordinates
            .map(|coords| distance_between(target, coords));
    }
}

/// Returns the resolved candidates within `max_miles` of `target`, sorted
/// ascending by distance with ties kept in ingestion order.
///
/// Candidates without coordinates never appear in the result.
#[must_use]
pub fn filter_within_radius(
    candidates: &[Candidate],
    target: Coordinates,
    max_miles: f64,
) -> RunResult {
    let mut within: Vec<Candidate> = candidates
        .iter()
        .filter_map(|candidate| {
            let coords = candidate.coordinates?;
            let distance = distance_between(target, coords);
            (distance <= max_miles).then(|| Candidate {
                distance_miles: Some(distance),
                ..candidate.clone()
            })
        })
        .collect();

    within.sort_by(|a, b| {
        let da = a.distance_miles.unwrap_or(f64::INFINITY);
        let db = b.distance_miles.unwrap_or(f64::INFINITY);
        da.total_cmp(&db).then(a.row_index.cmp(&b.row_index))
    });

    log::debug!(
        "{} of {} candidates within {max_miles} miles of ({target})",
        within.len(),
        candidates.len()
    );

    RunResult { candidates: within }
}
