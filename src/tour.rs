//! Visiting-order construction and improvement.
//!
//! A [`Tour`] always keeps the anchor (the first waypoint supplied by the
//! caller) at index 0; the route returns to it when the loop is closed.

use serde::{Deserialize, Serialize};

use crate::haversine::distance_meters;
use crate::point::{Point, WaypointSet};

/// Below this size 2-opt has no non-trivial move.
const MIN_TOUR_SIZE_FOR_2OPT: usize = 4;

/// Settings for [`two_opt`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoOptConfig {
    /// Minimum gain in meters for a move to count as improving.
    pub epsilon: f64,
    /// Hard ceiling on full passes.
    pub max_passes: usize,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            max_passes: 50,
        }
    }
}

/// An ordered visiting sequence with the anchor at index 0.
///
/// Only built from a [`WaypointSet`], so it is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    points: Vec<Point>,
}

impl Tour {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn anchor(&self) -> Point {
        self.points[0]
    }

    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Length of the open path from the anchor to the last point.
    pub fn length_meters(&self) -> f64 {
        path_length(&self.points)
    }

    /// Length including the return leg to the anchor.
    pub fn closed_length_meters(&self) -> f64 {
        self.length_meters() + distance_meters(self.last(), self.anchor())
    }
}

impl From<&WaypointSet> for Tour {
    /// The input order, unchanged.
    fn from(waypoints: &WaypointSet) -> Self {
        Self {
            points: waypoints.points().to_vec(),
        }
    }
}

fn path_length(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance_meters(pair[0], pair[1]))
        .sum()
}

/// Greedy nearest-neighbor tour starting at the anchor.
///
/// Ties go to the point supplied first. Sets of one or two points are
/// returned as given.
pub fn nearest_neighbor(waypoints: &WaypointSet) -> Tour {
    let points = waypoints.points();
    if points.len() <= 2 {
        return Tour::from(waypoints);
    }

    let mut remaining: Vec<Point> = points[1..].to_vec();
    let mut tour = Vec::with_capacity(points.len());
    tour.push(points[0]);

    while !remaining.is_empty() {
        let current = tour[tour.len() - 1];
        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;
        for (idx, candidate) in remaining.iter().enumerate() {
            let dist = distance_meters(current, *candidate);
            if dist < best_dist {
                best_dist = dist;
                best_idx = idx;
            }
        }
        tour.push(remaining.remove(best_idx));
    }

    Tour { points: tour }
}

/// 2-opt improvement with the first and last points pinned.
///
/// For each pair `1 <= i < k <= n-2` the segment `[i..=k]` is reversed when
/// that shortens the path by more than `config.epsilon`. Passes repeat until
/// one finds no move or `config.max_passes` is reached.
pub fn two_opt(tour: Tour, config: &TwoOptConfig) -> Tour {
    let mut points = tour.points;
    let n = points.len();
    if n < MIN_TOUR_SIZE_FOR_2OPT {
        return Tour { points };
    }

    let anchor = points[0];
    let before = path_length(&points);
    let mut passes = 0usize;
    let mut total_moves = 0usize;

    while passes < config.max_passes {
        passes += 1;
        let mut improved = false;

        for i in 1..n - 2 {
            for k in i + 1..n - 1 {
                let delta = distance_meters(points[i - 1], points[i])
                    + distance_meters(points[k], points[k + 1])
                    - distance_meters(points[i - 1], points[k])
                    - distance_meters(points[i], points[k + 1]);
                if delta > config.epsilon {
                    points[i..=k].reverse();
                    improved = true;
                    total_moves += 1;
                }
            }
        }

        if !improved {
            break;
        }
    }

    debug_assert!(points[0] == anchor);
    tracing::debug!(
        n,
        passes,
        moves = total_moves,
        before_m = before,
        after_m = path_length(&points),
        "2-opt complete"
    );

    Tour { points }
}
