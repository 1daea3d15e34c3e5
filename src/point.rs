//! Geographic points and validated waypoint sets.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteError};

/// A latitude/longitude pair in degrees.
///
/// Equality is exact coordinate equality, with no tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Bit-level key for hashing; `-0.0` and `0.0` map to the same key.
    fn key(&self) -> (u64, u64) {
        fn bits(value: f64) -> u64 {
            if value == 0.0 { 0.0f64.to_bits() } else { value.to_bits() }
        }
        (bits(self.lat), bits(self.lng))
    }
}

impl From<(f64, f64)> for Point {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Validated, duplicate-free waypoints. The first point is the anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointSet {
    points: Vec<Point>,
}

impl WaypointSet {
    /// Validates coordinates and removes exact duplicates, keeping the
    /// first occurrence of each point in input order.
    pub fn new(points: &[Point]) -> Result<Self> {
        if points.is_empty() {
            return Err(RouteError::EmptyWaypoints);
        }

        for (index, point) in points.iter().enumerate() {
            if !point.is_finite() {
                return Err(RouteError::NonFiniteCoordinate {
                    index,
                    lat: point.lat,
                    lng: point.lng,
                });
            }
            if !point.in_range() {
                return Err(RouteError::CoordinateOutOfRange {
                    index,
                    lat: point.lat,
                    lng: point.lng,
                });
            }
        }

        Ok(Self {
            points: dedupe_points(points),
        })
    }

    pub fn anchor(&self) -> Point {
        self.points[0]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn dedupe_points(points: &[Point]) -> Vec<Point> {
    let mut seen = HashSet::with_capacity(points.len());
    points
        .iter()
        .copied()
        .filter(|point| seen.insert(point.key()))
        .collect()
}
