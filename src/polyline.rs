//! Polyline representation for route geometries.
//!
//! Paths are kept as decoded points. Encoding to a compact wire format
//! belongs to the provider adapters and the consumers of a route.

use serde::{Deserialize, Serialize};

use crate::haversine::distance_meters;
use crate::point::Point;

/// A route geometry as an ordered sequence of points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

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

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Sum of great-circle distances between consecutive points.
    pub fn length_meters(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| distance_meters(pair[0], pair[1]))
            .sum()
    }

    /// Appends `other`, dropping its first point when it repeats our last.
    pub fn append_stitched(&mut self, other: &[Point]) {
        let skip = match (self.points.last(), other.first()) {
            (Some(last), Some(first)) if last == first => 1,
            _ => 0,
        };
        self.points.extend_from_slice(&other[skip..]);
    }
}

impl From<Vec<Point>> for Polyline {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}
