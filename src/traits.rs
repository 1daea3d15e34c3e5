//! Core seam between the planner and an external directions service.
//!
//! Concrete providers (OSRM, a straight-line estimator, test doubles)
//! implement [`DirectionsProvider`]; the planner never sees the transport.

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::point::Point;
use crate::polyline::Polyline;

/// Travel mode requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Cycling,
}

/// One origin → intermediates → destination request.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub origin: Point,
    pub destination: Point,
    pub intermediates: Vec<Point>,
    pub travel_mode: TravelMode,
}

impl DirectionsRequest {
    /// All request points in travel order.
    pub fn points(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.intermediates.len() + 2);
        points.push(self.origin);
        points.extend_from_slice(&self.intermediates);
        points.push(self.destination);
        points
    }
}

/// Distance and duration between two consecutive request points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Leg {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// A provider's answer for one chunk.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChunkResult {
    pub path: Polyline,
    pub legs: Vec<Leg>,
}

impl ChunkResult {
    pub fn distance_meters(&self) -> f64 {
        self.legs.iter().map(|leg| leg.distance_meters).sum()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.legs.iter().map(|leg| leg.duration_seconds).sum()
    }
}

/// Computes a legs-annotated path for a single request.
///
/// Implementations are called from several worker threads at once.
pub trait DirectionsProvider: Sync {
    fn directions(&self, request: &DirectionsRequest) -> Result<ChunkResult, ProviderError>;
}

impl<P: DirectionsProvider + ?Sized> DirectionsProvider for &P {
    fn directions(&self, request: &DirectionsRequest) -> Result<ChunkResult, ProviderError> {
        (**self).directions(request)
    }
}
