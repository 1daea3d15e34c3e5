//! Great-circle distance and a straight-line directions provider.
//!
//! The provider is a fallback when no road router is reachable: it ignores
//! roads and estimates durations from an assumed speed, and fails only when
//! that speed is not positive.

use crate::error::ProviderError;
use crate::point::Point;
use crate::polyline::Polyline;
use crate::traits::{ChunkResult, DirectionsProvider, DirectionsRequest, Leg};

/// Average travel speed assumption for duration estimates.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in meters.
///
/// Non-finite input yields NaN.
pub fn distance_meters(from: Point, to: Point) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1.0 for antipodal points. `clamp`
    // passes NaN through, unlike `min`.
    let c = 2.0 * a.sqrt().clamp(0.0, 1.0).asin();

    EARTH_RADIUS_KM * c * 1000.0
}

/// Straight-line directions: the path is the request points themselves.
#[derive(Debug, Clone)]
pub struct HaversineDirections {
    /// Assumed average speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineDirections {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineDirections {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Convert a distance in meters to travel time in seconds.
    fn meters_to_seconds(&self, meters: f64) -> f64 {
        meters / (self.speed_kmh * 1000.0 / 3600.0)
    }

    /// Builds the straight-line result through `points` without a request.
    pub fn straight_line(&self, points: &[Point]) -> ChunkResult {
        let legs = points
            .windows(2)
            .map(|pair| {
                let meters = distance_meters(pair[0], pair[1]);
                Leg {
                    distance_meters: meters,
                    duration_seconds: self.meters_to_seconds(meters),
                }
            })
            .collect();

        ChunkResult {
            path: Polyline::new(points.to_vec()),
            legs,
        }
    }
}

impl DirectionsProvider for HaversineDirections {
    fn directions(&self, request: &DirectionsRequest) -> Result<ChunkResult, ProviderError> {
        if !self.speed_kmh.is_finite() || self.speed_kmh <= 0.0 {
            return Err(ProviderError::InvalidResponse(format!(
                "speed must be positive, got {}",
                self.speed_kmh
            )));
        }
        Ok(self.straight_line(&request.points()))
    }
}
