//! waypoint-router
//!
//! Orders a set of waypoints into a short closed tour and fetches a
//! continuous travel path for it from a directions provider that limits the
//! number of points per request.

pub mod error;
pub mod point;
pub mod haversine;
pub mod polyline;
pub mod traits;
pub mod tour;
pub mod chunk;
pub mod executor;
pub mod stitch;
pub mod osrm;
pub mod planner;

pub use error::{ProviderError, RouteError};
pub use executor::{CancellationToken, ChunkOutcome, RetryPolicy};
pub use planner::{RouteOptions, optimize_order, plan_route, plan_route_with_cancel};
pub use point::Point;
pub use stitch::RouteResult;
pub use traits::{ChunkResult, DirectionsProvider, DirectionsRequest, Leg, TravelMode};
