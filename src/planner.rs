//! End-to-end route planning: order the waypoints, fetch directions in
//! provider-sized chunks, and stitch the answers into one route.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chunk::{build_chunks, closing_chunk};
use crate::error::{Result, RouteError};
use crate::executor::{CancellationToken, ExecutorConfig, RetryPolicy, execute_chunks};
use crate::point::{Point, WaypointSet};
use crate::stitch::{RouteResult, StitchConfig, stitch_route};
use crate::tour::{Tour, TwoOptConfig, nearest_neighbor, two_opt};
use crate::traits::{DirectionsProvider, TravelMode};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteOptions {
    /// Most points (origin, intermediates, destination) per provider request.
    pub max_chunk_size: usize,
    /// Maximum provider calls in flight at once.
    pub concurrency: usize,
    pub travel_mode: TravelMode,
    pub two_opt: TwoOptConfig,
    pub retry: RetryPolicy,
    pub stitch: StitchConfig,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            max_chunk_size: 9,
            concurrency: 3,
            travel_mode: TravelMode::default(),
            two_opt: TwoOptConfig::default(),
            retry: RetryPolicy::default(),
            stitch: StitchConfig::default(),
        }
    }
}

impl RouteOptions {
    pub fn validate(&self) -> Result<()> {
        if self.max_chunk_size < 2 {
            return Err(RouteError::invalid_options(format!(
                "max_chunk_size must be at least 2, got {}",
                self.max_chunk_size
            )));
        }
        if self.concurrency == 0 {
            return Err(RouteError::invalid_options("concurrency must be at least 1"));
        }
        if !self.two_opt.epsilon.is_finite() || self.two_opt.epsilon < 0.0 {
            return Err(RouteError::invalid_options(format!(
                "two_opt.epsilon must be a non-negative number, got {}",
                self.two_opt.epsilon
            )));
        }
        Ok(())
    }

    fn executor_config(&self) -> ExecutorConfig {
        ExecutorConfig {
            concurrency: self.concurrency,
            travel_mode: self.travel_mode,
            retry: self.retry.clone(),
        }
    }
}

/// Validates the waypoints and computes the visiting order only.
pub fn optimize_order(waypoints: &[Point], options: &RouteOptions) -> Result<Tour> {
    options.validate()?;
    let waypoints = WaypointSet::new(waypoints)?;
    Ok(order_waypoints(&waypoints, options))
}

fn order_waypoints(waypoints: &WaypointSet, options: &RouteOptions) -> Tour {
    let constructed = nearest_neighbor(waypoints);
    debug!(
        points = constructed.len(),
        length_m = constructed.length_meters(),
        "planner: nearest-neighbor tour built"
    );
    two_opt(constructed, &options.two_opt)
}

/// Plans a closed route through `waypoints`, starting and ending at the first.
///
/// Only invalid input or options produce an error. Provider failures are
/// reported through [`RouteResult::failed_chunks`] and
/// [`RouteResult::closed_loop`].
pub fn plan_route<P>(waypoints: &[Point], provider: &P, options: &RouteOptions) -> Result<RouteResult>
where
    P: DirectionsProvider + ?Sized,
{
    plan_route_with_cancel(waypoints, provider, options, &CancellationToken::new())
}

/// Like [`plan_route`], but stops dispatching requests once `cancel` is set.
///
/// Chunks finished before cancellation are kept; the rest are reported as
/// failed, giving a best-effort partial route.
pub fn plan_route_with_cancel<P>(
    waypoints: &[Point],
    provider: &P,
    options: &RouteOptions,
    cancel: &CancellationToken,
) -> Result<RouteResult>
where
    P: DirectionsProvider + ?Sized,
{
    options.validate()?;
    let waypoints = WaypointSet::new(waypoints)?;
    let tour = order_waypoints(&waypoints, options);

    let mut chunks = build_chunks(&tour, options.max_chunk_size)?;
    let regular = chunks.len();
    let has_closing = match closing_chunk(&tour, regular) {
        Some(chunk) => {
            chunks.push(chunk);
            true
        }
        None => false,
    };

    info!(
        waypoints = tour.len(),
        chunks = regular,
        closing = has_closing,
        "planner: requesting directions"
    );

    let mut outcomes = execute_chunks(&chunks, provider, &options.executor_config(), cancel);
    let closing = if has_closing {
        chunks.truncate(regular);
        outcomes.pop()
    } else {
        None
    };

    Ok(stitch_route(&tour, &chunks, outcomes, closing, &options.stitch))
}
