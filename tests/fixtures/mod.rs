//! Test fixtures for waypoint-router.
//!
//! Provides:
//! - Real Las Vegas survey sites (from OpenStreetMap)
//! - Seeded random waypoints around a center
//! - A mock directions provider with failure, latency and cancellation hooks

#![allow(dead_code)]

pub mod survey_sites;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use waypoint_router::executor::CancellationToken;
use waypoint_router::haversine::HaversineDirections;
use waypoint_router::{ChunkResult, DirectionsProvider, DirectionsRequest, Point, ProviderError};

pub use survey_sites::*;

/// `n` distinct points within `spread` degrees of `center`.
pub fn random_waypoints(center: Point, n: usize, spread: f64, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Point::new(
                center.lat + rng.random_range(-spread..spread),
                center.lng + rng.random_range(-spread..spread),
            )
        })
        .collect()
}

/// Points along a parallel, `step` degrees of longitude apart.
pub fn line_points(n: usize, step: f64) -> Vec<Point> {
    (0..n).map(|i| Point::new(0.0, i as f64 * step)).collect()
}

type RequestPredicate = Box<dyn Fn(&DirectionsRequest) -> bool + Send + Sync>;
type RequestLatency = Box<dyn Fn(&DirectionsRequest) -> Duration + Send + Sync>;

/// Straight-line provider with injectable failures and latency.
///
/// Tracks total calls and the highest number of concurrent calls seen.
pub struct MockDirections {
    straight: HaversineDirections,
    fail_when: RequestPredicate,
    latency: RequestLatency,
    cancel_after: Option<(usize, CancellationToken)>,
    transient: bool,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockDirections {
    pub fn new() -> Self {
        Self {
            straight: HaversineDirections::default(),
            fail_when: Box::new(|_| false),
            latency: Box::new(|_| Duration::ZERO),
            cancel_after: None,
            transient: false,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn failing_when(
        mut self,
        predicate: impl Fn(&DirectionsRequest) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.fail_when = Box::new(predicate);
        self
    }

    pub fn failing_from(self, origins: Vec<Point>) -> Self {
        self.failing_when(move |request| origins.contains(&request.origin))
    }

    pub fn always_failing(self) -> Self {
        self.failing_when(|_| true)
    }

    pub fn with_latency(
        mut self,
        latency: impl Fn(&DirectionsRequest) -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.latency = Box::new(latency);
        self
    }

    /// Report failures as a retryable outage instead of `NoRoute`.
    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    /// Sets `token` once `calls` requests have finished.
    pub fn cancelling_after(mut self, calls: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((calls, token));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl DirectionsProvider for MockDirections {
    fn directions(&self, request: &DirectionsRequest) -> Result<ChunkResult, ProviderError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        thread::sleep((self.latency)(request));
        let result = if (self.fail_when)(request) {
            Err(if self.transient {
                ProviderError::unavailable("mock outage")
            } else {
                ProviderError::NoRoute
            })
        } else {
            self.straight.directions(request)
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let finished = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((limit, token)) = &self.cancel_after {
            if finished >= *limit {
                token.cancel();
            }
        }
        result
    }
}
