//! Merging per-chunk answers into one route.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::chunk::Chunk;
use crate::executor::ChunkOutcome;
use crate::point::Point;
use crate::polyline::Polyline;
use crate::tour::Tour;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StitchConfig {
    /// Bridge a failed chunk with a straight segment through its points.
    ///
    /// Only the geometry is filled in; the chunk still counts as failed and
    /// adds nothing to the totals.
    pub fill_failed_with_straight_line: bool,
}

/// The planned route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub ordered_points: Vec<Point>,
    pub path: Polyline,
    pub total_distance_meters: f64,
    pub total_duration_seconds: f64,
    pub closed_loop: bool,
    /// Indices of regular chunks (`0..chunk_count`) whose request failed or
    /// was cancelled. The loop-closing segment is never listed here; its
    /// failure shows up as `closed_loop == false`.
    pub failed_chunks: BTreeSet<usize>,
    /// Number of regular chunks, excluding the loop-closing segment.
    pub chunk_count: usize,
}

impl RouteResult {
    pub fn is_complete(&self) -> bool {
        self.closed_loop && self.failed_chunks.is_empty()
    }
}

/// Builds a [`RouteResult`] from the tour and its chunk outcomes.
///
/// `outcomes[i]` belongs to `chunks[i]`. `closing` is `None` when the tour
/// already ends at its anchor.
pub fn stitch_route(
    tour: &Tour,
    chunks: &[Chunk],
    outcomes: Vec<ChunkOutcome>,
    closing: Option<ChunkOutcome>,
    config: &StitchConfig,
) -> RouteResult {
    debug_assert_eq!(chunks.len(), outcomes.len());

    let mut path = Polyline::default();
    let mut total_distance_meters = 0.0;
    let mut total_duration_seconds = 0.0;
    let mut failed_chunks = BTreeSet::new();
    let mut usable = false;

    for (chunk, outcome) in chunks.iter().zip(outcomes) {
        match outcome.into_result() {
            Some(result) => {
                total_distance_meters += result.distance_meters();
                total_duration_seconds += result.duration_seconds();
                if !result.path.is_empty() {
                    usable = true;
                }
                path.append_stitched(result.path.points());
            }
            None => {
                failed_chunks.insert(chunk.index);
                if config.fill_failed_with_straight_line {
                    path.append_stitched(chunk.points());
                }
            }
        }
    }

    if !usable {
        if !chunks.is_empty() {
            warn!(
                chunks = chunks.len(),
                "stitcher: no chunk produced a path, using straight-line tour"
            );
        }
        path = Polyline::new(tour.points().to_vec());
    }

    let closed_loop = match closing.map(ChunkOutcome::into_result) {
        None => true,
        Some(Some(result)) => {
            total_distance_meters += result.distance_meters();
            total_duration_seconds += result.duration_seconds();
            path.append_stitched(result.path.points());
            true
        }
        Some(None) => {
            warn!("stitcher: closing segment unavailable, route left open");
            false
        }
    };

    info!(
        points = tour.len(),
        path_points = path.len(),
        distance_m = total_distance_meters,
        duration_s = total_duration_seconds,
        failed = failed_chunks.len(),
        closed_loop,
        "stitcher: route assembled"
    );

    RouteResult {
        ordered_points: tour.points().to_vec(),
        path,
        total_distance_meters,
        total_duration_seconds,
        closed_loop,
        failed_chunks,
        chunk_count: chunks.len(),
    }
}
