//! Bounded executor tests: ordering, partial failure, concurrency limit.

mod fixtures;

use std::time::Duration;

use waypoint_router::chunk::{Chunk, build_chunks};
use waypoint_router::executor::{ChunkOutcome, ExecutorConfig, execute_chunks};
use waypoint_router::point::WaypointSet;
use waypoint_router::tour::Tour;
use waypoint_router::{CancellationToken, DirectionsRequest};

use fixtures::{MockDirections, line_points};

const STEP: f64 = 0.01;

/// 15 points with chunks of 3 give 7 chunks; chunk `i` starts at point `2i`.
fn seven_chunks() -> Vec<Chunk> {
    let tour = Tour::from(&WaypointSet::new(&line_points(15, STEP)).unwrap());
    let chunks = build_chunks(&tour, 3).unwrap();
    assert_eq!(chunks.len(), 7);
    chunks
}

fn chunk_index(request: &DirectionsRequest) -> u64 {
    (request.origin.lng / (2.0 * STEP)).round() as u64
}

#[test]
fn failures_are_aligned_by_index_not_completion() {
    let chunks = seven_chunks();
    let failing = vec![chunks[2].origin(), chunks[5].origin()];
    // Later chunks answer sooner, so completion order is roughly reversed.
    let provider = MockDirections::new()
        .failing_from(failing)
        .with_latency(|request| Duration::from_millis((7 - chunk_index(request)) * 15));
    let config = ExecutorConfig {
        concurrency: 3,
        ..ExecutorConfig::default()
    };

    let outcomes = execute_chunks(&chunks, &provider, &config, &CancellationToken::new());

    assert_eq!(outcomes.len(), 7);
    for (idx, outcome) in outcomes.iter().enumerate() {
        if idx == 2 || idx == 5 {
            assert!(
                matches!(outcome, ChunkOutcome::Failed(_)),
                "chunk {} should fail",
                idx
            );
        } else {
            let result = outcome.as_result().expect("chunk should complete");
            assert_eq!(result.path.points(), chunks[idx].points());
        }
    }
    assert_eq!(provider.calls(), 7);
}

#[test]
fn never_exceeds_concurrency_limit() {
    let chunks = seven_chunks();

    for concurrency in [1, 2, 3] {
        let provider = MockDirections::new().with_latency(|_| Duration::from_millis(20));
        let config = ExecutorConfig {
            concurrency,
            ..ExecutorConfig::default()
        };
        let outcomes = execute_chunks(&chunks, &provider, &config, &CancellationToken::new());
        assert!(outcomes.iter().all(ChunkOutcome::is_completed));
        assert!(
            provider.max_in_flight() <= concurrency,
            "saw {} in flight with limit {}",
            provider.max_in_flight(),
            concurrency
        );
    }
}

#[test]
fn cancellation_stops_dispatch() {
    let chunks = seven_chunks();
    let cancel = CancellationToken::new();
    let provider = MockDirections::new().cancelling_after(2, cancel.clone());
    let config = ExecutorConfig {
        concurrency: 1,
        ..ExecutorConfig::default()
    };

    let outcomes = execute_chunks(&chunks, &provider, &config, &cancel);

    assert_eq!(provider.calls(), 2);
    let completed = outcomes.iter().filter(|o| o.is_completed()).count();
    let cancelled = outcomes
        .iter()
        .filter(|o| matches!(o, ChunkOutcome::Cancelled))
        .count();
    assert_eq!(completed, 2);
    assert_eq!(cancelled, 5);
}
