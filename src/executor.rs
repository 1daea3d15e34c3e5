//! Bounded-concurrency execution of chunk requests.
//!
//! Chunks run on a dedicated rayon pool with `concurrency` threads, so at
//! most that many provider calls are in flight. Each chunk writes only its
//! own slot; outcomes come back ordered by chunk index, not by completion.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::chunk::Chunk;
use crate::error::ProviderError;
use crate::traits::{ChunkResult, DirectionsProvider, TravelMode};

/// Shared flag that stops new provider calls once set.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Retry schedule for retryable provider errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Additional attempts after the first call. Zero disables retrying.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_backoff_ms: u64,
    /// Factor applied to the delay after every retry.
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_backoff_ms: 250,
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    /// Two retries with exponential backoff.
    pub fn recommended() -> Self {
        Self {
            max_retries: 2,
            ..Self::default()
        }
    }

    fn backoff(&self, retry: u32) -> Duration {
        let factor = u64::from(self.multiplier.max(1)).saturating_pow(retry);
        Duration::from_millis(self.initial_backoff_ms.saturating_mul(factor))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Maximum provider calls in flight at once.
    pub concurrency: usize,
    pub travel_mode: TravelMode,
    pub retry: RetryPolicy,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            concurrency: 3,
            travel_mode: TravelMode::default(),
            retry: RetryPolicy::default(),
        }
    }
}

/// What happened to one chunk request.
#[derive(Debug)]
pub enum ChunkOutcome {
    Completed(ChunkResult),
    Failed(ProviderError),
    /// Not dispatched because the batch was cancelled.
    Cancelled,
}

impl ChunkOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ChunkOutcome::Completed(_))
    }

    pub fn as_result(&self) -> Option<&ChunkResult> {
        match self {
            ChunkOutcome::Completed(result) => Some(result),
            _ => None,
        }
    }

    pub fn into_result(self) -> Option<ChunkResult> {
        match self {
            ChunkOutcome::Completed(result) => Some(result),
            _ => None,
        }
    }
}

/// Runs every chunk against `provider` with bounded concurrency.
///
/// A failing chunk never aborts the batch. Once `cancel` is set, chunks that
/// have not been dispatched yet come back as [`ChunkOutcome::Cancelled`];
/// calls already in flight finish and keep their results.
pub fn execute_chunks<P>(
    chunks: &[Chunk],
    provider: &P,
    config: &ExecutorConfig,
    cancel: &CancellationToken,
) -> Vec<ChunkOutcome>
where
    P: DirectionsProvider + ?Sized,
{
    if chunks.is_empty() {
        return Vec::new();
    }

    let concurrency = config.concurrency.max(1);
    info!(
        chunks = chunks.len(),
        concurrency, "executor: dispatching chunk requests"
    );

    let run = |chunk: &Chunk| run_chunk(chunk, provider, config, cancel);

    let outcomes: Vec<ChunkOutcome> = match rayon::ThreadPoolBuilder::new()
        .num_threads(concurrency)
        .thread_name(|idx| format!("route-chunk-{idx}"))
        .build()
    {
        Ok(pool) => pool.install(|| chunks.par_iter().with_max_len(1).map(run).collect()),
        Err(err) => {
            warn!(error = %err, "executor: thread pool unavailable, running sequentially");
            chunks.iter().map(run).collect()
        }
    };

    let failed = outcomes.iter().filter(|o| !o.is_completed()).count();
    info!(
        chunks = outcomes.len(),
        failed, "executor: all chunk requests settled"
    );
    outcomes
}

fn run_chunk<P>(
    chunk: &Chunk,
    provider: &P,
    config: &ExecutorConfig,
    cancel: &CancellationToken,
) -> ChunkOutcome
where
    P: DirectionsProvider + ?Sized,
{
    let request = chunk.to_request(config.travel_mode);
    let mut retry = 0u32;

    loop {
        if cancel.is_cancelled() {
            debug!(chunk = chunk.index, "executor: chunk skipped after cancellation");
            return ChunkOutcome::Cancelled;
        }

        match provider.directions(&request) {
            Ok(result) => {
                debug!(
                    chunk = chunk.index,
                    points = chunk.len(),
                    legs = result.legs.len(),
                    "executor: chunk completed"
                );
                return ChunkOutcome::Completed(result);
            }
            Err(err) if err.is_retryable() && retry < config.retry.max_retries => {
                let delay = config.retry.backoff(retry);
                retry += 1;
                warn!(
                    chunk = chunk.index,
                    retry,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "executor: retrying chunk"
                );
                thread::sleep(delay);
            }
            Err(err) => {
                warn!(chunk = chunk.index, error = %err, "executor: chunk failed");
                return ChunkOutcome::Failed(err);
            }
        }
    }
}
