//! Splitting a tour into provider-sized requests.
//!
//! Consecutive chunks share exactly one point: the last point of chunk `i`
//! is the first point of chunk `i + 1`, so their paths join without gaps.

use crate::error::{Result, RouteError};
use crate::point::Point;
use crate::tour::Tour;
use crate::traits::{DirectionsRequest, TravelMode};

/// A contiguous run of tour points sent as one provider request.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub index: usize,
    points: Vec<Point>,
}

impl Chunk {
    fn new(index: usize, points: Vec<Point>) -> Self {
        debug_assert!(points.len() >= 2);
        Self { index, points }
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

    pub fn origin(&self) -> Point {
        self.points[0]
    }

    pub fn destination(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn intermediates(&self) -> &[Point] {
        &self.points[1..self.points.len() - 1]
    }

    pub fn to_request(&self, travel_mode: TravelMode) -> DirectionsRequest {
        DirectionsRequest {
            origin: self.origin(),
            destination: self.destination(),
            intermediates: self.intermediates().to_vec(),
            travel_mode,
        }
    }
}

/// Splits `tour` into overlapping windows of at most `max_chunk_size` points.
///
/// Windows advance by `max_chunk_size - 1`; when the next full window would
/// run past the end, the remaining points form the final (possibly shorter)
/// chunk. A single-point tour yields no chunks.
pub fn build_chunks(tour: &Tour, max_chunk_size: usize) -> Result<Vec<Chunk>> {
    if max_chunk_size < 2 {
        return Err(RouteError::invalid_options(format!(
            "max_chunk_size must be at least 2, got {}",
            max_chunk_size
        )));
    }

    let points = tour.points();
    let n = points.len();
    let mut chunks = Vec::new();
    if n < 2 {
        return Ok(chunks);
    }

    let step = max_chunk_size - 1;
    let mut start = 0;
    loop {
        let end = start + step;
        if end >= n - 1 {
            chunks.push(Chunk::new(chunks.len(), points[start..].to_vec()));
            break;
        }
        chunks.push(Chunk::new(chunks.len(), points[start..=end].to_vec()));
        start = end;
    }

    Ok(chunks)
}

/// The segment from the tour's last point back to the anchor, if needed.
///
/// Closure is skipped only when the two points are exactly equal.
pub fn closing_chunk(tour: &Tour, index: usize) -> Option<Chunk> {
    if tour.len() < 2 || tour.last() == tour.anchor() {
        return None;
    }
    Some(Chunk::new(index, vec![tour.last(), tour.anchor()]))
}
