use serde::Serialize;

use crate::math::Point2;

/// A polyline of straight segments, open or closed.
///
/// For closed polylines the last vertex connects back to the first; the
/// closing vertex is not repeated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub vertices: Vec<Point2>,
    pub closed: bool,
}

impl Polyline {
    /// Creates an open polyline through `points`.
    #[must_use]
    pub fn open(points: Vec<Point2>) -> Self {
        Self {
            vertices: points,
            closed: false,
        }
    }

    /// Creates a closed polyline through `points`.
    #[must_use]
    pub fn closed(points: Vec<Point2>) -> Self {
        Self {
            vertices: points,
            closed: true,
        }
    }

    /// Returns the number of segments in this polyline.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.vertices.len();
        if n < 2 {
            return 0;
        }
        if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// Iterates over the segments as `(start, end)` pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.vertices.len();
        (0..self.segment_count()).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Total length of all segments.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| (b - a).norm()).sum()
    }
}
