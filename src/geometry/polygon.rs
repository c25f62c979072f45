use serde::Serialize;

use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::{centroid_2d, dedup_vertices, signed_area_2d};
use crate::math::{Point2, TOLERANCE};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point2,
    /// Maximum corner of the bounding box.
    pub max: Point2,
}

impl Aabb {
    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Immutable closed polygon in the section plane.
///
/// Vertices are stored in open form: the closing edge from the last vertex
/// back to the first is implicit. Area, centroid and bounding box are derived
/// once at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    vertices: Vec<Point2>,
    area: f64,
    centroid: Point2,
    bbox: Aabb,
}

impl Polygon {
    /// Builds a polygon from an ordered vertex list in either orientation.
    ///
    /// Consecutive coincident vertices and a repeated closing vertex are
    /// collapsed before the polygon is validated.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegeneratePolygon` if fewer than three distinct
    /// vertices remain or the enclosed area is zero.
    pub fn new(vertices: &[Point2]) -> Result<Self> {
        let vertices = dedup_vertices(vertices);
        if vertices.len() < 3 {
            return Err(GeometryError::DegeneratePolygon(format!(
                "{} distinct vertices, at least 3 required",
                vertices.len()
            ))
            .into());
        }

        let signed = signed_area_2d(&vertices);
        if signed.abs() < TOLERANCE || !signed.is_finite() {
            return Err(GeometryError::DegeneratePolygon(format!(
                "zero area polygon starting at ({}, {})",
                vertices[0].x, vertices[0].y
            ))
            .into());
        }
        let centroid = centroid_2d(&vertices, signed);

        let mut min = vertices[0];
        let mut max = vertices[0];
        for pt in &vertices[1..] {
            min.x = min.x.min(pt.x);
            min.y = min.y.min(pt.y);
            max.x = max.x.max(pt.x);
            max.y = max.y.max(pt.y);
        }

        Ok(Self {
            vertices,
            area: signed.abs(),
            centroid,
            bbox: Aabb { min, max },
        })
    }

    /// Ordered vertices (open form).
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Unsigned enclosed area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area
    }

    #[must_use]
    pub fn centroid(&self) -> Point2 {
        self.centroid
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.bbox.width()
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bbox.height()
    }

    /// Finds the layer containing the centroid.
    ///
    /// `bottoms` holds the bottom elevation of each layer in descending order,
    /// the top of the first layer being the ground surface. Returns the first
    /// index whose bottom lies strictly below the centroid, or `None` when the
    /// centroid sits at or below the deepest bottom.
    #[must_use]
    pub fn locate_layer(&self, bottoms: &[f64]) -> Option<usize> {
        bottoms.iter().position(|&z| self.centroid.y > z)
    }
}
