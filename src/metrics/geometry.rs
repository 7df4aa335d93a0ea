//! Planar geometry for blind-spot polygons.
//!
//! A camera's blind spot is a simple polygon (convex or not) given as an
//! ordered ring of vertices. This module reduces such a polygon to a
//! [`CameraQualityInformation`]: its area centroid and the vertex farthest
//! from that centroid. The pair is recomputed on every evaluation because
//! cameras move and rotate between timesteps.

use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, MetricsResult};

/// Tolerance for the zero-area test on a shape scaled to unit extent.
const DEGENERATE_AREA_EPSILON: f64 = 1e-12;

/// Immutable point in the scene's planar coordinate frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Rotate around the origin by `degrees` (counter-clockwise, y up).
    pub fn rotated(&self, degrees: f64) -> Point2D {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point2D {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    pub fn translated(&self, offset: Point2D) -> Point2D {
        Point2D {
            x: self.x + offset.x,
            y: self.y + offset.y,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Point2D { x, y }
    }
}

/// Blind-spot polygon as an ordered, closed ring of boundary vertices.
///
/// The closing vertex may or may not repeat the first one; both forms
/// describe the same polygon.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlindSpotShape {
    pub vertices: Vec<Point2D>,
}

impl BlindSpotShape {
    pub fn new(vertices: Vec<Point2D>) -> Self {
        Self { vertices }
    }

    /// Vertices of the ring without a repeated closing vertex.
    pub fn ring(&self) -> &[Point2D] {
        match self.vertices.as_slice() {
            [first, .., last] if first == last => &self.vertices[..self.vertices.len() - 1],
            all => all,
        }
    }

    /// Same shape rotated by `degrees` about the local origin and then moved to `origin`.
    pub fn placed_at(&self, origin: Point2D, degrees: f64) -> BlindSpotShape {
        BlindSpotShape {
            vertices: self
                .vertices
                .iter()
                .map(|v| v.rotated(degrees).translated(origin))
                .collect(),
        }
    }

    /// Signed shoelace area; positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        let ring = self.ring();
        let n = ring.len();
        if n < 3 {
            return 0.0;
        }
        let origin = ring[0];
        let mut twice_area = 0.0;
        for i in 0..n {
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            twice_area += (a.x - origin.x) * (b.y - origin.y) - (b.x - origin.x) * (a.y - origin.y);
        }
        twice_area / 2.0
    }

    /// Area-weighted centroid of the polygon.
    ///
    /// Coordinates are shifted to the first vertex and divided by the shape's
    /// bounding extent before accumulating. The zero-area test then compares
    /// a scale-free area, and the cross products stay finite for shapes far
    /// from the origin or with very large coordinates.
    pub fn centroid(&self) -> MetricsResult<Point2D> {
        let ring = self.ring();
        if ring.is_empty() {
            return Err(MetricsError::EmptyShape);
        }
        if let Some(bad) = ring.iter().find(|v| !v.is_finite()) {
            return Err(MetricsError::NonFiniteCoordinate { x: bad.x, y: bad.y });
        }

        let degenerate = MetricsError::DegenerateShape {
            vertices: ring.len(),
        };
        let extent = bounding_extent(ring);
        if ring.len() < 3 || extent <= 0.0 || !extent.is_finite() {
            return Err(degenerate);
        }

        let origin = ring[0];
        let local = |p: Point2D| ((p.x - origin.x) / extent, (p.y - origin.y) / extent);
        let n = ring.len();
        let (mut twice_area, mut cx, mut cy) = (0.0, 0.0, 0.0);
        for i in 0..n {
            let (ax, ay) = local(ring[i]);
            let (bx, by) = local(ring[(i + 1) % n]);
            let cross = ax * by - bx * ay;
            twice_area += cross;
            cx += (ax + bx) * cross;
            cy += (ay + by) * cross;
        }
        let area = twice_area / 2.0;
        if area.abs() <= DEGENERATE_AREA_EPSILON {
            return Err(degenerate);
        }

        let factor = extent / (6.0 * area);
        Ok(Point2D {
            x: origin.x + cx * factor,
            y: origin.y + cy * factor,
        })
    }

    /// Vertex farthest from `from`. Ties keep the earliest vertex.
    pub fn farthest_vertex(&self, from: Point2D) -> MetricsResult<Point2D> {
        let mut best: Option<(Point2D, f64)> = None;
        for &vertex in self.ring() {
            let distance = vertex.distance(from);
            match best {
                Some((_, best_distance)) if distance <= best_distance => {}
                _ => best = Some((vertex, distance)),
            }
        }
        best.map(|(vertex, _)| vertex)
            .ok_or(MetricsError::EmptyShape)
    }
}

/// Diagonal length of the axis-aligned bounding box of `points`.
fn bounding_extent(points: &[Point2D]) -> f64 {
    let mut min = Point2D::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2D::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    min.distance(max)
}

/// Worst-case observation descriptor of one camera's blind spot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraQualityInformation {
    /// Area centroid of the blind spot.
    pub centroid: Point2D,
    /// Blind-spot vertex farthest from the centroid.
    pub worst_case: Point2D,
}

impl CameraQualityInformation {
    pub fn new(centroid: Point2D, worst_case: Point2D) -> Self {
        Self {
            centroid,
            worst_case,
        }
    }

    /// Reduce a blind-spot polygon (already in the scene frame) to its
    /// centroid and worst-case vertex.
    pub fn from_shape(shape: &BlindSpotShape) -> MetricsResult<Self> {
        let centroid = shape.centroid()?;
        let worst_case = shape.farthest_vertex(centroid)?;
        Ok(Self {
            centroid,
            worst_case,
        })
    }

    /// Distance from the centroid to the worst-case vertex.
    pub fn radius(&self) -> f64 {
        self.centroid.distance(self.worst_case)
    }
}
