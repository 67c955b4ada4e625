//! Static 2D footprint of an imported 3D model

use std::collections::BTreeSet;

use glam::DVec3;
use kurbo::Rect;
use shared::Point2D;

use crate::geometry::{bounds_of, centroid_of, from_point};

/// Coordinates below this magnitude count as lying on an axis plane
const FLAT_AXIS_EPSILON: f64 = 0.1;

/// Length annotation for one model edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeLabel {
    pub from: usize,
    pub to: usize,
    pub midpoint: Point2D,
    pub length: f64,
}

/// Read-only overlay geometry. Never selected or dragged.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOverlay {
    pub vertices: Vec<Point2D>,
    /// Vertex indices per face, at least three each
    pub faces: Vec<Vec<usize>>,
    pub bounds: Rect,
    pub center: Point2D,
}

impl ModelOverlay {
    /// Build from 2D vertices, dropping faces that are too small or reference
    /// missing vertices.
    pub fn new(vertices: Vec<Point2D>, faces: Vec<Vec<usize>>) -> Self {
        let total = faces.len();
        let faces: Vec<Vec<usize>> = faces
            .into_iter()
            .filter(|f| f.len() >= 3 && f.iter().all(|&i| i < vertices.len()))
            .collect();
        if faces.len() < total {
            tracing::warn!("Dropped {} invalid model faces", total - faces.len());
        }

        let bounds = bounds_of(vertices.iter().copied())
            .unwrap_or_else(|| Rect::new(-1.0, -1.0, 1.0, 1.0));
        Self {
            center: from_point(bounds.center()),
            vertices,
            faces,
            bounds,
        }
    }

    /// Project 3D vertices onto the plane the model most likely lies in.
    ///
    /// The choice is made per vertex: a vertex with small `y` and non-small
    /// `z` maps to `(x, z)`; else small `z` maps to `(x, y)`; else small `x`
    /// maps to `(y, z)`; anything else falls back to `(x, y)`.
    pub fn flatten(vertices: &[DVec3], faces: Vec<Vec<usize>>) -> Self {
        let flat = vertices.iter().map(|&v| flatten_vertex(v)).collect();
        Self::new(flat, faces)
    }

    /// Mean of the finite vertices
    pub fn centroid(&self) -> Option<Point2D> {
        centroid_of(self.vertices.iter().copied().filter(|p| p.is_finite()))
    }

    /// Every undirected face edge once, in first-seen order
    pub fn edge_labels(&self) -> Vec<EdgeLabel> {
        let mut seen = BTreeSet::new();
        let mut labels = Vec::new();
        for face in &self.faces {
            let next = face.iter().cycle().skip(1);
            for (&a, &b) in face.iter().zip(next) {
                let key = (a.min(b), a.max(b));
                if a == b || !seen.insert(key) {
                    continue;
                }
                let (pa, pb) = (self.vertices[a], self.vertices[b]);
                labels.push(EdgeLabel {
                    from: a,
                    to: b,
                    midpoint: Point2D::new((pa.x + pb.x) / 2.0, (pa.y + pb.y) / 2.0),
                    length: pa.distance(pb),
                });
            }
        }
        labels
    }
}

fn flatten_vertex(v: DVec3) -> Point2D {
    let small = |c: f64| c.abs() < FLAT_AXIS_EPSILON;
    if small(v.y) && v.z.abs() > FLAT_AXIS_EPSILON {
        Point2D::new(v.x, v.z)
    } else if small(v.z) {
        Point2D::new(v.x, v.y)
    } else if small(v.x) {
        Point2D::new(v.y, v.z)
    } else {
        Point2D::new(v.x, v.y)
    }
}
