//! Pure geometry helpers over point sets, using the kurbo library

use kurbo::{Affine, BezPath, Point, Rect, Shape};
use shared::Point2D;

// ============================================================================
// Kurbo helpers
// ============================================================================

/// Convert to kurbo Point
pub fn to_point(p: Point2D) -> Point {
    Point::new(p.x, p.y)
}

/// Convert from kurbo Point
pub fn from_point(p: Point) -> Point2D {
    Point2D::new(p.x, p.y)
}

// ============================================================================
// Centroid and rotation
// ============================================================================

/// Arithmetic mean of the supplied points. `None` for an empty set.
pub fn centroid(points: &[Point2D]) -> Option<Point2D> {
    centroid_of(points.iter().copied())
}

/// Arithmetic mean of an arbitrary point stream
pub fn centroid_of(points: impl IntoIterator<Item = Point2D>) -> Option<Point2D> {
    let (sum_x, sum_y, n) = points
        .into_iter()
        .fold((0.0, 0.0, 0usize), |(sx, sy, n), p| (sx + p.x, sy + p.y, n + 1));
    if n == 0 {
        return None;
    }
    Some(Point2D::new(sum_x / n as f64, sum_y / n as f64))
}

/// Affine rotation about `center` by `angle` radians
pub fn rotation_about(center: Point2D, angle: f64) -> Affine {
    Affine::rotate_about(angle, to_point(center))
}

/// Rotate a single point about `center`
pub fn rotate_point(p: Point2D, center: Point2D, angle: f64) -> Point2D {
    from_point(rotation_about(center, angle) * to_point(p))
}

/// Rotate every point about `center` by `angle` radians.
///
/// `x' = cx + (x-cx)cos - (y-cy)sin`, `y' = cy + (x-cx)sin + (y-cy)cos`.
/// The input is left untouched.
pub fn rotate_around(points: &[Point2D], center: Point2D, angle: f64) -> Vec<Point2D> {
    let affine = rotation_about(center, angle);
    points
        .iter()
        .map(|p| from_point(affine * to_point(*p)))
        .collect()
}

// ============================================================================
// Bounds and hit testing
// ============================================================================

/// Axis-aligned bounds of the finite points; `None` when there are none.
pub fn bounds_of(points: impl IntoIterator<Item = Point2D>) -> Option<Rect> {
    points
        .into_iter()
        .filter(|p| p.is_finite())
        .fold(None, |acc: Option<Rect>, p| {
            let pt = to_point(p);
            Some(match acc {
                Some(r) => r.union_pt(pt),
                None => Rect::from_points(pt, pt),
            })
        })
}

/// Closed polygon path through the points in order
pub fn polygon_path(points: &[Point2D]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(to_point(*first));
        for p in iter {
            path.line_to(to_point(*p));
        }
        path.close_path();
    }
    path
}

/// Nonzero-winding point-in-polygon test
pub fn polygon_contains(points: &[Point2D], p: Point2D) -> bool {
    if points.len() < 3 {
        return false;
    }
    polygon_path(points).contains(to_point(p))
}
