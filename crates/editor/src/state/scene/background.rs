//! Background reference image and the boundary path traced over it

use kurbo::{Affine, Rect, Vec2};
use shared::{BackgroundTransform, Point2D};

use crate::geometry::{from_point, to_point};

/// Two boundary points closer than this are the same point
pub const CLOSE_EPSILON: f64 = 1e-6;

/// Smallest scale the image may shrink to
const MIN_IMAGE_SCALE: f64 = 1e-3;

/// Opaque handle to a decoded texture owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Reference image placed in world space.
///
/// Image-local coordinates are pixels relative to the image centre:
/// `world = (x, y) + rotate(rotation) * (local * scale)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundImage {
    pub texture: TextureHandle,
    /// Natural pixel size
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    /// Radians
    pub rotation: f64,
}

impl BackgroundImage {
    /// Image centred on the world origin at natural size
    pub fn new(texture: TextureHandle, width: f64, height: f64) -> Self {
        Self {
            texture,
            width,
            height,
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
        }
    }

    /// Image scaled uniformly to fit inside `visible` (world units), centred.
    pub fn fitted(texture: TextureHandle, width: f64, height: f64, visible: Rect) -> Self {
        let mut image = Self::new(texture, width, height);
        if width > 0.0 && height > 0.0 {
            let scale = (visible.width() / width).min(visible.height() / height);
            if scale.is_finite() && scale > 0.0 {
                image.scale = scale;
            }
        }
        let c = visible.center();
        if c.x.is_finite() && c.y.is_finite() {
            image.x = c.x;
            image.y = c.y;
        }
        image
    }

    pub fn transform(&self) -> BackgroundTransform {
        BackgroundTransform {
            x: self.x,
            y: self.y,
            scale: self.scale,
            rotation: self.rotation,
        }
    }

    pub fn set_transform(&mut self, t: BackgroundTransform) {
        self.x = t.x;
        self.y = t.y;
        self.scale = t.scale;
        self.rotation = t.rotation;
    }

    /// Multiply the scale, never reaching zero
    pub fn scale_by(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.scale = (self.scale * factor).max(MIN_IMAGE_SCALE);
        }
    }

    /// Image-local → world
    pub fn local_to_world(&self) -> Affine {
        Affine::translate(Vec2::new(self.x, self.y))
            * Affine::rotate(self.rotation)
            * Affine::scale(self.scale)
    }

    pub fn to_world(&self, local: Point2D) -> Point2D {
        from_point(self.local_to_world() * to_point(local))
    }

    pub fn to_local(&self, world: Point2D) -> Point2D {
        from_point(self.local_to_world().inverse() * to_point(world))
    }
}

/// Polyline in image-local coordinates; closed once it ends where it began.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundaryPath {
    points: Vec<Point2D>,
}

impl BoundaryPath {
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point2D> {
        self.points.first().copied()
    }

    /// At least two points and the last equals the first
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() >= 2 => {
                first.distance(*last) < CLOSE_EPSILON
            }
            _ => false,
        }
    }

    /// Append a point; rejected once the path is closed
    pub fn push(&mut self, p: Point2D) -> bool {
        if self.is_closed() {
            return false;
        }
        self.points.push(p);
        true
    }

    /// Close by repeating the first point. Needs at least three points.
    pub fn close(&mut self) -> bool {
        if self.is_closed() || self.points.len() < 3 {
            return false;
        }
        let first = self.points[0];
        self.points.push(first);
        true
    }

    pub fn replace(&mut self, points: Vec<Point2D>) {
        self.points = points;
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
