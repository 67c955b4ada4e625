//! World to screen mapping with zoom, pan and fit-to-bounds

use kurbo::{Affine, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use shared::Point2D;

use crate::geometry::{from_point, to_point};

/// Smallest allowed world→screen scale
pub const MIN_SCALE: f64 = 0.05;
/// Largest allowed world→screen scale
pub const MAX_SCALE: f64 = 10.0;

/// Uniform scale plus pixel offset mapping world space to screen space.
///
/// `screen = world * scale + offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale: clamp_scale(scale),
            offset_x,
            offset_y,
        }
    }

    /// World → screen
    pub fn world_to_screen(&self, p: Point2D) -> Point2D {
        Point2D::new(
            p.x * self.scale + self.offset_x,
            p.y * self.scale + self.offset_y,
        )
    }

    /// Screen → world
    pub fn screen_to_world(&self, p: Point2D) -> Point2D {
        Point2D::new(
            (p.x - self.offset_x) / self.scale,
            (p.y - self.offset_y) / self.scale,
        )
    }

    /// Scale by `factor` keeping the world point under `screen` fixed.
    pub fn zoom_at(&self, screen: Point2D, factor: f64) -> Self {
        let anchor = self.screen_to_world(screen);
        let scale = clamp_scale(self.scale * factor);
        Self {
            scale,
            offset_x: screen.x - anchor.x * scale,
            offset_y: screen.y - anchor.y * scale,
        }
    }

    /// Wheel zoom: negative `delta_y` (wheel up) zooms in by `step`,
    /// positive zooms out by the same step.
    pub fn zoom_wheel(&self, delta_y: f64, screen: Point2D, step: f64) -> Self {
        if delta_y < 0.0 {
            self.zoom_at(screen, step)
        } else if delta_y > 0.0 {
            self.zoom_at(screen, 1.0 / step)
        } else {
            *self
        }
    }

    /// Move the whole viewport by a screen-space delta
    pub fn pan_by(&self, dx: f64, dy: f64) -> Self {
        Self {
            scale: self.scale,
            offset_x: self.offset_x + dx,
            offset_y: self.offset_y + dy,
        }
    }

    /// Fit `bounds` into `viewport` leaving `margin` (fraction of each side)
    /// empty, centred. Non-finite bounds give the identity transform.
    pub fn fit_to_bounds(bounds: Rect, viewport: Size, margin: f64) -> Self {
        let finite = [bounds.x0, bounds.y0, bounds.x1, bounds.y1]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Self::IDENTITY;
        }

        let bbox_w = bounds.width();
        let bbox_h = bounds.height();
        let scale_x = viewport.width * (1.0 - margin * 2.0) / non_zero(bbox_w);
        let scale_y = viewport.height * (1.0 - margin * 2.0) / non_zero(bbox_h);
        let scale = scale_x.min(scale_y);
        if !scale.is_finite() || scale <= 0.0 {
            return Self::IDENTITY;
        }
        let scale = clamp_scale(scale);

        Self {
            scale,
            offset_x: (viewport.width - bbox_w * scale) / 2.0 - bounds.x0 * scale,
            offset_y: (viewport.height - bbox_h * scale) / 2.0 - bounds.y0 * scale,
        }
    }

    /// World → screen as an affine map (for renderers)
    pub fn to_affine(&self) -> Affine {
        Affine::translate(Vec2::new(self.offset_x, self.offset_y)) * Affine::scale(self.scale)
    }

    /// World-space rectangle currently visible in a viewport of `size`
    pub fn visible_world_rect(&self, size: Size) -> Rect {
        let a = self.screen_to_world(Point2D::ORIGIN);
        let b = self.screen_to_world(Point2D::new(size.width, size.height));
        Rect::from_points(to_point(a), to_point(b))
    }

    /// World-space point under the centre of a viewport of `size`
    pub fn visible_center(&self, size: Size) -> Point2D {
        from_point(self.visible_world_rect(size).center())
    }
}

fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// A zero-length bbox side counts as 1
fn non_zero(len: f64) -> f64 {
    if len == 0.0 {
        1.0
    } else {
        len
    }
}
