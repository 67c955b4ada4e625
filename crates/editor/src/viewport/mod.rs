//! 2D viewport: view transform, hit testing and pointer gestures

pub mod drag;
pub mod pan;
pub mod picking;
pub mod view_transform;

use kurbo::{Rect, Size};
use shared::Point2D;

pub use drag::{DragAnchor, DragController, Release};
pub use pan::PanGesture;
pub use picking::{pick_block, within_radius};
pub use view_transform::{ViewTransform, MAX_SCALE, MIN_SCALE};

/// Pointer buttons the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// View transform plus the pixel size of the canvas it maps onto
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub view: ViewTransform,
    pub size: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            view: ViewTransform::IDENTITY,
            size: Size::new(800.0, 600.0),
        }
    }
}

impl Viewport {
    pub fn screen_to_world(&self, screen: Point2D) -> Point2D {
        self.view.screen_to_world(screen)
    }

    pub fn world_to_screen(&self, world: Point2D) -> Point2D {
        self.view.world_to_screen(world)
    }

    /// Fit `bounds` to the canvas; `None` resets to identity
    pub fn fit(&mut self, bounds: Option<Rect>, margin: f64) {
        self.view = match bounds {
            Some(b) => ViewTransform::fit_to_bounds(b, self.size, margin),
            None => ViewTransform::IDENTITY,
        };
        tracing::debug!(scale = self.view.scale, "fit view");
    }

    /// World rectangle currently on screen
    pub fn visible_world_rect(&self) -> Rect {
        self.view.visible_world_rect(self.size)
    }
}
