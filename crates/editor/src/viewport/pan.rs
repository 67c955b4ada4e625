//! Right-button pan gesture over the view transform

use shared::Point2D;

use super::view_transform::ViewTransform;

/// Right-button viewport pan.
///
/// While active the host must route window-level move/up events here;
/// `begin` and `end` report when that capture starts and stops.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanGesture {
    last: Option<Point2D>,
}

impl PanGesture {
    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    /// Start panning. Returns true only when a new capture begins.
    pub fn begin(&mut self, screen: Point2D) -> bool {
        let fresh = self.last.is_none();
        self.last = Some(screen);
        fresh
    }

    /// Pan `view` by the screen delta since the last event
    pub fn update(&mut self, screen: Point2D, view: &ViewTransform) -> Option<ViewTransform> {
        let last = self.last.replace(screen)?;
        Some(view.pan_by(screen.x - last.x, screen.y - last.y))
    }

    /// Stop panning. Returns true only when a capture was released.
    pub fn end(&mut self) -> bool {
        self.last.take().is_some()
    }
}
