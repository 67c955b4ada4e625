//! Pointer, wheel and keyboard routing

use std::time::Duration;

use shared::Point2D;

use super::keyboard::{shortcut, HoldAction, Key, Shortcut};
use super::{EditorSession, Effects};
use crate::state::Modifiers;
use crate::viewport::{pick_block, within_radius, PointerButton, Release};

impl EditorSession {
    // ── Pointer ───────────────────────────────────────────────

    pub fn on_pointer_down(
        &mut self,
        x: f64,
        y: f64,
        button: PointerButton,
        _modifiers: Modifiers,
    ) -> Effects {
        let screen = Point2D::new(x, y);
        match button {
            PointerButton::Secondary => {
                Effects::when(self.pan.begin(screen), Effects::CAPTURE_POINTER)
            }
            PointerButton::Primary => {
                let candidate = if self.state.modes.boundary_points {
                    None
                } else {
                    let world = self.viewport.screen_to_world(screen);
                    pick_block(self.state.scene.blocks(), world)
                };
                self.drag.press(screen, candidate);
                Effects::empty()
            }
            PointerButton::Middle => Effects::empty(),
        }
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Effects {
        let screen = Point2D::new(x, y);
        let mut effects = Effects::empty();

        if let Some(view) = self.pan.update(screen, &self.viewport.view) {
            self.viewport.view = view;
            effects |= Effects::REDRAW;
        }
        if self.drag.is_pressed() {
            let threshold = self.state.settings.interaction.drag_threshold_px;
            let moved = self
                .drag
                .pointer_move(screen, &self.viewport.view, threshold, &mut self.state);
            effects |= Effects::when(moved, Effects::scene());
        }
        effects
    }

    pub fn on_pointer_up(
        &mut self,
        x: f64,
        y: f64,
        button: PointerButton,
        modifiers: Modifiers,
    ) -> Effects {
        match button {
            PointerButton::Secondary => Effects::when(self.pan.end(), Effects::RELEASE_POINTER),
            PointerButton::Primary => match self.drag.release() {
                Release::Idle | Release::Dragged => Effects::empty(),
                Release::Click(_) if self.state.modes.boundary_points => {
                    self.boundary_click(Point2D::new(x, y))
                }
                Release::Click(anchor) => match anchor.candidate {
                    Some(index) => Effects::when(
                        self.state.click_block(index, modifiers),
                        Effects::selection(),
                    ),
                    // Empty space leaves the selection alone
                    None => Effects::empty(),
                },
            },
            PointerButton::Middle => Effects::empty(),
        }
    }

    /// Add a boundary point, or close the path near its first point
    fn boundary_click(&mut self, screen: Point2D) -> Effects {
        let Some(image) = self.state.scene.background() else {
            return Effects::empty();
        };
        let path = self.state.scene.boundary();
        if path.is_closed() {
            return Effects::empty();
        }

        let radius = self.state.settings.interaction.boundary_close_radius_px;
        let near_first = path.first().is_some_and(|first| {
            let first_screen = self.viewport.world_to_screen(image.to_world(first));
            within_radius(screen, first_screen, radius)
        });

        let changed = if path.len() >= 3 && near_first {
            tracing::debug!("closing boundary path");
            self.state.close_boundary_path()
        } else {
            let world = self.viewport.screen_to_world(screen);
            self.state.add_boundary_point(world)
        };
        Effects::when(changed, Effects::scene())
    }

    pub fn on_wheel(&mut self, delta_y: f64, x: f64, y: f64) -> Effects {
        let step = self.state.settings.interaction.zoom_step;
        let view = self
            .viewport
            .view
            .zoom_wheel(delta_y, Point2D::new(x, y), step);
        let changed = view != self.viewport.view;
        self.viewport.view = view;
        Effects::when(changed, Effects::REDRAW)
    }

    // ── Keyboard ──────────────────────────────────────────────

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Effects {
        match shortcut(key, modifiers) {
            Some(Shortcut::Undo) => self.undo(),
            Some(Shortcut::Redo) => self.redo(),
            Some(Shortcut::ClearSelection) => {
                let had = !self.state.selection.is_empty();
                self.state.selection.clear();
                Effects::when(had, Effects::selection())
            }
            Some(Shortcut::Hold(action)) => {
                let delay = self.state.settings.key_repeat.initial_delay();
                if self.keyboard.key_down(action, delay, &mut self.scheduler) {
                    self.hold_step(action, false)
                } else {
                    Effects::empty()
                }
            }
            None => Effects::empty(),
        }
    }

    pub fn on_key_up(&mut self, key: Key) -> Effects {
        if let Some(Shortcut::Hold(action)) = shortcut(key, Modifiers::NONE) {
            self.keyboard.key_up(action, &mut self.scheduler);
        }
        Effects::empty()
    }

    /// Window lost focus: stop every hold and gesture
    pub fn on_blur(&mut self) -> Effects {
        self.keyboard.release_all(&mut self.scheduler);
        self.cancel_gestures()
    }

    /// Abort drag and pan without producing a click
    pub fn cancel_gestures(&mut self) -> Effects {
        self.drag.cancel();
        Effects::when(self.pan.end(), Effects::RELEASE_POINTER)
    }

    /// Advance the host clock by `dt`, firing due key-repeat timers in order
    pub fn advance(&mut self, dt: Duration) -> Effects {
        let target = self.scheduler.now() + dt;
        let interval = self.state.settings.key_repeat.interval();
        let mut effects = Effects::empty();
        while let Some((id, timer)) = self.scheduler.pop_due(target) {
            if self
                .keyboard
                .on_timer(id, timer, interval, &mut self.scheduler)
            {
                effects |= self.hold_step(timer.action, true);
            }
        }
        self.scheduler.set_now(target);
        effects
    }

    /// One step of a held key: the larger step on key-down, the smaller on repeat
    fn hold_step(&mut self, action: HoldAction, repeat: bool) -> Effects {
        match action {
            HoldAction::RotateNegative | HoldAction::RotatePositive => {
                let rotation = &self.state.settings.rotation;
                let step = if repeat {
                    rotation.key_repeat_step_degrees
                } else {
                    rotation.key_initial_step_degrees
                };
                let rotated = self.state.rotate_selection_by(action.sign() * step);
                Effects::when(rotated, Effects::scene())
            }
            HoldAction::GrowBackground | HoldAction::ShrinkBackground => {
                let background = &self.state.settings.background;
                let step = if repeat {
                    background.scale_repeat_step
                } else {
                    background.scale_initial_step
                };
                let scaled = self.state.scale_background(1.0 + action.sign() * step);
                Effects::when(scaled, Effects::scene())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::three_block_scene;
    use crate::state::scene::TextureHandle;

    fn session() -> EditorSession {
        let mut s = EditorSession::default();
        s.import_scene(three_block_scene()).unwrap();
        s
    }

    fn click(s: &mut EditorSession, p: Point2D, m: Modifiers) -> Effects {
        s.on_pointer_down(p.x, p.y, PointerButton::Primary, m);
        s.on_pointer_up(p.x, p.y, PointerButton::Primary, m)
    }

    #[test]
    fn test_click_selects_scene_group() {
        let mut s = session();
        let p = s.view().world_to_screen(Point2D::new(20.0, 0.0));
        let fx = click(&mut s, p, Modifiers::NONE);
        assert!(fx.contains(Effects::SELECTION_CHANGED));
        assert_eq!(s.selection().all(), &[1, 2]);
    }

    #[test]
    fn test_click_empty_space_keeps_selection() {
        let mut s = session();
        let p = s.view().world_to_screen(Point2D::new(20.0, 0.0));
        click(&mut s, p, Modifiers::NONE);
        let gap = s.view().world_to_screen(Point2D::new(30.0, 0.0));
        assert_eq!(click(&mut s, gap, Modifiers::NONE), Effects::empty());
        assert_eq!(s.selection().count(), 2);
    }

    #[test]
    fn test_wheel_zoom_direction() {
        let mut s = session();
        s.set_view(crate::viewport::ViewTransform::new(2.0, 0.0, 0.0));
        let before = s.view().scale;
        s.on_wheel(-1.0, 400.0, 300.0);
        assert!((s.view().scale - before * 1.1).abs() < 1e-9);
        s.on_wheel(1.0, 400.0, 300.0);
        assert!((s.view().scale - before).abs() < 1e-9);
        assert_eq!(s.on_wheel(0.0, 400.0, 300.0), Effects::empty());
    }

    #[test]
    fn test_pan_capture_lifecycle() {
        let mut s = session();
        let down = s.on_pointer_down(10.0, 10.0, PointerButton::Secondary, Modifiers::NONE);
        assert_eq!(down, Effects::CAPTURE_POINTER);
        let before = s.view();
        s.on_pointer_move(30.0, 5.0);
        assert_eq!(s.view().offset_x, before.offset_x + 20.0);
        assert_eq!(s.view().offset_y, before.offset_y - 5.0);
        assert_eq!(s.on_blur(), Effects::RELEASE_POINTER);
        assert_eq!(
            s.on_pointer_up(30.0, 5.0, PointerButton::Secondary, Modifiers::NONE),
            Effects::empty()
        );
    }

    #[test]
    fn test_escape_clears_selection() {
        let mut s = session();
        let p = s.view().world_to_screen(Point2D::new(20.0, 0.0));
        click(&mut s, p, Modifiers::NONE);
        assert!(s.on_key_down(Key::Escape, Modifiers::NONE).contains(Effects::SELECTION_CHANGED));
        assert!(s.selection().is_empty());
    }

    #[test]
    fn test_boundary_mode_adds_and_closes() {
        let mut s = session();
        s.set_background_image(TextureHandle(1), 800.0, 600.0);
        s.set_modes(crate::state::EditorModes {
            boundary_points: true,
            ..Default::default()
        });
        for (x, y) in [(100.0, 100.0), (300.0, 100.0), (300.0, 300.0)] {
            click(&mut s, Point2D::new(x, y), Modifiers::NONE);
        }
        assert_eq!(s.scene().boundary().len(), 3);
        // Within the close radius of the first point
        click(&mut s, Point2D::new(104.0, 103.0), Modifiers::NONE);
        assert!(s.scene().boundary().is_closed());
        assert_eq!(s.scene().boundary().len(), 4);
        assert!(s.selection().is_empty());

        click(&mut s, Point2D::new(500.0, 500.0), Modifiers::NONE);
        assert_eq!(s.scene().boundary().len(), 4);
    }

    #[test]
    fn test_background_scale_keys_not_undoable() {
        let mut s = session();
        s.set_background_image(TextureHandle(1), 800.0, 600.0);
        let before = s.scene().background().unwrap().scale;
        s.on_key_down(Key::Equals, Modifiers::NONE);
        s.on_key_up(Key::Equals);
        let after = s.scene().background().unwrap().scale;
        assert!((after - before * 1.05).abs() < 1e-12);
        assert!(!s.history().can_undo());
    }
}
