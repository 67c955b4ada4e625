//! Click-versus-drag disambiguation and block dragging

use shared::{BlockIndex, Point2D};

use super::view_transform::ViewTransform;
use crate::state::EditorState;

/// Where a press started
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub screen: Point2D,
    /// Block under the press, if any
    pub candidate: Option<BlockIndex>,
}

/// How a press ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// No press was in progress
    Idle,
    /// Never crossed the threshold
    Click(DragAnchor),
    /// Crossed the threshold at some point
    Dragged,
}

/// Turns a left press into either a click or an incremental drag
#[derive(Debug, Clone, Default)]
pub struct DragController {
    anchor: Option<DragAnchor>,
    started: bool,
    /// World position the previous delta was measured to
    last_world: Point2D,
}

impl DragController {
    /// Record a press. Nothing is selected or moved yet.
    pub fn press(&mut self, screen: Point2D, candidate: Option<BlockIndex>) {
        self.anchor = Some(DragAnchor { screen, candidate });
        self.started = false;
    }

    pub fn anchor(&self) -> Option<DragAnchor> {
        self.anchor
    }

    pub fn is_pressed(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.started
    }

    /// Track the pointer.
    ///
    /// The first move at least `threshold_px` from the anchor starts the
    /// drag and pushes one undo snapshot; from then on every move translates
    /// the selected blocks (or the candidate alone when nothing is selected)
    /// by the world delta since the previous move. Returns true when block
    /// geometry changed.
    pub fn pointer_move(
        &mut self,
        screen: Point2D,
        view: &ViewTransform,
        threshold_px: f64,
        state: &mut EditorState,
    ) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        let Some(candidate) = anchor.candidate else {
            // Presses over empty space never move anything
            if screen.distance(anchor.screen) >= threshold_px {
                self.started = true;
            }
            return false;
        };

        if !self.started {
            if screen.distance(anchor.screen) < threshold_px {
                return false;
            }
            self.started = true;
            self.last_world = view.screen_to_world(anchor.screen);
            state.push_undo();
            tracing::debug!(candidate, "drag started");
        }

        let world = view.screen_to_world(screen);
        let (dx, dy) = (world.x - self.last_world.x, world.y - self.last_world.y);
        self.last_world = world;
        if dx == 0.0 && dy == 0.0 {
            return false;
        }

        let targets: Vec<BlockIndex> = if state.selection.is_empty() {
            vec![candidate]
        } else {
            state.selection.all().to_vec()
        };
        state.scene.translate(&targets, dx, dy) > 0
    }

    /// End the press and clear all drag state
    pub fn release(&mut self) -> Release {
        let outcome = match self.anchor.take() {
            None => Release::Idle,
            Some(_) if self.started => Release::Dragged,
            Some(anchor) => Release::Click(anchor),
        };
        self.started = false;
        outcome
    }

    /// Drop the press without producing a click
    pub fn cancel(&mut self) {
        self.anchor = None;
        self.started = false;
    }
}
