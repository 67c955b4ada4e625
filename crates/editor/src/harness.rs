//! Headless harness for scripting an editor session in world coordinates.
//!
//! Gestures are expressed in world units and converted through the current
//! view, so tests do not depend on where fit-to-view placed the scene.

use std::time::Duration;

use shared::{Block, BlockIndex, Point2D};

use crate::app::keyboard::Key;
use crate::app::{EditorSession, Effects};
use crate::state::Modifiers;
use crate::viewport::PointerButton;

/// Headless harness: owns a session and accumulates returned effects
pub struct TestHarness {
    pub session: EditorSession,
    effects: Effects,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            session: EditorSession::default(),
            effects: Effects::empty(),
        }
    }

    /// Harness with `blocks` already imported
    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        let mut h = Self::new();
        if let Ok(fx) = h.session.import_scene(blocks) {
            h.effects |= fx;
        }
        h
    }

    fn record(&mut self, fx: Effects) -> Effects {
        self.effects |= fx;
        fx
    }

    /// Effects since the last call
    pub fn take_effects(&mut self) -> Effects {
        std::mem::replace(&mut self.effects, Effects::empty())
    }

    pub fn screen_of(&self, world: Point2D) -> Point2D {
        self.session.view().world_to_screen(world)
    }

    // ── Pointer gestures ──────────────────────────────────────

    /// Left press and release at one world point
    pub fn click_world(&mut self, world: Point2D, modifiers: Modifiers) -> Effects {
        let p = self.screen_of(world);
        let mut fx = self
            .session
            .on_pointer_down(p.x, p.y, PointerButton::Primary, modifiers);
        fx |= self
            .session
            .on_pointer_up(p.x, p.y, PointerButton::Primary, modifiers);
        self.record(fx)
    }

    /// Left click at a screen position
    pub fn click_screen(&mut self, screen: Point2D) -> Effects {
        let mut fx = self.session.on_pointer_down(
            screen.x,
            screen.y,
            PointerButton::Primary,
            Modifiers::NONE,
        );
        fx |= self
            .session
            .on_pointer_up(screen.x, screen.y, PointerButton::Primary, Modifiers::NONE);
        self.record(fx)
    }

    /// Left drag from `from` through `steps` equal screen moves to `to`
    pub fn drag_screen(&mut self, from: Point2D, to: Point2D, steps: usize) -> Effects {
        let steps = steps.max(1);
        let mut fx = self
            .session
            .on_pointer_down(from.x, from.y, PointerButton::Primary, Modifiers::NONE);
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            let x = from.x + (to.x - from.x) * t;
            let y = from.y + (to.y - from.y) * t;
            fx |= self.session.on_pointer_move(x, y);
        }
        fx |= self
            .session
            .on_pointer_up(to.x, to.y, PointerButton::Primary, Modifiers::NONE);
        self.record(fx)
    }

    /// Left drag between two world points
    pub fn drag_world(&mut self, from: Point2D, to: Point2D, steps: usize) -> Effects {
        let (a, b) = (self.screen_of(from), self.screen_of(to));
        self.drag_screen(a, b, steps)
    }

    // ── Keyboard ──────────────────────────────────────────────

    pub fn press(&mut self, key: Key, modifiers: Modifiers) -> Effects {
        let fx = self.session.on_key_down(key, modifiers);
        self.record(fx)
    }

    pub fn release(&mut self, key: Key) -> Effects {
        let fx = self.session.on_key_up(key);
        self.record(fx)
    }

    /// Press, hold for `held`, release
    pub fn hold(&mut self, key: Key, held: Duration) -> Effects {
        let mut fx = self.press(key, Modifiers::NONE);
        fx |= self.advance(held);
        fx |= self.release(key);
        fx
    }

    pub fn advance(&mut self, dt: Duration) -> Effects {
        let fx = self.session.advance(dt);
        self.record(fx)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn selected(&self) -> Vec<BlockIndex> {
        self.session.selection().all().to_vec()
    }

    pub fn block(&self, index: BlockIndex) -> Option<&Block> {
        self.session.scene().get_block(index)
    }

    pub fn block_count(&self) -> usize {
        self.session.scene().len()
    }

    pub fn undo_depth(&self) -> usize {
        self.session.history().undo_len()
    }

    pub fn undo(&mut self) -> bool {
        let fx = self.session.undo();
        self.record(fx);
        !fx.is_empty()
    }

    pub fn redo(&mut self) -> bool {
        let fx = self.session.redo();
        self.record(fx);
        !fx.is_empty()
    }
}
