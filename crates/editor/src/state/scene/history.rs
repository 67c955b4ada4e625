//! Undo/redo functionality

use serde::{Deserialize, Serialize};
use shared::{BackgroundTransform, Block, Point2D};

/// Everything an undoable operation can change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub blocks: Vec<Block>,
    pub boundary_points: Vec<Point2D>,
    /// `None` when no background image is loaded
    pub background: Option<BackgroundTransform>,
}

/// Snapshot stacks with a depth cap
#[derive(Debug, Clone)]
pub struct UndoManager {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_depth: usize,
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new(100)
    }
}

impl UndoManager {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Record `current` before a mutation.
    ///
    /// Skipped when the scene has no blocks or when `current` equals the
    /// newest entry. A successful push clears the redo stack.
    pub fn push(&mut self, current: Snapshot) -> bool {
        if current.blocks.is_empty() {
            return false;
        }
        if self.undo_stack.last() == Some(&current) {
            return false;
        }
        self.undo_stack.push(current);
        self.trim();
        self.redo_stack.clear();
        tracing::trace!("Undo depth {}", self.undo_stack.len());
        true
    }

    /// Step back from `current`; entries identical to it are discarded.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let prev = pop_distinct(&mut self.undo_stack, &current)?;
        self.redo_stack.push(current);
        Some(prev)
    }

    /// Step forward from `current`
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = pop_distinct(&mut self.redo_stack, &current)?;
        self.undo_stack.push(current);
        self.trim();
        Some(next)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth.max(1);
        self.trim();
    }

    fn trim(&mut self) {
        if self.undo_stack.len() > self.max_depth {
            let excess = self.undo_stack.len() - self.max_depth;
            self.undo_stack.drain(..excess);
        }
    }
}

fn pop_distinct(stack: &mut Vec<Snapshot>, current: &Snapshot) -> Option<Snapshot> {
    while let Some(top) = stack.pop() {
        if &top != current {
            return Some(top);
        }
    }
    None
}
