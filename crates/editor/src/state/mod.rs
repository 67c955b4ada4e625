pub mod scene;
pub mod selection;
pub mod settings;

use shared::{Block, BlockDetail, BlockIndex, Point2D};

use crate::error::EditorResult;
use scene::{SceneGraph, UndoManager};
pub use selection::{ClickPolicy, Modifiers, SelectionState};
pub use settings::EditorSettings;

/// Toggles that change how clicks and rotations behave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditorModes {
    /// Suffix selection on click, and rotation tracking on rotate
    pub content_rotation: bool,
    /// Clicks select a single block
    pub move_single_block: bool,
    /// Left clicks add boundary points instead of selecting
    pub boundary_points: bool,
}

impl EditorModes {
    /// Single-block move wins over content rotation
    pub fn click_policy(&self) -> ClickPolicy {
        if self.move_single_block {
            ClickPolicy::SingleBlock
        } else if self.content_rotation {
            ClickPolicy::IndexSuffix
        } else {
            ClickPolicy::SceneGroup
        }
    }
}

/// Combined editor state
#[derive(Debug, Clone)]
pub struct EditorState {
    pub scene: SceneGraph,
    pub selection: SelectionState,
    pub history: UndoManager,
    pub modes: EditorModes,
    pub settings: EditorSettings,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::with_settings(EditorSettings::default())
    }
}

impl EditorState {
    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            scene: SceneGraph::default(),
            selection: SelectionState::default(),
            history: UndoManager::new(settings.history.max_depth),
            modes: EditorModes::default(),
            settings,
        }
    }

    /// Swap in new settings, keeping scene and history
    pub fn apply_settings(&mut self, settings: EditorSettings) {
        self.history.set_max_depth(settings.history.max_depth);
        self.settings = settings;
    }

    // ── Import / export ───────────────────────────────────────

    /// Replace the scene. On success selection and history start over; on
    /// failure nothing changes.
    pub fn import_scene(&mut self, blocks: Vec<Block>) -> EditorResult<()> {
        self.scene.replace_all(blocks)?;
        self.selection.clear();
        self.history.clear();
        Ok(())
    }

    /// Merge detail records onto the current blocks
    pub fn import_detail(&mut self, details: &[BlockDetail]) {
        self.scene.apply_detail(details);
        tracing::info!("Merged {} detail records", details.len());
    }

    pub fn export_scene(&self) -> Vec<Block> {
        self.scene.blocks().to_vec()
    }

    // ── History ───────────────────────────────────────────────

    /// Snapshot the current scene onto the undo stack
    pub fn push_undo(&mut self) -> bool {
        self.history.push(self.scene.snapshot())
    }

    /// Returns false when there was nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.scene.snapshot()) {
            Some(prev) => {
                self.scene.restore(prev);
                self.selection.clear();
                tracing::info!("Undo ({} left)", self.history.undo_len());
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.scene.snapshot()) {
            Some(next) => {
                self.scene.restore(next);
                self.selection.clear();
                tracing::info!("Redo ({} left)", self.history.redo_len());
                true
            }
            None => false,
        }
    }

    // ── Selection ─────────────────────────────────────────────

    /// Apply a block click under the current modes
    pub fn click_block(&mut self, index: BlockIndex, modifiers: Modifiers) -> bool {
        let policy = self.modes.click_policy();
        self.selection
            .click(index, modifiers, policy, self.scene.blocks())
    }

    // ── Rotation ──────────────────────────────────────────────

    /// One undoable rotation step of the selection
    pub fn rotate_selection_by(&mut self, angle_degrees: f64) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        self.push_undo();
        self.scene
            .rotate_selected(&self.selection, angle_degrees, self.modes.content_rotation)
    }

    /// The fixed-step batch rotate action
    pub fn rotate_selection_batch(&mut self) -> bool {
        self.rotate_selection_by(self.settings.rotation.batch_step_degrees)
    }

    // ── Background and boundary ───────────────────────────────

    /// Multiply the background image scale. Not undoable.
    pub fn scale_background(&mut self, factor: f64) -> bool {
        match self.scene.background_mut() {
            Some(image) => {
                image.scale_by(factor);
                true
            }
            None => false,
        }
    }

    /// Add a boundary point at a world position, converted to image-local
    pub fn add_boundary_point(&mut self, world: Point2D) -> bool {
        let Some(local) = self.scene.background().map(|img| img.to_local(world)) else {
            return false;
        };
        self.scene.boundary_mut().push(local)
    }

    pub fn close_boundary_path(&mut self) -> bool {
        self.scene.boundary_mut().close()
    }

    pub fn clear_boundary_path(&mut self) {
        self.scene.boundary_mut().clear();
    }

    pub fn replace_boundary_path(&mut self, points: Vec<Point2D>) {
        self.scene.boundary_mut().replace(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{detail, named_block, row_scene, three_block_scene};
    use super::scene::{BackgroundImage, TextureHandle};

    fn loaded() -> EditorState {
        let mut s = EditorState::default();
        s.import_scene(three_block_scene()).unwrap();
        s
    }

    #[test]
    fn test_click_policy_precedence() {
        let mut m = EditorModes::default();
        assert_eq!(m.click_policy(), ClickPolicy::SceneGroup);
        m.content_rotation = true;
        assert_eq!(m.click_policy(), ClickPolicy::IndexSuffix);
        m.move_single_block = true;
        assert_eq!(m.click_policy(), ClickPolicy::SingleBlock);
    }

    #[test]
    fn test_import_clears_selection_and_history() {
        let mut s = loaded();
        s.click_block(1, Modifiers::NONE);
        s.rotate_selection_batch();
        assert!(s.history.can_undo());

        s.import_scene(row_scene(2)).unwrap();
        assert!(s.selection.is_empty());
        assert!(!s.history.can_undo());
    }

    #[test]
    fn test_failed_import_keeps_everything() {
        let mut s = loaded();
        s.click_block(1, Modifiers::NONE);
        assert!(s.import_scene(vec![named_block(9, "bad")]).is_err());
        assert_eq!(s.scene.len(), 3);
        assert_eq!(s.selection.count(), 2);
    }

    #[test]
    fn test_detail_merge_keeps_history() {
        let mut s = loaded();
        s.click_block(3, Modifiers::NONE);
        s.rotate_selection_batch();
        s.import_detail(&[detail(3, Some(5.0), None)]);
        assert!(s.history.can_undo());
        assert_eq!(s.scene.get_block(3).unwrap().rotation_tracking_value, Some(5.0));
    }

    #[test]
    fn test_rotate_undo_restores_and_clears_selection() {
        let mut s = loaded();
        let before = s.export_scene();
        s.click_block(1, Modifiers::NONE);
        assert!(s.rotate_selection_batch());
        assert_ne!(s.export_scene(), before);

        assert!(s.undo());
        assert_eq!(s.export_scene(), before);
        assert!(s.selection.is_empty());
        assert!(s.redo());
        assert_ne!(s.export_scene(), before);
    }

    #[test]
    fn test_rotate_with_empty_selection_pushes_nothing() {
        let mut s = loaded();
        assert!(!s.rotate_selection_batch());
        assert!(!s.history.can_undo());
    }

    #[test]
    fn test_boundary_point_needs_image() {
        let mut s = loaded();
        assert!(!s.add_boundary_point(Point2D::new(1.0, 1.0)));

        let mut img = BackgroundImage::new(TextureHandle(1), 100.0, 100.0);
        img.x = 10.0;
        img.scale = 2.0;
        s.scene.set_background(img);
        assert!(s.add_boundary_point(Point2D::new(14.0, 2.0)));
        assert_eq!(s.scene.boundary().points(), &[Point2D::new(2.0, 1.0)]);
    }

    #[test]
    fn test_history_depth_follows_settings() {
        let mut s = loaded();
        let mut settings = EditorSettings::default();
        settings.history.max_depth = 2;
        s.apply_settings(settings);
        s.click_block(1, Modifiers::NONE);
        for _ in 0..5 {
            s.rotate_selection_by(10.0);
        }
        assert_eq!(s.history.undo_len(), 2);
    }
}
