//! Scene graph
//!
//! This module holds the block list, the background image, the boundary
//! point path and the flattened model overlay, plus the operations that
//! mutate them. Undo/redo snapshots are taken and restored here.

mod background;
mod display;
mod history;
mod import;
mod model;
mod rotation_ops;
mod transform_ops;

pub use background::{BackgroundImage, BoundaryPath, TextureHandle, CLOSE_EPSILON};
pub use display::{block_label_position, scene_color, scene_groups, SceneGroup, PALETTE};
pub use history::{Snapshot, UndoManager};
pub use import::{merge_detail, validate_blocks};
pub use model::{EdgeLabel, ModelOverlay};
pub use rotation_ops::{need_update_indices, rotate_selection};

use kurbo::Rect;
use shared::{Block, BlockIndex};

use crate::geometry::bounds_of;

/// Blocks plus background entities
#[derive(Debug, Default, Clone)]
pub struct SceneGraph {
    pub(crate) blocks: Vec<Block>,
    pub(crate) background: Option<BackgroundImage>,
    pub(crate) boundary: BoundaryPath,
    pub(crate) model: Option<ModelOverlay>,
    /// Monotonically increasing version counter for render-cache invalidation
    pub(crate) version: u64,
}

impl SceneGraph {
    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Get a block by its stable index
    pub fn get_block(&self, index: BlockIndex) -> Option<&Block> {
        self.blocks.iter().find(|b| b.index == index)
    }

    /// Get mutable block by its stable index
    pub fn get_block_mut(&mut self, index: BlockIndex) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.index == index)
    }

    /// Bounds of every vertex, entrance and exit
    pub fn bounds(&self) -> Option<Rect> {
        bounds_of(self.blocks.iter().flat_map(Block::all_points))
    }

    // ── Background image slot ─────────────────────────────────

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    pub fn background_mut(&mut self) -> Option<&mut BackgroundImage> {
        self.version += 1;
        self.background.as_mut()
    }

    pub fn set_background(&mut self, image: BackgroundImage) {
        self.background = Some(image);
        self.version += 1;
    }

    pub fn clear_background(&mut self) -> Option<BackgroundImage> {
        self.version += 1;
        self.background.take()
    }

    // ── Boundary path slot ────────────────────────────────────

    pub fn boundary(&self) -> &BoundaryPath {
        &self.boundary
    }

    pub fn boundary_mut(&mut self) -> &mut BoundaryPath {
        self.version += 1;
        &mut self.boundary
    }

    // ── Model overlay slot ────────────────────────────────────

    pub fn model(&self) -> Option<&ModelOverlay> {
        self.model.as_ref()
    }

    pub fn set_model(&mut self, model: Option<ModelOverlay>) {
        self.model = model;
        self.version += 1;
    }

    // ── Snapshots ─────────────────────────────────────────────

    /// Deep copy of everything undoable (textures excluded)
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            blocks: self.blocks.clone(),
            boundary_points: self.boundary.points().to_vec(),
            background: self.background.as_ref().map(BackgroundImage::transform),
        }
    }

    /// Restore from a snapshot taken earlier.
    ///
    /// A snapshot without a background transform leaves the current image in
    /// place, since textures are never part of the history.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.blocks = snapshot.blocks;
        self.boundary.replace(snapshot.boundary_points);
        if let (Some(image), Some(transform)) = (self.background.as_mut(), snapshot.background) {
            image.set_transform(transform);
        }
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{named_block, three_block_scene};
    use shared::{BackgroundTransform, Point2D};

    fn scene() -> SceneGraph {
        let mut s = SceneGraph::default();
        s.replace_all(three_block_scene()).unwrap();
        s
    }

    #[test]
    fn test_lookup_by_index() {
        let s = scene();
        assert_eq!(s.get_block(2).map(|b| b.name.as_str()), Some("1-b"));
        assert!(s.get_block(42).is_none());
    }

    #[test]
    fn test_bounds_include_markers() {
        let mut s = SceneGraph::default();
        let mut b = named_block(1, "1-a");
        b.exit = Point2D::new(100.0, -50.0);
        s.replace_all(vec![b]).unwrap();
        let r = s.bounds().unwrap();
        assert_eq!(r.x1, 100.0);
        assert_eq!(r.y0, -50.0);
    }

    #[test]
    fn test_snapshot_is_deep_copy() {
        let mut s = scene();
        let snap = s.snapshot();
        s.translate(&[1], 5.0, 5.0);
        assert_ne!(s.blocks()[0], snap.blocks[0]);
        s.restore(snap.clone());
        assert_eq!(s.blocks(), snap.blocks.as_slice());
    }

    #[test]
    fn test_restore_background_transform() {
        let mut s = scene();
        s.set_background(BackgroundImage::new(TextureHandle(1), 640.0, 480.0));
        let snap = s.snapshot();
        if let Some(img) = s.background_mut() {
            img.scale = 3.0;
            img.rotation = 1.0;
        }
        s.restore(snap);
        assert_eq!(
            s.background().map(BackgroundImage::transform),
            Some(BackgroundTransform::default())
        );
        assert_eq!(s.background().map(|i| i.texture), Some(TextureHandle(1)));
    }

    #[test]
    fn test_restore_without_transform_keeps_image() {
        let mut s = scene();
        let snap = s.snapshot();
        s.set_background(BackgroundImage::new(TextureHandle(7), 10.0, 10.0));
        s.restore(snap);
        assert!(s.background().is_some());
    }

    #[test]
    fn test_version_bumps() {
        let mut s = SceneGraph::default();
        let v0 = s.version();
        s.replace_all(three_block_scene()).unwrap();
        s.translate(&[1], 1.0, 0.0);
        assert!(s.version() >= v0 + 2);
    }
}
