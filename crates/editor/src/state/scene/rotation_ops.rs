//! Batch rotation of the selected blocks about their combined centroid

use std::collections::BTreeSet;

use shared::{Block, BlockIndex};

use super::SceneGraph;
use crate::geometry::{centroid_of, rotate_around, rotate_point};
use crate::state::selection::SelectionState;

/// Blocks whose tracking value a rotation batch decrements: the lowest
/// selected index plus every block already flagged to propagate, selected
/// or not.
pub fn need_update_indices(blocks: &[Block], selection: &SelectionState) -> BTreeSet<BlockIndex> {
    let mut out: BTreeSet<BlockIndex> = blocks
        .iter()
        .filter(|b| b.propagates_rotation())
        .map(|b| b.index)
        .collect();
    if let Some(min) = selection.min_index() {
        out.insert(min);
    }
    out
}

/// Rotate the selection by `angle_degrees` and return the new block list.
///
/// Vertices, entrance and exit of every selected block turn about the mean
/// of all those points. With `rotation_mode` on, every block in
/// `need_update` has its tracking value decremented by the angle, even one
/// outside the selection whose geometry stays put, and the lowest
/// selected block is flagged to propagate. `delta_yaw` only advances when a
/// single block is selected.
pub fn rotate_selection(
    selection: &SelectionState,
    blocks: &[Block],
    angle_degrees: f64,
    rotation_mode: bool,
    need_update: &BTreeSet<BlockIndex>,
) -> Vec<Block> {
    let selected = |b: &&Block| selection.is_selected(b.index);
    let Some(center) = centroid_of(blocks.iter().filter(selected).flat_map(Block::all_points))
    else {
        return blocks.to_vec();
    };

    let angle = angle_degrees.to_radians();
    let single = selection.count() == 1;
    let primary = selection.min_index();

    blocks
        .iter()
        .map(|block| {
            let mut block = block.clone();
            let is_selected = selection.is_selected(block.index);
            if is_selected {
                block.points = rotate_around(&block.points, center, angle);
                block.entrance = rotate_point(block.entrance, center, angle);
                block.exit = rotate_point(block.exit, center, angle);
                if single {
                    block.delta_yaw = (block.delta_yaw + angle_degrees).rem_euclid(360.0);
                }
            }

            if rotation_mode {
                if need_update.contains(&block.index) {
                    let prior = block.rotation_tracking_value.unwrap_or(0.0);
                    block.rotation_tracking_value = Some(prior - angle_degrees);
                }
                if primary == Some(block.index) {
                    block.should_rotate_propagate = Some(true);
                }
            }
            block
        })
        .collect()
}

impl SceneGraph {
    /// Rotate the selected blocks in place. Returns false for an empty selection.
    pub fn rotate_selected(
        &mut self,
        selection: &SelectionState,
        angle_degrees: f64,
        rotation_mode: bool,
    ) -> bool {
        if selection.is_empty() || !angle_degrees.is_finite() {
            return false;
        }
        let need = need_update_indices(&self.blocks, selection);
        self.blocks = rotate_selection(selection, &self.blocks, angle_degrees, rotation_mode, &need);
        self.version += 1;
        tracing::debug!(
            "Rotated {} blocks by {angle_degrees} degrees",
            selection.count()
        );
        true
    }
}
