//! Bulk replace and detail merge

use std::collections::{HashMap, HashSet};

use shared::{Block, BlockDetail};

use super::SceneGraph;
use crate::error::{EditorError, EditorResult};

/// Check every block before anything is committed
pub fn validate_blocks(blocks: &[Block]) -> EditorResult<()> {
    let mut seen = HashSet::with_capacity(blocks.len());
    for block in blocks {
        if block.scene_key().is_none() {
            return Err(EditorError::InvalidSceneKey {
                index: block.index,
                name: block.name.clone(),
            });
        }
        if block.points.len() < 3 {
            return Err(EditorError::TooFewPoints {
                index: block.index,
                count: block.points.len(),
            });
        }
        if !seen.insert(block.index) {
            return Err(EditorError::DuplicateIndex { index: block.index });
        }
    }
    Ok(())
}

/// Copy detail fields onto the base blocks with the same index.
///
/// Geometry is never touched; absent detail fields keep the base value and
/// unmatched records are ignored.
pub fn merge_detail(base: &[Block], details: &[BlockDetail]) -> Vec<Block> {
    let by_index: HashMap<_, _> = details.iter().map(|d| (d.external_index, d)).collect();

    let merged: Vec<Block> = base
        .iter()
        .map(|block| {
            let mut block = block.clone();
            if let Some(detail) = by_index.get(&block.index) {
                if detail.rotation_tracking_value.is_some() {
                    block.rotation_tracking_value = detail.rotation_tracking_value;
                }
                if detail.should_rotate_propagate.is_some() {
                    block.should_rotate_propagate = detail.should_rotate_propagate;
                }
            }
            block
        })
        .collect();

    let unmatched = details
        .iter()
        .filter(|d| !base.iter().any(|b| b.index == d.external_index))
        .count();
    if unmatched > 0 {
        tracing::debug!("{unmatched} detail records matched no block");
    }
    merged
}

impl SceneGraph {
    /// Replace the whole block list; rejected without changes if any block is invalid.
    pub fn replace_all(&mut self, blocks: Vec<Block>) -> EditorResult<()> {
        if let Err(e) = validate_blocks(&blocks) {
            tracing::warn!("Rejected scene import: {e}");
            return Err(e);
        }
        tracing::info!("Imported {} blocks", blocks.len());
        self.blocks = blocks;
        self.version += 1;
        Ok(())
    }

    /// Merge detail records onto the current blocks
    pub fn apply_detail(&mut self, details: &[BlockDetail]) {
        self.blocks = merge_detail(&self.blocks, details);
        self.version += 1;
    }
}
