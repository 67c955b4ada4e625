//! Display helper functions for scenes and blocks

use shared::{Block, BlockIndex, Point2D};

use crate::geometry::{centroid, centroid_of};

/// Scene colours as `0xRRGGBB`, assigned by order of first appearance
pub const PALETTE: [u32; 10] = [
    0x4fc3f7, 0xffb74d, 0x81c784, 0xe57373, 0xba68c8, 0xa1887f, 0x90a4ae, 0xf06292, 0xffd54f,
    0x64b5f6,
];

/// Blocks sharing a scene key
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGroup {
    pub key: String,
    pub indices: Vec<BlockIndex>,
    pub color: u32,
    /// Mean of member vertices; anchors the scene label
    pub centroid: Point2D,
}

/// Group blocks by scene key in order of first appearance.
/// Blocks without a key are skipped.
pub fn scene_groups(blocks: &[Block]) -> Vec<SceneGroup> {
    let mut keys: Vec<&str> = Vec::new();
    for key in blocks.iter().filter_map(Block::scene_key) {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    keys.iter()
        .enumerate()
        .filter_map(|(i, key)| {
            let members: Vec<&Block> = blocks
                .iter()
                .filter(|b| b.scene_key() == Some(*key))
                .collect();
            let center = centroid_of(members.iter().flat_map(|b| b.points.iter().copied()))?;
            Some(SceneGroup {
                key: key.to_string(),
                indices: members.iter().map(|b| b.index).collect(),
                color: PALETTE[i % PALETTE.len()],
                centroid: center,
            })
        })
        .collect()
}

/// Colour of the scene `block` belongs to
pub fn scene_color(blocks: &[Block], block: &Block) -> Option<u32> {
    let key = block.scene_key()?;
    let mut seen: Vec<&str> = Vec::new();
    for k in blocks.iter().filter_map(Block::scene_key) {
        if k == key {
            return Some(PALETTE[seen.len() % PALETTE.len()]);
        }
        if !seen.contains(&k) {
            seen.push(k);
        }
    }
    None
}

/// Where to draw a block's index label
pub fn block_label_position(block: &Block) -> Option<Point2D> {
    centroid(&block.points)
}
