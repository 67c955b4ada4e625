//! Factory functions for creating test data.
//!
//! Provides convenient helpers to construct `Block`s and small scenes used in
//! tests and when scripting the editor session.

use shared::*;

// ── Block factories ─────────────────────────────────────────────

/// Axis-aligned square block centred on `center` with half-size `half`.
/// Entrance sits on the left edge, exit on the right edge.
pub fn square_block(index: BlockIndex, name: &str, center: Point2D, half: f64) -> Block {
    Block {
        index,
        name: name.to_string(),
        points: vec![
            center.offset(-half, -half),
            center.offset(half, -half),
            center.offset(half, half),
            center.offset(-half, half),
        ],
        entrance: center.offset(-half, 0.0),
        exit: center.offset(half, 0.0),
        delta_yaw: 0.0,
        rotation_tracking_value: None,
        should_rotate_propagate: None,
    }
}

/// 10x10 block laid out on a row by index (centre at `index * 20, 0`).
pub fn named_block(index: BlockIndex, name: &str) -> Block {
    square_block(index, name, Point2D::new(index as f64 * 20.0, 0.0), 5.0)
}

/// Unit square centred at the origin
pub fn unit_square_block(index: BlockIndex) -> Block {
    square_block(index, &format!("1-{index}"), Point2D::ORIGIN, 0.5)
}

// ── Scene factories ─────────────────────────────────────────────

/// `1-a` (index 1), `1-b` (index 2), `2-a` (index 3)
pub fn three_block_scene() -> Vec<Block> {
    vec![
        named_block(1, "1-a"),
        named_block(2, "1-b"),
        named_block(3, "2-a"),
    ]
}

/// `count` blocks in scene `1`, indices `1..=count`
pub fn row_scene(count: i64) -> Vec<Block> {
    (1..=count)
        .map(|i| named_block(i, &format!("1-{i}")))
        .collect()
}

// ── Record factories ────────────────────────────────────────────

/// Detail record for `index`
pub fn detail(index: BlockIndex, tracking: Option<f64>, propagate: Option<bool>) -> BlockDetail {
    BlockDetail {
        external_index: index,
        rotation_tracking_value: tracking,
        should_rotate_propagate: propagate,
    }
}

/// `PlayArea.json` text for a scene
pub fn play_area_json(blocks: &[Block]) -> String {
    let records: Vec<BlockRecord> = blocks.iter().map(BlockRecord::from).collect();
    serde_json::to_string_pretty(&records).unwrap_or_default()
}
