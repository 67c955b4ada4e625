//! Translation of blocks

use shared::BlockIndex;

use super::SceneGraph;

impl SceneGraph {
    /// Move every vertex, entrance and exit of the matching blocks.
    /// Unknown indices are ignored. Returns how many blocks moved.
    pub fn translate(&mut self, indices: &[BlockIndex], dx: f64, dy: f64) -> usize {
        let mut moved = 0;
        for block in self.blocks.iter_mut().filter(|b| indices.contains(&b.index)) {
            for p in &mut block.points {
                *p = p.offset(dx, dy);
            }
            block.entrance = block.entrance.offset(dx, dy);
            block.exit = block.exit.offset(dx, dy);
            moved += 1;
        }
        if moved > 0 {
            self.version += 1;
        }
        moved
    }
}
