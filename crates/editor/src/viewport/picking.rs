//! Hit testing blocks and points in world space

use shared::{Block, BlockIndex, Point2D};

use crate::geometry::polygon_contains;

/// Topmost block whose polygon contains `world`.
///
/// Blocks are drawn in list order, so the last match wins.
pub fn pick_block(blocks: &[Block], world: Point2D) -> Option<BlockIndex> {
    blocks
        .iter()
        .rev()
        .find(|b| polygon_contains(&b.points, world))
        .map(|b| b.index)
}

/// Whether `screen` is within `radius_px` of `target`, both in screen pixels
pub fn within_radius(screen: Point2D, target: Point2D, radius_px: f64) -> bool {
    screen.distance(target) <= radius_px
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{named_block, square_block, three_block_scene};

    #[test]
    fn test_pick_inside() {
        let blocks = three_block_scene();
        assert_eq!(pick_block(&blocks, Point2D::new(40.0, 2.0)), Some(2));
        assert_eq!(pick_block(&blocks, Point2D::new(30.0, 0.0)), None);
    }

    #[test]
    fn test_topmost_wins() {
        let blocks = vec![
            named_block(1, "1-a"),
            square_block(2, "1-b", Point2D::new(20.0, 0.0), 2.0),
        ];
        assert_eq!(pick_block(&blocks, Point2D::new(20.0, 0.0)), Some(2));
        assert_eq!(pick_block(&blocks, Point2D::new(24.0, 0.0)), Some(1));
    }

    #[test]
    fn test_empty_scene() {
        assert_eq!(pick_block(&[], Point2D::ORIGIN), None);
    }

    #[test]
    fn test_within_radius() {
        assert!(within_radius(Point2D::new(3.0, 4.0), Point2D::ORIGIN, 5.0));
        assert!(!within_radius(Point2D::new(3.0, 4.1), Point2D::ORIGIN, 5.0));
    }
}
