//! Data types shared between the editor core and its host.
//!
//! The domain types here (`Block`, `BlockDetail`, ...) are what the editor
//! mutates. The on-disk shapes of the play-area files live in [`records`]
//! and convert to and from the domain types.

pub mod records;

use serde::{Deserialize, Serialize};

pub use records::{BlockDetailRecord, BlockRecord, BoundaryPathFile, PointRecord, WirePoint};

/// Stable block identifier (the `Index` field of the play-area file)
pub type BlockIndex = i64;

/// 2D point in world (or image-local) units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise translation
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Both coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Movable polygon with entrance and exit markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Stable unique identifier (not the position in the block list)
    pub index: BlockIndex,
    /// `"<scene key>-<rest>"`
    pub name: String,
    /// Polygon vertices, implicitly closed
    pub points: Vec<Point2D>,
    pub entrance: Point2D,
    pub exit: Point2D,
    /// Per-block yaw in degrees, only advanced by single-block rotation
    #[serde(default)]
    pub delta_yaw: f64,
    /// Externally sourced rotation accumulator (`BlockRotateZAxisValue`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_tracking_value: Option<f64>,
    /// Marks the accumulator target of a rotation batch (`bShouldRotate`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_rotate_propagate: Option<bool>,
}

impl Block {
    /// Scene key: the non-empty segment before the first `-` of the name.
    pub fn scene_key(&self) -> Option<&str> {
        scene_key_of(&self.name)
    }

    /// Vertices followed by entrance and exit
    pub fn all_points(&self) -> impl Iterator<Item = Point2D> + '_ {
        self.points
            .iter()
            .copied()
            .chain([self.entrance, self.exit])
    }

    /// Whether this block is flagged as a rotation accumulator target
    pub fn propagates_rotation(&self) -> bool {
        self.should_rotate_propagate.unwrap_or(false)
    }
}

/// Parse the scene key out of a block name.
///
/// Any non-empty prefix is accepted; a name without `-` has no key.
pub fn scene_key_of(name: &str) -> Option<&str> {
    match name.split_once('-') {
        Some((key, _)) if !key.is_empty() => Some(key),
        _ => None,
    }
}

/// Per-block detail merged onto imported geometry by index
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockDetail {
    pub external_index: BlockIndex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_tracking_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_rotate_propagate: Option<bool>,
}

/// Placement of the background image (the texture itself is not included)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackgroundTransform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    /// Radians
    pub rotation: f64,
}

impl Default for BackgroundTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(name: &str) -> Block {
        Block {
            index: 1,
            name: name.to_string(),
            points: vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(1.0, 0.0),
                Point2D::new(1.0, 1.0),
            ],
            entrance: Point2D::new(0.0, 0.5),
            exit: Point2D::new(1.0, 0.5),
            delta_yaw: 0.0,
            rotation_tracking_value: None,
            should_rotate_propagate: None,
        }
    }

    #[test]
    fn test_scene_key_numeric() {
        assert_eq!(block("12-north").scene_key(), Some("12"));
    }

    #[test]
    fn test_scene_key_any_string() {
        assert_eq!(block("lobby-a-1").scene_key(), Some("lobby"));
    }

    #[test]
    fn test_scene_key_missing() {
        assert_eq!(block("lobby").scene_key(), None);
        assert_eq!(block("-a").scene_key(), None);
        assert_eq!(block("").scene_key(), None);
    }

    #[test]
    fn test_all_points_includes_markers() {
        let b = block("1-a");
        let pts: Vec<_> = b.all_points().collect();
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[3], b.entrance);
        assert_eq!(pts[4], b.exit);
    }

    #[test]
    fn test_point_helpers() {
        let p = Point2D::new(1.0, 2.0).offset(2.0, 2.0);
        assert_eq!(p, Point2D::new(3.0, 4.0));
        assert!((Point2D::ORIGIN.distance(p) - 5.0).abs() < 1e-12);
        assert!(!Point2D::new(f64::NAN, 0.0).is_finite());
    }

    #[test]
    fn test_propagates_rotation_defaults_false() {
        let mut b = block("1-a");
        assert!(!b.propagates_rotation());
        b.should_rotate_propagate = Some(true);
        assert!(b.propagates_rotation());
    }
}
