//! On-disk shapes of the play-area files.
//!
//! `PlayArea.json` holds the block geometry, `PlayAreaBlockData.json` the
//! per-block rotation details, and the boundary file the traced points.

use serde::{Deserialize, Serialize};

use crate::{Block, BlockDetail, BlockIndex, Point2D};

/// `{"X": .., "Y": ..}`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WirePoint {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
}

/// `{"Point": {"X": .., "Y": ..}}`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointRecord {
    #[serde(rename = "Point")]
    pub point: WirePoint,
}

impl From<PointRecord> for Point2D {
    fn from(r: PointRecord) -> Self {
        Point2D::new(r.point.x, r.point.y)
    }
}

impl From<Point2D> for PointRecord {
    fn from(p: Point2D) -> Self {
        PointRecord {
            point: WirePoint { x: p.x, y: p.y },
        }
    }
}

/// One entry of `PlayArea.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlockRecord {
    pub name: String,
    pub index: BlockIndex,
    pub points: Vec<PointRecord>,
    pub entrance: PointRecord,
    pub exit: PointRecord,
    #[serde(default)]
    pub delta_yaw: f64,
    /// Present when the file already carries merged details
    #[serde(
        rename = "BlockRotateZAxisValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub block_rotate_z_axis_value: Option<f64>,
    #[serde(rename = "bShouldRotate", default, skip_serializing_if = "Option::is_none")]
    pub should_rotate: Option<bool>,
}

impl From<BlockRecord> for Block {
    fn from(r: BlockRecord) -> Self {
        Block {
            index: r.index,
            name: r.name,
            points: r.points.into_iter().map(Point2D::from).collect(),
            entrance: r.entrance.into(),
            exit: r.exit.into(),
            delta_yaw: r.delta_yaw,
            rotation_tracking_value: r.block_rotate_z_axis_value,
            should_rotate_propagate: r.should_rotate,
        }
    }
}

impl From<&Block> for BlockRecord {
    /// Geometry only; rotation details are exported through [`BlockDetailRecord`].
    fn from(b: &Block) -> Self {
        BlockRecord {
            name: b.name.clone(),
            index: b.index,
            points: b.points.iter().copied().map(PointRecord::from).collect(),
            entrance: b.entrance.into(),
            exit: b.exit.into(),
            delta_yaw: b.delta_yaw,
            block_rotate_z_axis_value: None,
            should_rotate: None,
        }
    }
}

/// One entry of `PlayAreaBlockData.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDetailRecord {
    #[serde(rename = "Index", alias = "ExternalIndex")]
    pub index: BlockIndex,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "BlockRotateZAxisValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub block_rotate_z_axis_value: Option<f64>,
    #[serde(rename = "bShouldRotate", default, skip_serializing_if = "Option::is_none")]
    pub should_rotate: Option<bool>,
}

impl From<BlockDetailRecord> for BlockDetail {
    fn from(r: BlockDetailRecord) -> Self {
        BlockDetail {
            external_index: r.index,
            rotation_tracking_value: r.block_rotate_z_axis_value,
            should_rotate_propagate: r.should_rotate,
        }
    }
}

impl From<&Block> for BlockDetailRecord {
    fn from(b: &Block) -> Self {
        BlockDetailRecord {
            index: b.index,
            name: Some(b.name.clone()),
            block_rotate_z_axis_value: b.rotation_tracking_value,
            should_rotate: b.should_rotate_propagate,
        }
    }
}

/// Boundary path file, in either of its two historical shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundaryPathFile {
    /// `{"scale": .., "points": [..]}`
    Scaled { scale: f64, points: Vec<Point2D> },
    /// Bare `[{"x": .., "y": ..}]`
    Legacy(Vec<Point2D>),
}

impl BoundaryPathFile {
    pub fn points(&self) -> &[Point2D] {
        match self {
            BoundaryPathFile::Scaled { points, .. } => points,
            BoundaryPathFile::Legacy(points) => points,
        }
    }

    pub fn into_points(self) -> Vec<Point2D> {
        match self {
            BoundaryPathFile::Scaled { points, .. } => points,
            BoundaryPathFile::Legacy(points) => points,
        }
    }

    /// Background image scale recorded with the points, if any
    pub fn scale(&self) -> Option<f64> {
        match self {
            BoundaryPathFile::Scaled { scale, .. } => Some(*scale),
            BoundaryPathFile::Legacy(_) => None,
        }
    }
}
