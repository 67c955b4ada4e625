//! JSON import and export of the play-area files

use shared::{Block, BlockDetail, BlockDetailRecord, BlockRecord, BoundaryPathFile, Point2D};

use crate::error::{EditorError, EditorResult};

const PLAY_AREA: &str = "play area file";
const BLOCK_DETAIL: &str = "block detail file";
const BOUNDARY_PATH: &str = "boundary path file";

fn malformed(what: &'static str) -> impl FnOnce(serde_json::Error) -> EditorError {
    move |source| EditorError::MalformedFile { what, source }
}

/// Parse `PlayArea.json`. Block validation happens on import, not here.
pub fn parse_play_area(json: &str) -> EditorResult<Vec<Block>> {
    let records: Vec<BlockRecord> = serde_json::from_str(json).map_err(malformed(PLAY_AREA))?;
    Ok(records.into_iter().map(Block::from).collect())
}

/// Parse `PlayAreaBlockData.json`
pub fn parse_block_detail(json: &str) -> EditorResult<Vec<BlockDetail>> {
    let records: Vec<BlockDetailRecord> =
        serde_json::from_str(json).map_err(malformed(BLOCK_DETAIL))?;
    Ok(records.into_iter().map(BlockDetail::from).collect())
}

/// Parse a boundary file in either shape
pub fn parse_boundary_path(json: &str) -> EditorResult<BoundaryPathFile> {
    serde_json::from_str(json).map_err(malformed(BOUNDARY_PATH))
}

/// Geometry of every block as `PlayArea.json`
pub fn export_play_area_json(blocks: &[Block]) -> EditorResult<String> {
    let records: Vec<BlockRecord> = blocks.iter().map(BlockRecord::from).collect();
    serde_json::to_string_pretty(&records).map_err(malformed(PLAY_AREA))
}

/// Rotation details of every block as `PlayAreaBlockData.json`
pub fn export_block_detail_json(blocks: &[Block]) -> EditorResult<String> {
    let records: Vec<BlockDetailRecord> = blocks.iter().map(BlockDetailRecord::from).collect();
    serde_json::to_string_pretty(&records).map_err(malformed(BLOCK_DETAIL))
}

/// Boundary points in the current `{scale, points}` shape
pub fn export_boundary_path_json(points: &[Point2D], scale: f64) -> EditorResult<String> {
    let file = BoundaryPathFile::Scaled {
        scale,
        points: points.to_vec(),
    };
    serde_json::to_string_pretty(&file).map_err(malformed(BOUNDARY_PATH))
}
