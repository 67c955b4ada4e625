//! Integration tests for file import and export through EditorSession.

use playarea_editor::fixtures::{play_area_json, three_block_scene};
use playarea_editor::state::scene::TextureHandle;
use playarea_editor::{EditorError, EditorSession, Severity};
use shared::Point2D;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const PLAY_AREA: &str = r#"[
    {
        "Name": "7-hall",
        "Index": 10,
        "Points": [
            {"Point": {"X": 0, "Y": 0}},
            {"Point": {"X": 4, "Y": 0}},
            {"Point": {"X": 4, "Y": 2}},
            {"Point": {"X": 0, "Y": 2}}
        ],
        "Entrance": {"Point": {"X": 0, "Y": 1}},
        "Exit": {"Point": {"X": 4, "Y": 1}},
        "DeltaYaw": 90
    },
    {
        "Name": "7-room",
        "Index": 11,
        "Points": [
            {"Point": {"X": 4, "Y": 0}},
            {"Point": {"X": 8, "Y": 0}},
            {"Point": {"X": 8, "Y": 4}}
        ],
        "Entrance": {"Point": {"X": 4, "Y": 1}},
        "Exit": {"Point": {"X": 8, "Y": 2}}
    }
]"#;

fn loaded() -> EditorSession {
    let mut s = EditorSession::default();
    s.import_play_area_json(PLAY_AREA).unwrap();
    s
}

#[test]
fn test_import_play_area_file() {
    init_tracing();
    let s = loaded();
    assert_eq!(s.scene().len(), 2);
    let hall = s.scene().get_block(10).unwrap();
    assert_eq!(hall.scene_key(), Some("7"));
    assert_eq!(hall.delta_yaw, 90.0);
    assert_eq!(hall.entrance, Point2D::new(0.0, 1.0));
    assert_eq!(s.scene().get_block(11).unwrap().delta_yaw, 0.0);
}

#[test]
fn test_invalid_name_rejects_whole_file() {
    init_tracing();
    let mut s = loaded();
    let bad = PLAY_AREA.replace("7-room", "room");
    let err = s.import_play_area_json(&bad).unwrap_err();
    assert!(matches!(err, EditorError::InvalidSceneKey { index: 11, .. }));
    assert_eq!(err.severity(), Severity::Alert);
    assert_eq!(s.scene().get_block(10).map(|b| b.name.as_str()), Some("7-hall"));
    assert_eq!(s.scene().get_block(11).map(|b| b.name.as_str()), Some("7-room"));
}

#[test]
fn test_malformed_play_area_leaves_scene() {
    init_tracing();
    let mut s = loaded();
    let before = s.export_scene();
    let err = s.import_play_area_json("[{\"Name\": 3}]").unwrap_err();
    assert_eq!(err.severity(), Severity::Notice);
    assert_eq!(s.export_scene(), before);
}

#[test]
fn test_detail_file_merges_by_index() {
    init_tracing();
    let mut s = loaded();
    s.import_detail_json(
        r#"[
            {"Index": 11, "Name": "7-room", "BlockRotateZAxisValue": 33.5, "bShouldRotate": true},
            {"Index": 99, "BlockRotateZAxisValue": 1.0}
        ]"#,
    )
    .unwrap();
    let room = s.scene().get_block(11).unwrap();
    assert_eq!(room.rotation_tracking_value, Some(33.5));
    assert_eq!(room.should_rotate_propagate, Some(true));
    assert_eq!(room.points.len(), 3);
    assert_eq!(s.scene().get_block(10).unwrap().rotation_tracking_value, None);
}

#[test]
fn test_malformed_detail_is_notice_and_harmless() {
    init_tracing();
    let mut s = loaded();
    let before = s.export_scene();
    let err = s.import_detail_json("not json").unwrap_err();
    assert_eq!(err.severity(), Severity::Notice);
    assert!(err.to_string().contains("block detail file"));
    assert_eq!(s.export_scene(), before);
}

#[test]
fn test_export_roundtrip_after_edit() {
    init_tracing();
    let mut s = loaded();
    s.state_mut().selection.set_checked(11, true);
    s.rotate_selection_batch();
    let json = s.export_play_area_json().unwrap();

    let mut other = EditorSession::default();
    other.import_play_area_json(&json).unwrap();
    assert_eq!(other.export_scene(), s.export_scene());
    assert_eq!(other.scene().get_block(11).unwrap().delta_yaw, 15.0);
}

#[test]
fn test_detail_export_roundtrip() {
    init_tracing();
    let mut s = EditorSession::default();
    let mut blocks = three_block_scene();
    blocks[1].rotation_tracking_value = Some(-12.0);
    blocks[1].should_rotate_propagate = Some(false);
    s.import_play_area_json(&play_area_json(&blocks)).unwrap();
    // Geometry export never carries details
    assert_eq!(s.scene().get_block(2).unwrap().rotation_tracking_value, None);

    s.import_detail(&[shared::BlockDetail {
        external_index: 2,
        rotation_tracking_value: Some(-12.0),
        should_rotate_propagate: Some(false),
    }]);
    let json = s.export_block_detail_json().unwrap();

    let mut other = EditorSession::default();
    other.import_play_area_json(&play_area_json(&three_block_scene())).unwrap();
    other.import_detail_json(&json).unwrap();
    assert_eq!(other.export_scene(), s.export_scene());
}

#[test]
fn test_boundary_legacy_and_current_files() {
    init_tracing();
    let mut s = loaded();
    s.import_boundary_json(r#"[{"x": 0, "y": 0}, {"x": 10, "y": 0}, {"x": 10, "y": 10}, {"x": 0, "y": 0}]"#)
        .unwrap();
    assert!(s.scene().boundary().is_closed());

    s.set_background_image(TextureHandle(5), 100.0, 100.0);
    s.import_boundary_json(r#"{"scale": 0.25, "points": [{"x": 1, "y": 2}]}"#)
        .unwrap();
    assert_eq!(s.scene().background().unwrap().scale, 0.25);
    assert_eq!(s.scene().boundary().points(), &[Point2D::new(1.0, 2.0)]);

    let json = s.export_boundary_json().unwrap();
    let mut other = loaded();
    other.set_background_image(TextureHandle(6), 100.0, 100.0);
    other.import_boundary_json(&json).unwrap();
    assert_eq!(other.scene().boundary().points(), s.scene().boundary().points());
    assert_eq!(other.scene().background().unwrap().scale, 0.25);
}

#[test]
fn test_malformed_boundary_leaves_path() {
    init_tracing();
    let mut s = loaded();
    s.import_boundary_json(r#"[{"x": 1, "y": 1}]"#).unwrap();
    let err = s.import_boundary_json(r#"{"scale": "big"}"#).unwrap_err();
    assert_eq!(err.severity(), Severity::Notice);
    assert_eq!(s.scene().boundary().len(), 1);
}
