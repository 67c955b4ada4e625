//! Editor session: the single owner of all editor state
//!
//! Hosts forward pointer, wheel and key events to an [`EditorSession`] and
//! redraw according to the returned [`Effects`]. Timed behaviour only
//! advances when the host calls [`EditorSession::advance`].

mod input;
pub mod keyboard;
pub mod timers;

use std::time::Duration;

use glam::DVec3;
use kurbo::Size;
use shared::{Block, BlockDetail, BoundaryPathFile};

use crate::error::EditorResult;
use crate::io;
use crate::state::scene::{BackgroundImage, ModelOverlay, SceneGraph, TextureHandle, UndoManager};
use crate::state::{EditorModes, EditorSettings, EditorState, SelectionState};
use crate::viewport::{DragController, PanGesture, ViewTransform, Viewport};
use keyboard::{HoldTimer, KeyboardState};
use timers::Scheduler;

bitflags::bitflags! {
    /// What the host has to do after an event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Effects: u8 {
        const REDRAW = 1;
        const SCENE_CHANGED = 1 << 1;
        const SELECTION_CHANGED = 1 << 2;
        /// Start routing window-level pointer move/up events here
        const CAPTURE_POINTER = 1 << 3;
        /// Stop routing window-level pointer events
        const RELEASE_POINTER = 1 << 4;
    }
}

impl Effects {
    pub(crate) fn scene() -> Self {
        Effects::SCENE_CHANGED | Effects::REDRAW
    }

    pub(crate) fn selection() -> Self {
        Effects::SELECTION_CHANGED | Effects::REDRAW
    }

    pub(crate) fn when(cond: bool, effects: Effects) -> Self {
        if cond {
            effects
        } else {
            Effects::empty()
        }
    }
}

/// Scene, selection, view, history and in-flight gestures
pub struct EditorSession {
    state: EditorState,
    viewport: Viewport,
    drag: DragController,
    pan: PanGesture,
    keyboard: KeyboardState,
    scheduler: Scheduler<HoldTimer>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl EditorSession {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            state: EditorState::with_settings(settings),
            viewport: Viewport::default(),
            drag: DragController::default(),
            pan: PanGesture::default(),
            keyboard: KeyboardState::default(),
            scheduler: Scheduler::default(),
        }
    }

    /// Session with settings read from the platform config directory
    pub fn load() -> Self {
        Self::new(EditorSettings::load())
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Direct access for host UI such as selection checkboxes
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.state.scene
    }

    pub fn selection(&self) -> &SelectionState {
        &self.state.selection
    }

    pub fn history(&self) -> &UndoManager {
        &self.state.history
    }

    pub fn view(&self) -> ViewTransform {
        self.viewport.view
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn modes(&self) -> EditorModes {
        self.state.modes
    }

    pub fn set_modes(&mut self, modes: EditorModes) {
        self.state.modes = modes;
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.state.settings
    }

    pub fn apply_settings(&mut self, settings: EditorSettings) {
        self.state.apply_settings(settings);
    }

    /// Host clock as seen by the key-repeat timers
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    // ── View ──────────────────────────────────────────────────

    pub fn set_viewport_size(&mut self, width: f64, height: f64) -> Effects {
        self.viewport.size = Size::new(width.max(1.0), height.max(1.0));
        Effects::REDRAW
    }

    pub fn set_view(&mut self, view: ViewTransform) -> Effects {
        self.viewport.view = ViewTransform::new(view.scale, view.offset_x, view.offset_y);
        Effects::REDRAW
    }

    /// Fit every block into the canvas
    pub fn fit_to_view(&mut self) -> Effects {
        let margin = self.state.settings.interaction.fit_margin;
        self.viewport.fit(self.state.scene.bounds(), margin);
        Effects::REDRAW
    }

    // ── Scene import / export ─────────────────────────────────

    /// Replace the scene and fit the view to it. On error nothing changes.
    pub fn import_scene(&mut self, blocks: Vec<Block>) -> EditorResult<Effects> {
        self.state.import_scene(blocks)?;
        self.drag.cancel();
        self.fit_to_view();
        Ok(Effects::scene() | Effects::SELECTION_CHANGED)
    }

    pub fn import_play_area_json(&mut self, json: &str) -> EditorResult<Effects> {
        let blocks = io::parse_play_area(json)?;
        self.import_scene(blocks)
    }

    pub fn import_detail(&mut self, details: &[BlockDetail]) -> Effects {
        self.state.import_detail(details);
        Effects::scene()
    }

    pub fn import_detail_json(&mut self, json: &str) -> EditorResult<Effects> {
        let details = io::parse_block_detail(json)?;
        Ok(self.import_detail(&details))
    }

    pub fn export_scene(&self) -> Vec<Block> {
        self.state.export_scene()
    }

    pub fn export_play_area_json(&self) -> EditorResult<String> {
        io::export_play_area_json(self.state.scene.blocks())
    }

    pub fn export_block_detail_json(&self) -> EditorResult<String> {
        io::export_block_detail_json(self.state.scene.blocks())
    }

    // ── History ───────────────────────────────────────────────

    pub fn push_undo(&mut self) -> bool {
        self.state.push_undo()
    }

    pub fn undo(&mut self) -> Effects {
        Effects::when(self.state.undo(), Effects::scene() | Effects::SELECTION_CHANGED)
    }

    pub fn redo(&mut self) -> Effects {
        Effects::when(self.state.redo(), Effects::scene() | Effects::SELECTION_CHANGED)
    }

    // ── Rotation ──────────────────────────────────────────────

    /// Rotate the selection by the configured batch step
    pub fn rotate_selection_batch(&mut self) -> Effects {
        Effects::when(self.state.rotate_selection_batch(), Effects::scene())
    }

    // ── Background image and boundary path ────────────────────

    /// Load a decoded image, scaled to fit what is currently on screen
    pub fn set_background_image(&mut self, texture: TextureHandle, width: f64, height: f64) -> Effects {
        let visible = self.viewport.visible_world_rect();
        let image = BackgroundImage::fitted(texture, width, height, visible);
        tracing::info!(scale = image.scale, "Loaded background image {width}x{height}");
        self.state.scene.set_background(image);
        Effects::scene()
    }

    pub fn clear_background_image(&mut self) -> Effects {
        Effects::when(self.state.scene.clear_background().is_some(), Effects::scene())
    }

    /// Replace the path; a recorded scale is applied to the image
    pub fn import_boundary(&mut self, file: BoundaryPathFile) -> Effects {
        if let (Some(scale), Some(image)) = (file.scale(), self.state.scene.background_mut()) {
            if scale.is_finite() && scale > 0.0 {
                image.scale = scale;
            }
        }
        let points = file.into_points();
        tracing::info!("Imported {} boundary points", points.len());
        self.state.replace_boundary_path(points);
        Effects::scene()
    }

    pub fn import_boundary_json(&mut self, json: &str) -> EditorResult<Effects> {
        let file = io::parse_boundary_path(json)?;
        Ok(self.import_boundary(file))
    }

    pub fn export_boundary_json(&self) -> EditorResult<String> {
        let scale = self.state.scene.background().map_or(1.0, |img| img.scale);
        io::export_boundary_path_json(self.state.scene.boundary().points(), scale)
    }

    pub fn clear_boundary_path(&mut self) -> Effects {
        self.state.clear_boundary_path();
        Effects::scene()
    }

    // ── Model overlay ─────────────────────────────────────────

    /// Flatten a 3D model onto the scene plane as a static overlay
    pub fn load_model(&mut self, vertices: &[DVec3], faces: Vec<Vec<usize>>) -> Effects {
        let model = ModelOverlay::flatten(vertices, faces);
        tracing::info!(
            "Loaded model overlay: {} vertices, {} faces",
            model.vertices.len(),
            model.faces.len()
        );
        self.state.scene.set_model(Some(model));
        Effects::REDRAW
    }

    pub fn clear_model(&mut self) -> Effects {
        self.state.scene.set_model(None);
        Effects::REDRAW
    }
}
