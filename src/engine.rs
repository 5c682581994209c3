//! Editing surface: the reference scene, the gesture engine, and the browser
//! wrapper.
//!
//! `Board` adapts the document store and camera to the [`Scene`] interface.
//! `EngineCore` owns a board, an overlay, the canvas event bus, the attached
//! guidelines and the per-surface history, and turns drag / resize / release
//! / render calls into canvas events. It holds no browser types, so it is
//! tested headlessly with a [`DisplayList`] overlay. `Engine` wraps it around
//! a real canvas element.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, warn};
use web_sys::HtmlCanvasElement;

use crate::anchor::Anchor;
use crate::camera::Camera;
use crate::config::{ConfigError, GuidelineConfig, HistoryConfig};
use crate::doc::{BoardObject, DocStore};
use crate::events::{Action, CanvasEvent, EventBus};
use crate::geom::{Axis, Point};
use crate::guidelines::{AttachedGuidelines, Guides};
use crate::history::{HistoryManager, SessionHistory, SurfaceId};
use crate::host::{ObjectId, Scene};
use crate::input::{InputState, Modifiers, resize_gesture};
use crate::overlay::{DisplayList, OverlayContext};
use crate::resize::{ResizeMode, apply_axis_delta};
use crate::web::{OverlayError, WebOverlay};

// =============================================================================
// BOARD
// =============================================================================

/// The in-crate host scene: a document store seen through a camera.
#[derive(Default)]
pub struct Board {
    pub doc: DocStore,
    pub camera: Camera,
    /// Viewport size in CSS pixels. Zero means "unknown": everything is on screen.
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Scene for Board {
    type Object = BoardObject;

    fn objects(&self) -> Vec<ObjectId> {
        self.doc.top_level()
    }

    fn object(&self, id: &ObjectId) -> Option<&BoardObject> {
        self.doc.get(id)
    }

    fn object_mut(&mut self, id: &ObjectId) -> Option<&mut BoardObject> {
        self.doc.get_mut(id)
    }

    fn is_on_screen(&self, id: &ObjectId) -> bool {
        let Some(obj) = self.doc.get(id) else {
            return false;
        };
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return true;
        }
        let visible = self.camera.visible_world_rect(self.viewport_width, self.viewport_height);
        obj.bounds().intersects(&visible)
    }

    fn zoom(&self) -> f64 {
        self.camera.zoom
    }

    fn translate_object(&mut self, id: &ObjectId, dx: f64, dy: f64) {
        self.doc.translate_tree(id, dx, dy);
    }
}

// =============================================================================
// ENGINE CORE
// =============================================================================

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore<O = DisplayList> {
    pub board: Board,
    pub overlay: O,
    pub input: InputState,
    pub resize_mode: ResizeMode,
    bus: EventBus<Board>,
    guidelines: Option<AttachedGuidelines>,
    history: SessionHistory,
}

impl Default for EngineCore<DisplayList> {
    fn default() -> Self {
        Self::new(DisplayList::new())
    }
}

impl<O: OverlayContext> EngineCore<O> {
    /// An engine drawing guides on `overlay`, with guidelines not yet enabled.
    #[must_use]
    pub fn new(overlay: O) -> Self {
        Self::with_history(overlay, HistoryConfig::default())
    }

    #[must_use]
    pub fn with_history(overlay: O, history: HistoryConfig) -> Self {
        Self {
            board: Board::default(),
            overlay,
            input: InputState::Idle,
            resize_mode: ResizeMode::default(),
            bus: EventBus::new(),
            guidelines: None,
            history: SessionHistory::new(history),
        }
    }

    // --- Guidelines ---

    /// Attach alignment guidelines with `config`, replacing any attached ones.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` is unusable.
    pub fn enable_guidelines(&mut self, config: GuidelineConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.disable_guidelines();
        self.guidelines = Some(AttachedGuidelines::attach(&mut self.bus, config));
        Ok(())
    }

    /// Detach the guidelines and revoke their subscriptions. Returns whether any were attached.
    pub fn disable_guidelines(&mut self) -> bool {
        match self.guidelines.take() {
            Some(attached) => {
                attached.dispose(&mut self.bus);
                true
            }
            None => false,
        }
    }

    /// Snapshot of the active guides; empty when guidelines are disabled.
    #[must_use]
    pub fn guides(&self) -> Guides {
        self.guidelines.as_ref().map(AttachedGuidelines::guides).unwrap_or_default()
    }

    #[must_use]
    pub fn bus(&self) -> &EventBus<Board> {
        &self.bus
    }

    // --- Data inputs ---

    /// Insert or replace an object.
    pub fn insert_object(&mut self, object: BoardObject) {
        self.board.doc.insert(object);
    }

    /// Update viewport dimensions in CSS pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.board.viewport_width = width;
        self.board.viewport_height = height;
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.board.camera = camera;
    }

    /// Zoom by `factor` around a screen point, as a wheel gesture does.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) -> Vec<Action> {
        self.board.camera.zoom_at(screen, factor);
        vec![Action::RenderNeeded]
    }

    // --- Surfaces and history ---

    /// Switch to `surface`, loading `objects` as its current content.
    ///
    /// A surface seen for the first time starts its history at this content;
    /// a surface seen before keeps its existing history.
    pub fn open_surface(&mut self, surface: SurfaceId, objects: Vec<BoardObject>) {
        self.input = InputState::Idle;
        self.board.doc.load_snapshot(objects);
        let snapshot = self.snapshot();
        let history = self.history.activate(surface);
        if !history.is_initialized() {
            if let Some(state) = snapshot {
                history.initialize(state);
            }
        }
        debug!(%surface, objects = self.board.doc.len(), "engine: surface opened");
    }

    /// Drop a surface's history.
    pub fn close_surface(&mut self, surface: &SurfaceId) -> bool {
        self.history.remove(surface)
    }

    /// History of the active surface.
    #[must_use]
    pub fn history(&self) -> Option<&HistoryManager> {
        self.history.active()
    }

    /// The document as a history state.
    #[must_use]
    pub fn snapshot(&self) -> Option<serde_json::Value> {
        match serde_json::to_value(self.board.doc.snapshot()) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "engine: snapshot failed");
                None
            }
        }
    }

    /// Record the current document in the active surface's history.
    pub fn commit(&mut self) -> bool {
        let Some(state) = self.snapshot() else {
            return false;
        };
        self.history.active_mut().is_some_and(|h| h.save(state, false))
    }

    /// Step the active surface back one state.
    pub fn undo(&mut self) -> Vec<Action> {
        let state = self.history.active_mut().and_then(|h| h.undo().cloned());
        self.restore(state)
    }

    /// Step the active surface forward one state.
    pub fn redo(&mut self) -> Vec<Action> {
        let state = self.history.active_mut().and_then(|h| h.redo().cloned());
        self.restore(state)
    }

    fn restore(&mut self, state: Option<serde_json::Value>) -> Vec<Action> {
        let Some(state) = state else {
            return Vec::new();
        };
        if let Some(h) = self.history.active_mut() {
            h.set_locked(true);
        }
        let restored = match serde_json::from_value::<Vec<BoardObject>>(state) {
            Ok(objects) => {
                self.board.doc.load_snapshot(objects);
                true
            }
            Err(e) => {
                warn!(error = %e, "engine: history state could not be restored");
                false
            }
        };
        if let Some(h) = self.history.active_mut() {
            h.set_locked(false);
        }
        self.input = InputState::Idle;
        if restored { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    // --- Gestures ---

    /// Start dragging `id`. Returns `false` if there is no such object.
    pub fn begin_drag(&mut self, id: ObjectId) -> bool {
        let Some(obj) = self.board.doc.get(&id) else {
            return false;
        };
        self.input = InputState::DraggingObject { id, orig_x: obj.x, orig_y: obj.y, total_dx: 0.0, total_dy: 0.0 };
        true
    }

    /// Move the dragged object by `(dx, dy)` world units and emit a move tick.
    ///
    /// The object is placed relative to where the drag started, so a snap
    /// applied on one tick does not accumulate into the next.
    pub fn drag_by(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        let InputState::DraggingObject { id, orig_x, orig_y, total_dx, total_dy } = &mut self.input else {
            return Vec::new();
        };
        *total_dx += dx;
        *total_dy += dy;
        let (id, want_x, want_y) = (*id, *orig_x + *total_dx, *orig_y + *total_dy);

        let Some(obj) = self.board.doc.get(&id) else {
            return Vec::new();
        };
        let (shift_x, shift_y) = (want_x - obj.x, want_y - obj.y);
        self.board.doc.translate_tree(&id, shift_x, shift_y);

        let mut actions = vec![Action::ObjectUpdated { id }];
        actions.extend(self.emit(CanvasEvent::ObjectMoving { target: id }));
        actions
    }

    /// Start resizing `id` by `handle`.
    pub fn begin_resize(&mut self, id: ObjectId, handle: Anchor, modifiers: Modifiers) -> bool {
        let Some(obj) = self.board.doc.get(&id) else {
            return false;
        };
        let gesture = resize_gesture(handle, self.resize_mode, obj.uniform_scaling, modifiers);
        self.input = InputState::ResizingObject { gesture, orig: Box::new(obj.clone()), total_dx: 0.0, total_dy: 0.0 };
        true
    }

    /// Drag the active resize handle by `(dx, dy)` world units and emit a scale tick.
    pub fn resize_by(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        let InputState::ResizingObject { gesture, orig, total_dx, total_dy } = &mut self.input else {
            return Vec::new();
        };
        *total_dx += dx;
        *total_dy += dy;
        let (gesture, total_dx, total_dy) = (*gesture, *total_dx, *total_dy);
        let start = (**orig).clone();
        let id = start.id;

        self.board.doc.insert(start);
        let Some(obj) = self.board.doc.get_mut(&id) else {
            return Vec::new();
        };
        if gesture.uniform {
            let (axis, delta) =
                if gesture.handle.moves_axis(Axis::X) { (Axis::X, total_dx) } else { (Axis::Y, total_dy) };
            apply_axis_delta(obj, &gesture, axis, delta);
        } else {
            if gesture.handle.moves_axis(Axis::X) {
                apply_axis_delta(obj, &gesture, Axis::X, total_dx);
            }
            if gesture.handle.moves_axis(Axis::Y) {
                apply_axis_delta(obj, &gesture, Axis::Y, total_dy);
            }
        }

        let mut actions = vec![Action::ObjectUpdated { id }];
        actions.extend(self.emit(CanvasEvent::ObjectScaling { target: id, gesture }));
        actions
    }

    /// Finish the active gesture and record the result in history.
    pub fn release(&mut self) -> Vec<Action> {
        let Some(target) = std::mem::take(&mut self.input).target() else {
            return Vec::new();
        };
        let actions = self.emit(CanvasEvent::ObjectModified { target });
        self.commit();
        actions
    }

    // --- Render ---

    /// Run one render pass over the overlay: clear, then draw guides.
    ///
    /// Hosts draw the scene itself between the two phases; this engine only
    /// owns the guide layer.
    pub fn render(&mut self) -> Vec<Action> {
        let camera = self.board.camera;
        self.overlay.set_view(camera.zoom, camera.viewport_transform());
        let mut actions = self.emit(CanvasEvent::BeforeRender);
        actions.extend(self.emit(CanvasEvent::AfterRender));
        actions
    }

    fn emit(&mut self, event: CanvasEvent) -> Vec<Action> {
        self.bus.emit(&event, &mut self.board, &mut self.overlay)
    }

    // --- Queries ---

    /// Look up an object by ID.
    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&BoardObject> {
        self.board.doc.get(id)
    }
}

// =============================================================================
// BROWSER ENGINE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Overlay(#[from] OverlayError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The full canvas engine. Wraps `EngineCore` around a browser overlay canvas.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore<WebOverlay>,
}

impl Engine {
    /// Create an engine drawing guides on `canvas`, with guidelines enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas has no 2D context or `config` is invalid.
    pub fn new(canvas: HtmlCanvasElement, config: GuidelineConfig) -> Result<Self, EngineError> {
        let overlay = WebOverlay::from_canvas(&canvas)?;
        let mut core = EngineCore::new(overlay);
        core.enable_guidelines(config)?;
        Ok(Self { canvas, core })
    }

    /// Match the viewport to the canvas element's current size.
    pub fn sync_viewport(&mut self) {
        let (w, h) = (f64::from(self.canvas.width()), f64::from(self.canvas.height()));
        self.core.set_viewport(w, h);
    }

    pub fn render(&mut self) -> Vec<Action> {
        self.core.render()
    }
}
