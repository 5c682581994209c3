//! Input model: modifier keys and the gesture state tracked between
//! pointer-down and release.
//!
//! `Modifiers` captures the keys held during a pointer event. A resize
//! gesture's uniform and centered flags come from them: Shift inverts the
//! object's own aspect-ratio lock on corner handles, Alt scales about the
//! center. `InputState` remembers where a gesture started so every tick can
//! be computed from the unsnapped start position rather than from wherever
//! the last snap left the object.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::anchor::Anchor;
use crate::doc::BoardObject;
use crate::host::ObjectId;
use crate::resize::{ResizeGesture, ResizeMode};

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Build the resize gesture for dragging `handle` with `modifiers` held.
///
/// Side handles never scale uniformly. On corner handles the object's own
/// `uniform_scaling` flag applies, inverted while Shift is held.
#[must_use]
pub fn resize_gesture(handle: Anchor, mode: ResizeMode, object_uniform: bool, modifiers: Modifiers) -> ResizeGesture {
    let is_corner = matches!(handle, Anchor::Tl | Anchor::Tr | Anchor::Br | Anchor::Bl);
    ResizeGesture { handle, mode, uniform: is_corner && (object_uniform != modifiers.shift), centered: modifiers.alt }
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The user is moving an existing object across the canvas.
    DraggingObject {
        /// Id of the object being dragged.
        id: ObjectId,
        /// Object x at the start of the drag.
        orig_x: f64,
        /// Object y at the start of the drag.
        orig_y: f64,
        /// Pointer travel since the drag started, in world units.
        total_dx: f64,
        total_dy: f64,
    },
    /// The user is resizing an object by dragging one of its eight handles.
    ResizingObject {
        /// Which handle, mode and modifiers apply.
        gesture: ResizeGesture,
        /// The object as it was when the resize started.
        orig: Box<BoardObject>,
        /// Pointer travel since the resize started, in world units.
        total_dx: f64,
        total_dy: f64,
    },
}

impl InputState {
    /// Id of the object under the active gesture, if any.
    #[must_use]
    pub fn target(&self) -> Option<ObjectId> {
        match self {
            Self::Idle => None,
            Self::DraggingObject { id, .. } => Some(*id),
            Self::ResizingObject { orig, .. } => Some(orig.id),
        }
    }
}
