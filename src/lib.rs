//! Alignment guidelines, snap detection and edit history for an editable
//! 2D canvas.
//!
//! While an object is dragged or resized, its reference points are compared
//! against every other visible object's. Points that line up within a small
//! screen-space margin produce guide lines on a transient overlay layer and,
//! when magnetic snapping is on, pull the object into exact alignment. A
//! separate bounded undo/redo history stores whole-document snapshots per
//! editable surface.
//!
//! The core is host-agnostic: it sees objects through [`host::Transformable`]
//! and the canvas through [`host::Scene`], and draws through
//! [`overlay::OverlayContext`]. [`engine::EngineCore`] wires everything to the
//! crate's own document model and is what the tests drive.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geom`] | Points, axes, rectangles and nearest-on-axis search |
//! | [`anchor`] | Anchors, origins, corners and the 8-point maps |
//! | [`host`] | The interface a host canvas implements |
//! | [`snap`] | Snap match collection for moving objects |
//! | [`resize`] | Handle snapping and scale/size resolution for resizes |
//! | [`render`] | Drawing guide lines and end markers |
//! | [`overlay`] | Overlay drawing contract and the recording [`overlay::DisplayList`] |
//! | [`web`] | Browser canvas overlay |
//! | [`events`] | Canvas lifecycle events, actions and the event bus |
//! | [`guidelines`] | The orchestrator: state machine, candidate pool, point-map cache |
//! | [`history`] | Undo/redo history and per-surface sessions |
//! | [`config`] | Guideline and history options with validation |
//! | [`doc`] | Reference document store and board object type |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Modifier keys and the gesture state machine |
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`consts`] | Shared defaults (margin, colors, history length, zoom limits) |

pub mod anchor;
pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod events;
pub mod geom;
pub mod guidelines;
pub mod history;
pub mod host;
pub mod input;
pub mod overlay;
pub mod render;
pub mod resize;
pub mod snap;
pub mod web;
