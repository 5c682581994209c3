//! Linear undo/redo history over whole-document snapshots.
//!
//! DESIGN
//! ======
//! A `HistoryManager` is a bounded sequence of opaque states plus a cursor.
//! Saving while the cursor is not at the end discards the redo branch.
//! Once the sequence exceeds `max_len` the oldest state is dropped.
//!
//! Restoring a state usually makes the host fire its own change events,
//! which would otherwise be saved right back. Hosts hold the lock
//! (`set_locked(true)`) while they apply an undo or redo result; saves
//! without `force` are ignored while it is held.
//!
//! Nothing here fails. Invalid calls (undo at the start, redo at the end,
//! save while locked) are silent no-ops; use `can_undo` / `can_redo` to
//! decide whether to offer them.
//!
//! `SessionHistory` keeps one manager per editable surface. Managers never
//! share storage.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::{HashMap, VecDeque};

use tracing::debug;
use uuid::Uuid;

use crate::config::HistoryConfig;

// =============================================================================
// HISTORY MANAGER
// =============================================================================

/// Undo/redo stack for one editable surface.
#[derive(Debug, Clone)]
pub struct HistoryManager<S = serde_json::Value> {
    states: VecDeque<S>,
    cursor: Option<usize>,
    locked: bool,
    max_len: usize,
}

impl<S> Default for HistoryManager<S> {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl<S> HistoryManager<S> {
    /// An empty, uninitialized history. A `max_len` of zero is treated as one.
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self { states: VecDeque::new(), cursor: None, locked: false, max_len: config.max_len.max(1) }
    }

    /// Reset to a single state at cursor 0.
    pub fn initialize(&mut self, state: S) {
        self.states.clear();
        self.states.push_back(state);
        self.cursor = Some(0);
        debug!("history: initialized");
    }

    /// Drop every state. The history is uninitialized afterwards.
    pub fn clear(&mut self) {
        self.states.clear();
        self.cursor = None;
        debug!("history: cleared");
    }

    /// Step back one state. `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<&S> {
        let cursor = self.cursor.filter(|c| *c > 0 && self.states.len() >= 2)?;
        self.cursor = Some(cursor - 1);
        debug!(cursor = cursor - 1, len = self.states.len(), "history: undo");
        self.states.get(cursor - 1)
    }

    /// Step forward one state. `None` when already at the newest state.
    pub fn redo(&mut self) -> Option<&S> {
        let cursor = self.cursor.filter(|c| c + 1 < self.states.len())?;
        self.cursor = Some(cursor + 1);
        debug!(cursor = cursor + 1, len = self.states.len(), "history: redo");
        self.states.get(cursor + 1)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0 && self.states.len() >= 2)
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.states.len())
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        !self.states.is_empty()
    }

    /// The state at the cursor.
    #[must_use]
    pub fn current_state(&self) -> Option<&S> {
        self.cursor.and_then(|c| self.states.get(c))
    }

    /// Cursor position; `None` for an empty history.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    #[must_use]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Number of stored states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Stored states, oldest first.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.states.iter()
    }
}

impl<S: PartialEq> HistoryManager<S> {
    /// Record `state` as the newest entry.
    ///
    /// Without `force`, nothing is recorded while locked or when `state`
    /// equals the state at the cursor. Returns whether it was recorded.
    pub fn save(&mut self, state: S, force: bool) -> bool {
        if !force {
            if self.locked {
                debug!("history: save skipped, locked");
                return false;
            }
            if self.current_state() == Some(&state) {
                return false;
            }
        }

        let keep = self.cursor.map_or(0, |c| c + 1);
        if keep < self.states.len() {
            debug!(dropped = self.states.len() - keep, "history: pruned redo branch");
            self.states.truncate(keep);
        }
        self.states.push_back(state);
        self.cursor = Some(self.states.len() - 1);

        if self.states.len() > self.max_len {
            self.states.pop_front();
            self.cursor = self.cursor.map(|c| c.saturating_sub(1));
        }
        debug!(len = self.states.len(), "history: saved");
        true
    }
}

// =============================================================================
// SESSION HISTORY
// =============================================================================

/// Identifier of an editable surface (a slide, a page, a board).
pub type SurfaceId = Uuid;

/// One independent history per editable surface.
#[derive(Debug, Clone)]
pub struct SessionHistory<S = serde_json::Value> {
    config: HistoryConfig,
    surfaces: HashMap<SurfaceId, HistoryManager<S>>,
    active: Option<SurfaceId>,
}

impl<S> Default for SessionHistory<S> {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl<S> SessionHistory<S> {
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self { config, surfaces: HashMap::new(), active: None }
    }

    /// Make `surface` the active one, creating its history on first use.
    pub fn activate(&mut self, surface: SurfaceId) -> &mut HistoryManager<S> {
        self.active = Some(surface);
        let config = self.config;
        self.surfaces.entry(surface).or_insert_with(|| {
            debug!(%surface, "history: new surface");
            HistoryManager::new(config)
        })
    }

    #[must_use]
    pub fn active_id(&self) -> Option<SurfaceId> {
        self.active
    }

    #[must_use]
    pub fn active(&self) -> Option<&HistoryManager<S>> {
        self.active.and_then(|id| self.surfaces.get(&id))
    }

    pub fn active_mut(&mut self) -> Option<&mut HistoryManager<S>> {
        self.active.and_then(|id| self.surfaces.get_mut(&id))
    }

    #[must_use]
    pub fn get(&self, surface: &SurfaceId) -> Option<&HistoryManager<S>> {
        self.surfaces.get(surface)
    }

    /// Tear down a surface's history. Returns `false` if it had none.
    pub fn remove(&mut self, surface: &SurfaceId) -> bool {
        let Some(mut history) = self.surfaces.remove(surface) else {
            return false;
        };
        history.clear();
        if self.active == Some(*surface) {
            self.active = None;
        }
        true
    }

    /// Number of surfaces with a history.
    #[must_use]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}
