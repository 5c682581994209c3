//! Alignment orchestrator: wires snapping and guide drawing into the canvas
//! lifecycle.
//!
//! DESIGN
//! ======
//! `AlignmentGuidelines` is a small state machine (Idle, Moving, Scaling)
//! driven by canvas events:
//!
//! - move tick: clear the active guides, build the candidate pool, run the
//!   collector, optionally pull the target onto the first match, store the
//!   result as the active guides.
//! - scale tick: clear, then run the resize resolver once per applicable
//!   axis, X then Y. When both axes matched, X matches the handle no longer
//!   sits on after the Y pass are dropped.
//! - modified: back to Idle with no guides. No drop-time correction.
//! - before-render clears the overlay; after-render draws the active guides.
//!
//! Active guides persist across render passes until the next gesture event,
//! so repeated renders draw the same thing.
//!
//! The candidate pool walks top-level objects, skipping hidden and
//! off-screen ones, descends into groups to collect visible leaves, and
//! never includes selections. Everything the target contains (group
//! descendants, selection members) is excluded. Point maps of stationary
//! objects are cached per instance, keyed by transform matrix plus size.
//!
//! `AttachedGuidelines` subscribes an orchestrator to an [`EventBus`] and
//! keeps the subscription handles so `dispose` can revoke all of them.

#[cfg(test)]
#[path = "guidelines_test.rs"]
mod guidelines_test;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::anchor::{PointMap, build_point_map};
use crate::config::GuidelineConfig;
use crate::consts::ALIGN_EPSILON;
use crate::events::{Action, CanvasEvent, EventBus, EventName, Subscription};
use crate::geom::{Axis, Point, distance};
use crate::host::{ObjectId, ObjectKind, Scene, Transformable};
use crate::overlay::OverlayContext;
use crate::render::draw_guides;
use crate::resize::{ResizeGesture, resolve_axis};
use crate::snap::{SnapMatch, candidate_points, collect_axis, move_check_points, snap_offset};

// =============================================================================
// GUIDE SETS
// =============================================================================

/// Set-membership key for a match. `-0.0` and `0.0` compare equal.
fn match_key(m: &SnapMatch) -> [u64; 4] {
    [
        (m.origin.x + 0.0).to_bits(),
        (m.origin.y + 0.0).to_bits(),
        (m.target.x + 0.0).to_bits(),
        (m.target.y + 0.0).to_bits(),
    ]
}

/// Insertion-ordered, deduplicated set of matches for one axis.
#[derive(Debug, Clone, Default)]
pub struct GuideSet {
    matches: Vec<SnapMatch>,
    keys: HashSet<[u64; 4]>,
}

impl GuideSet {
    /// Add a match. Returns `false` if an identical one is already present.
    pub fn insert(&mut self, m: SnapMatch) -> bool {
        if !self.keys.insert(match_key(&m)) {
            return false;
        }
        self.matches.push(m);
        true
    }

    pub fn extend<I: IntoIterator<Item = SnapMatch>>(&mut self, matches: I) {
        for m in matches {
            self.insert(m);
        }
    }

    pub fn clear(&mut self) {
        self.matches.clear();
        self.keys.clear();
    }

    #[must_use]
    pub fn matches(&self) -> &[SnapMatch] {
        &self.matches
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Distinct target coordinates along `axis`, in first-seen order.
    #[must_use]
    pub fn positions(&self, axis: Axis) -> Vec<f64> {
        let mut seen = HashSet::new();
        self.matches
            .iter()
            .map(|m| m.target.coord(axis))
            .filter(|c| seen.insert((c + 0.0).to_bits()))
            .collect()
    }
}

/// The active guides for the current frame.
#[derive(Debug, Clone, Default)]
pub struct Guides {
    /// Matches aligning X coordinates.
    pub vertical: GuideSet,
    /// Matches aligning Y coordinates.
    pub horizontal: GuideSet,
}

impl Guides {
    pub fn clear(&mut self) {
        self.vertical.clear();
        self.horizontal.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }

    /// Distinct x positions of the vertical guide lines.
    #[must_use]
    pub fn vertical_positions(&self) -> Vec<f64> {
        self.vertical.positions(Axis::X)
    }

    /// Distinct y positions of the horizontal guide lines.
    #[must_use]
    pub fn horizontal_positions(&self) -> Vec<f64> {
        self.horizontal.positions(Axis::Y)
    }
}

// =============================================================================
// POINT MAP CACHE
// =============================================================================

struct CacheEntry {
    key: String,
    map: PointMap,
}

/// Point maps keyed per object by `"matrix|width|height"`.
///
/// An entry is rebuilt whenever the key string changes.
#[derive(Default)]
pub struct PointMapCache {
    entries: HashMap<ObjectId, CacheEntry>,
}

impl PointMapCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn key_for<T: Transformable>(obj: &T) -> String {
        let [a, b, c, d, e, f] = obj.transform_matrix();
        let dims = obj.dimensions();
        format!("{a},{b},{c},{d},{e},{f}|{}|{}", dims.width, dims.height)
    }

    /// The object's point map, from cache when its key is unchanged.
    pub fn get_or_build<T: Transformable>(&mut self, obj: &T) -> PointMap {
        let key = Self::key_for(obj);
        if let Some(entry) = self.entries.get(&obj.id()) {
            if entry.key == key {
                return entry.map;
            }
        }
        let map = build_point_map(&obj.corners());
        self.entries.insert(obj.id(), CacheEntry { key, map });
        map
    }

    /// Drop entries for objects not in `live`.
    pub fn retain(&mut self, live: &HashSet<ObjectId>) {
        self.entries.retain(|id, _| live.contains(id));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// CANDIDATE POOL
// =============================================================================

/// Visible leaves under `id`, depth first. Groups are descended, never added.
fn visible_leaves<S: Scene>(scene: &S, id: ObjectId, seen: &mut HashSet<ObjectId>, out: &mut Vec<ObjectId>) {
    if !seen.insert(id) {
        return;
    }
    let Some(obj) = scene.object(&id) else {
        return;
    };
    if !obj.is_visible() {
        return;
    }
    match obj.kind() {
        ObjectKind::Leaf => out.push(id),
        ObjectKind::Group { children } => {
            for child in children {
                visible_leaves(scene, *child, seen, out);
            }
        }
        ObjectKind::Selection { .. } => {}
    }
}

/// `id` plus everything it contains, regardless of visibility.
fn flatten_members<S: Scene>(scene: &S, id: ObjectId) -> HashSet<ObjectId> {
    let mut out = HashSet::new();
    let mut pending = vec![id];
    while let Some(next) = pending.pop() {
        if !out.insert(next) {
            continue;
        }
        match scene.object(&next).map(Transformable::kind) {
            Some(ObjectKind::Group { children }) => pending.extend(children.iter().copied()),
            Some(ObjectKind::Selection { members }) => pending.extend(members.iter().copied()),
            Some(ObjectKind::Leaf) | None => {}
        }
    }
    out
}

// =============================================================================
// ORCHESTRATOR
// =============================================================================

/// Where the orchestrator is in the interaction lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Moving { target: ObjectId },
    Scaling { target: ObjectId },
}

/// Snap detection and guide drawing for one canvas.
pub struct AlignmentGuidelines {
    config: GuidelineConfig,
    guides: Guides,
    cache: PointMapCache,
    state: GestureState,
}

impl AlignmentGuidelines {
    #[must_use]
    pub fn new(config: GuidelineConfig) -> Self {
        Self { config, guides: Guides::default(), cache: PointMapCache::new(), state: GestureState::Idle }
    }

    #[must_use]
    pub fn config(&self) -> &GuidelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GuidelineConfig) {
        self.config = config;
    }

    #[must_use]
    pub fn guides(&self) -> &Guides {
        &self.guides
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn cache(&self) -> &PointMapCache {
        &self.cache
    }

    /// Point maps of every eligible object except `target` and its contents.
    pub fn candidate_pool<S: Scene>(&mut self, scene: &S, target: ObjectId) -> Vec<PointMap> {
        let excluded = flatten_members(scene, target);
        let mut seen = HashSet::new();
        let mut leaves = Vec::new();
        for id in scene.objects() {
            let Some(obj) = scene.object(&id) else {
                continue;
            };
            if !obj.is_visible() || !scene.is_on_screen(&id) {
                continue;
            }
            visible_leaves(scene, id, &mut seen, &mut leaves);
        }

        let live: HashSet<ObjectId> = leaves.iter().copied().collect();
        self.cache.retain(&live);

        let pool: Vec<PointMap> = leaves
            .into_iter()
            .filter(|id| !excluded.contains(id))
            .filter_map(|id| scene.object(&id).map(|obj| self.cache.get_or_build(obj)))
            .collect();
        trace!(%target, pool = pool.len(), excluded = excluded.len(), "guidelines: candidate pool");
        pool
    }

    /// Handle a move tick for `target`.
    pub fn on_moving<S: Scene>(&mut self, scene: &mut S, target: ObjectId) -> Vec<Action> {
        self.guides.clear();
        self.state = GestureState::Moving { target };

        let Some(checks) = scene.object(&target).map(|obj| move_check_points(&obj.corners())) else {
            return vec![Action::RenderNeeded];
        };
        let pool = self.candidate_pool(scene, target);
        let candidates = candidate_points(&pool);
        let margin = self.config.world_margin(scene.zoom());

        let (mut vertical, mut horizontal) = self.collect(&checks, &candidates, margin);
        let mut actions = Vec::new();

        if self.config.magnetic {
            let dx = snap_offset(&vertical, Axis::X);
            let dy = snap_offset(&horizontal, Axis::Y);
            if dx != 0.0 || dy != 0.0 {
                scene.translate_object(&target, dx, dy);
                actions.push(Action::ObjectUpdated { id: target });
                // Re-collect from where the object now sits.
                if let Some(obj) = scene.object(&target) {
                    (vertical, horizontal) = self.collect(&move_check_points(&obj.corners()), &candidates, margin);
                }
            }
        }

        debug!(%target, vertical = vertical.len(), horizontal = horizontal.len(), "guidelines: moving");
        self.guides.vertical.extend(vertical);
        self.guides.horizontal.extend(horizontal);
        actions.push(Action::RenderNeeded);
        actions
    }

    fn collect(&self, checks: &[Point], candidates: &[Point], margin: f64) -> (Vec<SnapMatch>, Vec<SnapMatch>) {
        let vertical =
            if self.config.vertical { collect_axis(checks, candidates, Axis::X, margin) } else { Vec::new() };
        let horizontal =
            if self.config.horizontal { collect_axis(checks, candidates, Axis::Y, margin) } else { Vec::new() };
        (vertical, horizontal)
    }

    /// Handle a scale tick for `target` with the given handle gesture.
    pub fn on_scaling<S: Scene>(&mut self, scene: &mut S, target: ObjectId, gesture: &ResizeGesture) -> Vec<Action> {
        self.guides.clear();
        self.state = GestureState::Scaling { target };

        let pool = self.candidate_pool(scene, target);
        let candidates = candidate_points(&pool);
        let margin = self.config.world_margin(scene.zoom());
        let Some(obj) = scene.object_mut(&target) else {
            return vec![Action::RenderNeeded];
        };

        let mut vertical = if self.config.vertical && gesture.resolves_axis(Axis::X) {
            resolve_axis(obj, gesture, Axis::X, &candidates, margin)
        } else {
            Vec::new()
        };
        let horizontal = if self.config.horizontal && gesture.resolves_axis(Axis::Y) {
            resolve_axis(obj, gesture, Axis::Y, &candidates, margin)
        } else {
            Vec::new()
        };

        // A uniform Y pass rescales X too, which can pull the handle off the X guide.
        if gesture.uniform && !horizontal.is_empty() && !vertical.is_empty() {
            let handle = build_point_map(&obj.corners()).get(gesture.handle);
            vertical = vertical
                .into_iter()
                .filter(|m| distance(handle.x, m.target.x) <= ALIGN_EPSILON)
                .map(|m| SnapMatch { origin: handle, target: m.target })
                .collect();
        }
        self.guides.vertical.extend(vertical);
        self.guides.horizontal.extend(horizontal);

        debug!(
            %target,
            handle = ?gesture.handle,
            vertical = self.guides.vertical.len(),
            horizontal = self.guides.horizontal.len(),
            "guidelines: scaling"
        );
        let mut actions = Vec::new();
        if !self.guides.is_empty() {
            actions.push(Action::ObjectUpdated { id: target });
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Handle a drop: return to Idle and drop the active guides.
    pub fn on_modified(&mut self, target: ObjectId) -> Vec<Action> {
        debug!(%target, "guidelines: modified");
        self.guides.clear();
        self.state = GestureState::Idle;
        vec![Action::RenderNeeded]
    }

    /// First phase of a render pass: wipe the overlay.
    pub fn before_render(&self, overlay: &mut dyn OverlayContext) {
        overlay.clear();
    }

    /// Second phase of a render pass: draw the active guides.
    pub fn after_render(&self, overlay: &mut dyn OverlayContext) {
        draw_guides(overlay, self.guides.vertical.matches(), self.guides.horizontal.matches(), &self.config);
    }

    /// Dispatch one canvas event.
    pub fn handle<S: Scene>(
        &mut self,
        event: &CanvasEvent,
        scene: &mut S,
        overlay: &mut dyn OverlayContext,
    ) -> Vec<Action> {
        match *event {
            CanvasEvent::ObjectMoving { target } => self.on_moving(scene, target),
            CanvasEvent::ObjectScaling { target, gesture } => self.on_scaling(scene, target, &gesture),
            CanvasEvent::ObjectModified { target } => self.on_modified(target),
            CanvasEvent::BeforeRender => {
                self.before_render(overlay);
                Vec::new()
            }
            CanvasEvent::AfterRender => {
                self.after_render(overlay);
                Vec::new()
            }
        }
    }
}

// =============================================================================
// ATTACHMENT
// =============================================================================

const SUBSCRIBED: [EventName; 5] = [
    EventName::ObjectMoving,
    EventName::ObjectScaling,
    EventName::ObjectModified,
    EventName::BeforeRender,
    EventName::AfterRender,
];

/// An orchestrator subscribed to a canvas event bus.
pub struct AttachedGuidelines {
    inner: Rc<RefCell<AlignmentGuidelines>>,
    subscriptions: Vec<Subscription>,
}

impl AttachedGuidelines {
    /// Create an orchestrator and subscribe it to every lifecycle event on `bus`.
    pub fn attach<S: Scene + 'static>(bus: &mut EventBus<S>, config: GuidelineConfig) -> Self {
        let inner = Rc::new(RefCell::new(AlignmentGuidelines::new(config)));
        let subscriptions = SUBSCRIBED
            .iter()
            .map(|name| {
                let handler_state = Rc::clone(&inner);
                bus.subscribe(*name, move |event, scene, overlay| {
                    let Ok(mut guidelines) = handler_state.try_borrow_mut() else {
                        warn!(event = ?event.name(), "guidelines: re-entrant event dropped");
                        return Vec::new();
                    };
                    guidelines.handle(event, scene, overlay)
                })
            })
            .collect();
        Self { inner, subscriptions }
    }

    /// Snapshot of the active guides. Empty while an event is being handled.
    #[must_use]
    pub fn guides(&self) -> Guides {
        self.inner.try_borrow().map(|g| g.guides().clone()).unwrap_or_default()
    }

    /// Run `f` against the orchestrator. `None` while an event is being handled.
    pub fn with<R>(&self, f: impl FnOnce(&mut AlignmentGuidelines) -> R) -> Option<R> {
        let Ok(mut guidelines) = self.inner.try_borrow_mut() else {
            warn!("guidelines: orchestrator busy");
            return None;
        };
        Some(f(&mut guidelines))
    }

    #[must_use]
    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Revoke every subscription made by `attach`. Returns how many were removed.
    pub fn dispose<S>(self, bus: &mut EventBus<S>) -> usize {
        let removed = self.subscriptions.into_iter().filter(|sub| bus.unsubscribe(*sub)).count();
        debug!(removed, "guidelines: disposed");
        removed
    }
}
