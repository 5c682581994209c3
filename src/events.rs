//! Canvas lifecycle events and a revocable subscription bus.
//!
//! DESIGN
//! ======
//! The host drives the core through five named events. Handlers are boxed
//! closures keyed by a [`Subscription`] handle; `unsubscribe` removes exactly
//! that handler, so a component can tear down everything it registered
//! without touching other subscribers. Handlers run in subscription order
//! and return [`Action`]s for the host to process, the same way the input
//! handlers of the editing engine do.
//!
//! Delivery is synchronous and serial. The host guarantees `BeforeRender`
//! precedes `AfterRender` within one render pass.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use crate::host::ObjectId;
use crate::overlay::OverlayContext;
use crate::resize::ResizeGesture;

/// Name of a subscribable canvas event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    /// Fired continuously while an object is dragged.
    ObjectMoving,
    /// Fired continuously while an object is resized by a handle.
    ObjectScaling,
    /// Fired once when a drag or resize is released.
    ObjectModified,
    /// Fired at the start of every render pass.
    BeforeRender,
    /// Fired after the scene has been drawn.
    AfterRender,
}

/// An event with its payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    ObjectMoving { target: ObjectId },
    ObjectScaling { target: ObjectId, gesture: ResizeGesture },
    ObjectModified { target: ObjectId },
    BeforeRender,
    AfterRender,
}

impl CanvasEvent {
    #[must_use]
    pub fn name(&self) -> EventName {
        match self {
            Self::ObjectMoving { .. } => EventName::ObjectMoving,
            Self::ObjectScaling { .. } => EventName::ObjectScaling,
            Self::ObjectModified { .. } => EventName::ObjectModified,
            Self::BeforeRender => EventName::BeforeRender,
            Self::AfterRender => EventName::AfterRender,
        }
    }
}

/// Actions returned from event handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A handler changed this object's geometry.
    ObjectUpdated { id: ObjectId },
    /// The overlay is out of date and a render pass should be scheduled.
    RenderNeeded,
}

/// Handle returned by [`EventBus::subscribe`]; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    event: EventName,
    id: u64,
}

impl Subscription {
    #[must_use]
    pub fn event(&self) -> EventName {
        self.event
    }
}

/// A subscribed event handler. `S` is the host scene the handler operates on.
pub type Handler<S> = Box<dyn FnMut(&CanvasEvent, &mut S, &mut dyn OverlayContext) -> Vec<Action>>;

/// Synchronous event bus for one canvas.
pub struct EventBus<S> {
    next_id: u64,
    handlers: Vec<(Subscription, Handler<S>)>,
}

impl<S> Default for EventBus<S> {
    fn default() -> Self {
        Self { next_id: 0, handlers: Vec::new() }
    }
}

impl<S> EventBus<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event`.
    pub fn subscribe<F>(&mut self, event: EventName, handler: F) -> Subscription
    where
        F: FnMut(&CanvasEvent, &mut S, &mut dyn OverlayContext) -> Vec<Action> + 'static,
    {
        let sub = Subscription { event, id: self.next_id };
        self.next_id += 1;
        self.handlers.push((sub, Box::new(handler)));
        sub
    }

    /// Remove a handler. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, sub: Subscription) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(s, _)| *s != sub);
        self.handlers.len() != before
    }

    /// Deliver `event` to every handler subscribed to its name, in order.
    pub fn emit(&mut self, event: &CanvasEvent, scene: &mut S, overlay: &mut dyn OverlayContext) -> Vec<Action> {
        let name = event.name();
        let mut actions = Vec::new();
        for (sub, handler) in &mut self.handlers {
            if sub.event == name {
                actions.extend(handler(event, scene, &mut *overlay));
            }
        }
        actions
    }

    /// Number of handlers subscribed to `event`.
    #[must_use]
    pub fn subscriber_count(&self, event: EventName) -> usize {
        self.handlers.iter().filter(|(s, _)| s.event == event).count()
    }

    /// Total number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
