use uuid::Uuid;

use super::*;
use crate::anchor::Anchor;
use crate::overlay::DisplayList;
use crate::resize::ResizeMode;

type Log = Vec<String>;

fn record(tag: &'static str) -> impl FnMut(&CanvasEvent, &mut Log, &mut dyn OverlayContext) -> Vec<Action> {
    move |_: &CanvasEvent, log: &mut Log, _: &mut dyn OverlayContext| {
        log.push(tag.to_owned());
        Vec::new()
    }
}

#[test]
fn event_names_match_payload() {
    let id = Uuid::new_v4();
    let gesture = ResizeGesture { handle: Anchor::Br, mode: ResizeMode::Scale, uniform: false, centered: false };
    assert_eq!(CanvasEvent::ObjectMoving { target: id }.name(), EventName::ObjectMoving);
    assert_eq!(CanvasEvent::ObjectScaling { target: id, gesture }.name(), EventName::ObjectScaling);
    assert_eq!(CanvasEvent::ObjectModified { target: id }.name(), EventName::ObjectModified);
    assert_eq!(CanvasEvent::BeforeRender.name(), EventName::BeforeRender);
    assert_eq!(CanvasEvent::AfterRender.name(), EventName::AfterRender);
}

#[test]
fn emit_reaches_only_matching_handlers() {
    let mut bus: EventBus<Log> = EventBus::new();
    bus.subscribe(EventName::BeforeRender, record("before"));
    bus.subscribe(EventName::AfterRender, record("after"));
    let mut log = Log::new();
    let mut overlay = DisplayList::new();

    bus.emit(&CanvasEvent::AfterRender, &mut log, &mut overlay);
    assert_eq!(log, vec!["after"]);
}

#[test]
fn handlers_run_in_subscription_order() {
    let mut bus: EventBus<Log> = EventBus::new();
    bus.subscribe(EventName::BeforeRender, record("first"));
    bus.subscribe(EventName::BeforeRender, record("second"));
    let mut log = Log::new();
    bus.emit(&CanvasEvent::BeforeRender, &mut log, &mut DisplayList::new());
    assert_eq!(log, vec!["first", "second"]);
}

#[test]
fn actions_are_collected() {
    let mut bus: EventBus<Log> = EventBus::new();
    let id = Uuid::new_v4();
    bus.subscribe(EventName::ObjectMoving, move |_, _, _| vec![Action::ObjectUpdated { id }]);
    bus.subscribe(EventName::ObjectMoving, |_, _, _| vec![Action::RenderNeeded]);
    let actions = bus.emit(&CanvasEvent::ObjectMoving { target: id }, &mut Log::new(), &mut DisplayList::new());
    assert_eq!(actions, vec![Action::ObjectUpdated { id }, Action::RenderNeeded]);
}

#[test]
fn handler_can_draw_on_overlay() {
    let mut bus: EventBus<Log> = EventBus::new();
    bus.subscribe(EventName::AfterRender, |_, _, overlay| {
        overlay.begin_path();
        overlay.stroke();
        Vec::new()
    });
    let mut overlay = DisplayList::new();
    bus.emit(&CanvasEvent::AfterRender, &mut Log::new(), &mut overlay);
    assert_eq!(overlay.stroke_count(), 1);
}

#[test]
fn unsubscribe_removes_exactly_one() {
    let mut bus: EventBus<Log> = EventBus::new();
    let a = bus.subscribe(EventName::BeforeRender, record("a"));
    bus.subscribe(EventName::BeforeRender, record("b"));
    assert_eq!(bus.len(), 2);

    assert!(bus.unsubscribe(a));
    assert!(!bus.unsubscribe(a));
    assert_eq!(bus.subscriber_count(EventName::BeforeRender), 1);

    let mut log = Log::new();
    bus.emit(&CanvasEvent::BeforeRender, &mut log, &mut DisplayList::new());
    assert_eq!(log, vec!["b"]);
}

#[test]
fn subscription_remembers_event() {
    let mut bus: EventBus<Log> = EventBus::new();
    let sub = bus.subscribe(EventName::ObjectModified, record("x"));
    assert_eq!(sub.event(), EventName::ObjectModified);
    assert!(!bus.is_empty());
}
