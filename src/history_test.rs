use serde_json::json;
use uuid::Uuid;

use super::*;

fn manager(max_len: usize) -> HistoryManager<&'static str> {
    HistoryManager::new(HistoryConfig { max_len })
}

fn three_states() -> HistoryManager<&'static str> {
    let mut h = manager(10);
    h.initialize("S0");
    assert!(h.save("S1", false));
    assert!(h.save("S2", false));
    h
}

// =============================================================
// Empty / initialize / clear
// =============================================================

#[test]
fn new_history_is_uninitialized() {
    let mut h = manager(5);
    assert!(!h.is_initialized());
    assert_eq!(h.cursor(), None);
    assert_eq!(h.current_state(), None);
    assert!(!h.can_undo());
    assert!(!h.can_redo());
    assert_eq!(h.undo(), None);
    assert_eq!(h.redo(), None);
}

#[test]
fn initialize_resets_to_single_entry() {
    let mut h = three_states();
    h.initialize("T");
    assert_eq!(h.len(), 1);
    assert_eq!(h.cursor(), Some(0));
    assert_eq!(h.current_state(), Some(&"T"));
    assert!(!h.can_undo());
}

#[test]
fn clear_empties_and_resets_cursor() {
    let mut h = three_states();
    h.clear();
    assert!(h.is_empty());
    assert!(!h.is_initialized());
    assert_eq!(h.cursor(), None);
}

#[test]
fn save_into_empty_history_starts_at_zero() {
    let mut h = manager(5);
    assert!(h.save("A", false));
    assert_eq!(h.cursor(), Some(0));
    assert_eq!(h.current_state(), Some(&"A"));
}

// =============================================================
// Undo / redo round trip
// =============================================================

#[test]
fn undo_redo_round_trip() {
    let mut h = three_states();

    assert_eq!(h.undo(), Some(&"S1"));
    assert_eq!(h.undo(), Some(&"S0"));
    assert_eq!(h.undo(), None);
    assert!(!h.can_undo());

    assert_eq!(h.redo(), Some(&"S1"));
    assert_eq!(h.redo(), Some(&"S2"));
    assert_eq!(h.redo(), None);
    assert!(!h.can_redo());
}

#[test]
fn queries_track_cursor() {
    let mut h = three_states();
    assert!(h.can_undo());
    assert!(!h.can_redo());
    h.undo();
    assert!(h.can_undo());
    assert!(h.can_redo());
    assert_eq!(h.current_state(), Some(&"S1"));
}

// =============================================================
// Branch pruning
// =============================================================

#[test]
fn save_after_undo_discards_redo_branch() {
    let mut h = three_states();
    h.undo();
    assert!(h.save("S3", false));

    assert_eq!(h.redo(), None);
    assert_eq!(h.len(), 3);
    assert_eq!(h.states().copied().collect::<Vec<_>>(), vec!["S0", "S1", "S3"]);
    assert_eq!(h.current_state(), Some(&"S3"));
}

// =============================================================
// Bounded length
// =============================================================

#[test]
fn bounded_length_keeps_most_recent() {
    let n = 4;
    let mut h: HistoryManager<usize> = HistoryManager::new(HistoryConfig { max_len: n });
    for i in 0..n + 5 {
        h.save(i, false);
    }
    assert_eq!(h.len(), n);
    assert_eq!(h.states().copied().collect::<Vec<_>>(), vec![5, 6, 7, 8]);
    assert_eq!(h.cursor(), Some(n - 1));
    assert_eq!(h.current_state(), Some(&8));
}

#[test]
fn zero_max_len_treated_as_one() {
    let mut h = manager(0);
    assert_eq!(h.max_len(), 1);
    h.save("A", false);
    h.save("B", false);
    assert_eq!(h.len(), 1);
    assert_eq!(h.current_state(), Some(&"B"));
}

// =============================================================
// Dedup, lock, force
// =============================================================

#[test]
fn duplicate_of_current_is_skipped() {
    let mut h = three_states();
    assert!(!h.save("S2", false));
    assert_eq!(h.len(), 3);
}

#[test]
fn force_records_duplicate() {
    let mut h = three_states();
    assert!(h.save("S2", true));
    assert_eq!(h.len(), 4);
}

#[test]
fn locked_save_is_ignored_unless_forced() {
    let mut h = three_states();
    h.set_locked(true);
    assert!(h.is_locked());
    assert!(!h.save("X", false));
    assert_eq!(h.len(), 3);
    assert!(h.save("X", true));
    assert_eq!(h.current_state(), Some(&"X"));
    h.set_locked(false);
    assert!(h.save("Y", false));
}

#[test]
fn json_states_compare_structurally() {
    let mut h: HistoryManager = HistoryManager::default();
    h.initialize(json!({ "objects": [1, 2] }));
    assert!(!h.save(json!({ "objects": [1, 2] }), false));
    assert!(h.save(json!({ "objects": [1, 2, 3] }), false));
    assert_eq!(h.max_len(), 50);
}

// =============================================================
// SessionHistory
// =============================================================

#[test]
fn surfaces_keep_independent_histories() {
    let mut session: SessionHistory<&'static str> = SessionHistory::default();
    let slide_a = Uuid::new_v4();
    let slide_b = Uuid::new_v4();

    session.activate(slide_a).initialize("a0");
    session.activate(slide_a).save("a1", false);
    session.activate(slide_b).initialize("b0");

    assert_eq!(session.len(), 2);
    assert_eq!(session.active_id(), Some(slide_b));
    assert_eq!(session.active().and_then(HistoryManager::current_state), Some(&"b0"));

    // Switching back keeps slide A's stack.
    let a = session.activate(slide_a);
    assert_eq!(a.len(), 2);
    assert_eq!(a.undo(), Some(&"a0"));
}

#[test]
fn active_mut_reaches_active_surface() {
    let mut session: SessionHistory<&'static str> = SessionHistory::default();
    assert!(session.active_mut().is_none());
    let id = Uuid::new_v4();
    session.activate(id);
    if let Some(h) = session.active_mut() {
        h.initialize("x");
    }
    assert_eq!(session.get(&id).map(HistoryManager::len), Some(1));
}

#[test]
fn remove_tears_down_surface() {
    let mut session: SessionHistory<&'static str> = SessionHistory::default();
    let id = Uuid::new_v4();
    session.activate(id).initialize("x");
    assert!(session.remove(&id));
    assert!(!session.remove(&id));
    assert!(session.is_empty());
    assert_eq!(session.active_id(), None);

    // Re-activating starts fresh.
    assert!(!session.activate(id).is_initialized());
}
