//! End-to-end selection behavior across nested hierarchies.
//!
//! These tests exercise the full wiring path: containers attached to a
//! group, controls discovered at depth, taps and programmatic selection
//! driving the state machine, and the group-level listener observing
//! exactly one notification per logical change.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

use trellis::{NO_ID, Panel, RadioButton, RadioGroup, View, init_global_registry};

fn setup() {
    init_global_registry();
}

/// Attach a counting listener; returns (invocation count, last checked id).
fn attach_counter(group: &RadioGroup) -> (Arc<AtomicUsize>, Arc<AtomicI32>) {
    let count = Arc::new(AtomicUsize::new(0));
    let last = Arc::new(AtomicI32::new(NO_ID));
    let count_clone = count.clone();
    let last_clone = last.clone();
    group.set_on_checked_change(move |_, id| {
        count_clone.fetch_add(1, Ordering::SeqCst);
        last_clone.store(id, Ordering::SeqCst);
    });
    (count, last)
}

/// How many of the given controls are currently checked.
fn checked_count(controls: &[&RadioButton]) -> usize {
    controls.iter().filter(|c| c.is_checked()).count()
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

/// A wrapper card with one nested control (no prior identity) is added to an
/// empty group; selecting the assigned identity checks the control and
/// notifies exactly once.
#[test]
fn wrapped_control_is_selectable_by_assigned_id() {
    setup();
    let group = RadioGroup::new();
    let card = Panel::new();
    let option = RadioButton::new("Option");
    card.add_child(option.node_id()).unwrap();

    let (count, last) = attach_counter(&group);
    group.add_child(card.node_id()).unwrap();

    let id = option.view_id();
    assert!(id > 0);

    group.check_id(id);

    assert!(option.is_checked());
    assert_eq!(group.checked_id(), id);
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(last.load(Ordering::SeqCst), id);
}

/// A control checked at build time is authoritative after the build
/// completes: finalize re-applies it and notifies exactly once.
#[test]
fn finalize_restores_build_time_selection() {
    setup();
    let group = RadioGroup::new();
    let a = RadioButton::new("A").with_view_id(10).with_checked(true);
    let b = RadioButton::new("B").with_view_id(20);
    group.add_child(a.node_id()).unwrap();
    group.add_child(b.node_id()).unwrap();

    // The listener arrives once the tree is assembled, as in real usage.
    let (count, last) = attach_counter(&group);
    group.finish_build();

    assert_eq!(group.checked_id(), 10);
    assert!(a.is_checked());
    assert!(!b.is_checked());
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(last.load(Ordering::SeqCst), 10);
}

/// Tapping control B while A is selected moves the selection over with a
/// single notification.
#[test]
fn tap_switches_selection() {
    setup();
    let group = RadioGroup::new();
    let a = RadioButton::new("A").with_view_id(10);
    let b = RadioButton::new("B").with_view_id(20);
    group.add_child(a.node_id()).unwrap();
    group.add_child(b.node_id()).unwrap();
    group.check_id(10);

    let (count, last) = attach_counter(&group);
    b.click();

    assert!(!a.is_checked());
    assert!(b.is_checked());
    assert_eq!(group.checked_id(), 20);
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(last.load(Ordering::SeqCst), 20);
}

/// Clearing an already-empty selection is silent.
#[test]
fn clear_on_empty_selection_is_silent() {
    setup();
    let group = RadioGroup::new();
    let rb = RadioButton::new("Option").with_view_id(10);
    group.add_child(rb.node_id()).unwrap();

    let (count, _) = attach_counter(&group);
    group.check_id(NO_ID);

    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert_eq!(group.checked_id(), NO_ID);
}

// =============================================================================
// Properties
// =============================================================================

/// Exclusivity: after any sequence of taps and programmatic selections, at
/// most one control in the subtree is checked.
#[test]
fn at_most_one_control_checked() {
    setup();
    let group = RadioGroup::new();

    let direct = RadioButton::new("direct").with_view_id(1001);
    let card = Panel::new();
    let nested = RadioButton::new("nested").with_view_id(1002);
    let deep_card = Panel::new();
    let inner = Panel::new();
    let deep = RadioButton::new("deep").with_view_id(1003);

    card.add_child(nested.node_id()).unwrap();
    inner.add_child(deep.node_id()).unwrap();
    deep_card.add_child(inner.node_id()).unwrap();

    group.add_child(direct.node_id()).unwrap();
    group.add_child(card.node_id()).unwrap();
    group.add_child(deep_card.node_id()).unwrap();

    let controls = [&direct, &nested, &deep];
    assert_eq!(checked_count(&controls), 0);

    group.check_id(1001);
    assert_eq!(checked_count(&controls), 1);

    nested.click();
    assert_eq!(checked_count(&controls), 1);
    assert!(nested.is_checked());

    deep.click();
    assert_eq!(checked_count(&controls), 1);
    assert!(deep.is_checked());

    group.check_id(1002);
    assert_eq!(checked_count(&controls), 1);
    assert!(nested.is_checked());

    group.clear_check();
    assert_eq!(checked_count(&controls), 0);
}

/// Idempotence: re-selecting the current id produces no notification and no
/// flag mutations.
#[test]
fn reselecting_current_id_is_silent() {
    setup();
    let group = RadioGroup::new();
    let rb = RadioButton::new("Option").with_view_id(10);
    group.add_child(rb.node_id()).unwrap();
    group.check_id(10);

    let (count, _) = attach_counter(&group);
    group.check_id(10);
    group.check_id(10);

    assert!(rb.is_checked());
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

/// Notify-once: each state-changing operation yields exactly one
/// notification carrying the resulting id.
#[test]
fn each_transition_notifies_exactly_once() {
    setup();
    let group = RadioGroup::new();
    let a = RadioButton::new("A").with_view_id(10);
    let b = RadioButton::new("B").with_view_id(20);
    group.add_child(a.node_id()).unwrap();
    group.add_child(b.node_id()).unwrap();

    let log = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let log_clone = log.clone();
    group.set_on_checked_change(move |_, id| {
        log_clone.lock().push(id);
    });

    group.check_id(10);
    b.click();
    group.clear_check();
    a.click();

    assert_eq!(*log.lock(), vec![10, 20, NO_ID, 10]);
}

/// Depth independence: a control nested two wrappers deep behaves exactly
/// like a direct child.
#[test]
fn deeply_nested_control_tracks_like_direct_child() {
    setup();
    let group = RadioGroup::new();
    let direct = RadioButton::new("direct").with_view_id(10);
    group.add_child(direct.node_id()).unwrap();

    let outer = Panel::new();
    let inner = Panel::new();
    let nested = RadioButton::new("nested");
    inner.add_child(nested.node_id()).unwrap();
    outer.add_child(inner.node_id()).unwrap();
    group.add_child(outer.node_id()).unwrap();

    let nested_id = nested.view_id();
    assert!(nested_id > 0);

    let (count, last) = attach_counter(&group);

    group.check_id(nested_id);
    assert!(nested.is_checked());
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(last.load(Ordering::SeqCst), nested_id);

    direct.click();
    assert!(!nested.is_checked());
    assert!(direct.is_checked());
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

/// A control added into an already-attached wrapper is discovered too.
#[test]
fn late_addition_below_wrapper_is_tracked() {
    setup();
    let group = RadioGroup::new();
    let card = Panel::new();
    group.add_child(card.node_id()).unwrap();

    let rb = RadioButton::new("late");
    card.add_child(rb.node_id()).unwrap();

    let id = rb.view_id();
    assert!(id > 0);

    group.check_id(id);
    assert!(rb.is_checked());
}

/// Identity stability: a pre-assigned identity survives attachment.
#[test]
fn existing_identity_is_preserved() {
    setup();
    let group = RadioGroup::new();
    let card = Panel::new();
    let rb = RadioButton::new("Option").with_view_id(31337);
    card.add_child(rb.node_id()).unwrap();
    group.add_child(card.node_id()).unwrap();

    assert_eq!(rb.view_id(), 31337);

    group.check_id(31337);
    assert!(rb.is_checked());
}

/// Clear semantics: after a clear, no control is checked and the group
/// reports no selection.
#[test]
fn clear_unchecks_and_reports_none() {
    setup();
    let group = RadioGroup::new();
    let a = RadioButton::new("A").with_view_id(10);
    let b = RadioButton::new("B").with_view_id(20);
    group.add_child(a.node_id()).unwrap();
    group.add_child(b.node_id()).unwrap();
    group.check_id(20);

    group.clear_check();

    assert_eq!(group.checked_id(), NO_ID);
    assert!(!a.is_checked());
    assert!(!b.is_checked());
}
