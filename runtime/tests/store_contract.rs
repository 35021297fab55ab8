//! Integration tests for the Store dispatch contract
//!
//! Covers the observable guarantees of the dual-channel design: silent
//! routing misses, post-transition notification in registration order,
//! depth-first re-entrant dispatch, no partial commit on reducer panic,
//! and state snapshots on the effect channel.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::cell::RefCell;
use std::rc::Rc;
use uniflow_core::{Action, Dispatchers, EffectHandler, Reducer};
use uniflow_runtime::Store;
use uniflow_testing::mocks::RecordingSubscriber;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
struct TestState {
    value: u32,
}

#[derive(Clone, Debug, PartialEq)]
enum TestAction {
    /// Replace the value (reducer channel)
    Set(u32),
    /// Return a structurally equal replacement state
    Touch,
    /// Panic inside the reducer
    Poison,
    /// Record the state snapshot seen on the effect channel
    Probe,
    /// Effect-channel action whose handler dispatches `Set` back
    SetViaEffect(u32),
    /// Routed by neither channel
    Unrouted,
}

impl Action for TestAction {
    fn kind(&self) -> &'static str {
        match self {
            Self::Set(_) => "SET",
            Self::Touch => "TOUCH",
            Self::Poison => "POISON",
            Self::Probe => "PROBE",
            Self::SetViaEffect(_) => "SET_VIA_EFFECT",
            Self::Unrouted => "UNROUTED",
        }
    }
}

struct TestReducer;

impl Reducer for TestReducer {
    type State = TestState;
    type Action = TestAction;

    fn reduce(
        &self,
        state: &TestState,
        action: TestAction,
        _dispatchers: &Dispatchers<TestAction>,
    ) -> Option<TestState> {
        match action {
            TestAction::Set(value) => Some(TestState { value }),
            TestAction::Touch => Some(state.clone()),
            TestAction::Poison => panic!("reducer fault"),
            // Effect-only and unknown kinds fall through to the no-op branch.
            TestAction::Probe | TestAction::SetViaEffect(_) | TestAction::Unrouted => None,
        }
    }
}

/// Environment for the test effect handler: a shared log of the state
/// snapshots observed on the effect channel.
#[derive(Clone, Default)]
struct EffectProbe {
    seen: Rc<RefCell<Vec<u32>>>,
}

struct TestEffects;

impl EffectHandler for TestEffects {
    type State = TestState;
    type Action = TestAction;
    type Environment = EffectProbe;

    fn handle(
        &self,
        state: &TestState,
        action: TestAction,
        env: &EffectProbe,
        dispatchers: &Dispatchers<TestAction>,
    ) {
        match action {
            TestAction::Probe => env.seen.borrow_mut().push(state.value),
            TestAction::SetViaEffect(value) => dispatchers.dispatch(TestAction::Set(value)),
            _ => {},
        }
    }
}

fn test_store() -> (Store<TestReducer, TestEffects>, EffectProbe) {
    let probe = EffectProbe::default();
    let store = Store::new(
        TestState { value: 0 },
        TestReducer,
        TestEffects,
        probe.clone(),
    );
    (store, probe)
}

// ============================================================================
// Routing misses
// ============================================================================

#[test]
fn unrouted_dispatch_leaves_state_unchanged_and_notifies_nobody() {
    let (store, _) = test_store();
    let recorder = RecordingSubscriber::new();
    store.subscribe(recorder.callback());

    store.dispatch(TestAction::Unrouted);

    assert_eq!(store.snapshot(), TestState { value: 0 });
    assert!(recorder.is_empty());
}

#[test]
fn unrouted_effect_has_no_observable_effect() {
    let (store, probe) = test_store();
    let recorder = RecordingSubscriber::new();
    store.subscribe(recorder.callback());

    store.dispatch_effect(TestAction::Unrouted);

    assert_eq!(store.snapshot(), TestState { value: 0 });
    assert!(recorder.is_empty());
    assert!(probe.seen.borrow().is_empty());
}

// ============================================================================
// Subscriber notification
// ============================================================================

#[test]
fn subscribers_run_in_registration_order_with_the_post_transition_state() {
    let (store, _) = test_store();
    let log = Rc::new(RefCell::new(Vec::new()));

    for tag in ["first", "second", "third"] {
        let log = Rc::clone(&log);
        store.subscribe(move |state: &TestState, _| {
            log.borrow_mut().push((tag, state.value));
        });
    }

    store.dispatch(TestAction::Set(5));

    assert_eq!(
        *log.borrow(),
        vec![("first", 5), ("second", 5), ("third", 5)]
    );
}

#[test]
fn subscribers_run_once_per_dispatch() {
    let (store, _) = test_store();
    let recorder = RecordingSubscriber::new();
    store.subscribe(recorder.callback());

    store.dispatch(TestAction::Set(1));
    store.dispatch(TestAction::Set(2));

    let observed: Vec<u32> = recorder.states().iter().map(|s| s.value).collect();
    assert_eq!(observed, vec![1, 2]);
}

#[test]
fn same_subscriber_registered_twice_runs_once_per_registration() {
    let (store, _) = test_store();
    let recorder = RecordingSubscriber::new();
    store.subscribe(recorder.callback());
    store.subscribe(recorder.callback());

    store.dispatch(TestAction::Set(9));

    assert_eq!(recorder.len(), 2);
}

#[test]
fn structurally_equal_replacement_still_notifies() {
    let (store, _) = test_store();
    let recorder = RecordingSubscriber::new();
    store.subscribe(recorder.callback());

    store.dispatch(TestAction::Set(3));
    // Touch returns a clone of the current state; no change-detection
    // short-circuit is assumed.
    store.dispatch(TestAction::Touch);

    assert_eq!(recorder.len(), 2);
    assert_eq!(recorder.last().map(|s| s.value), Some(3));
}

// ============================================================================
// Re-entrant dispatch
// ============================================================================

#[test]
fn nested_dispatch_is_depth_first_not_queued() {
    let (store, _) = test_store();
    let log = Rc::new(RefCell::new(Vec::new()));

    // First subscriber: logs, then dispatches a follow-up action from
    // inside the notification pass of the initial one.
    {
        let log = Rc::clone(&log);
        store.subscribe(move |state: &TestState, dispatchers| {
            log.borrow_mut().push(("a", state.value));
            if state.value == 1 {
                dispatchers.dispatch(TestAction::Set(2));
            }
        });
    }
    // Second subscriber: logs only.
    {
        let log = Rc::clone(&log);
        store.subscribe(move |state: &TestState, _| {
            log.borrow_mut().push(("b", state.value));
        });
    }

    store.dispatch(TestAction::Set(1));

    // The nested transition (value 2) fully completes, both subscribers
    // included, before the outer pass reaches subscriber "b" - which still
    // observes its own transition's state.
    assert_eq!(
        *log.borrow(),
        vec![("a", 1), ("a", 2), ("b", 2), ("b", 1)]
    );
    assert_eq!(store.state(|s| s.value), 2);
}

#[test]
fn subscriber_added_during_notification_joins_from_the_next_dispatch() {
    let (store, _) = test_store();
    let late = RecordingSubscriber::new();

    {
        let store_handle = store.clone();
        let late = late.clone();
        let armed = RefCell::new(false);
        store.subscribe(move |_: &TestState, _| {
            if !*armed.borrow() {
                *armed.borrow_mut() = true;
                store_handle.subscribe(late.callback());
            }
        });
    }

    store.dispatch(TestAction::Set(1));
    assert!(late.is_empty());

    store.dispatch(TestAction::Set(2));
    assert_eq!(late.len(), 1);
}

// ============================================================================
// Reducer faults
// ============================================================================

#[test]
fn panicking_reducer_commits_nothing() {
    let (store, _) = test_store();
    let recorder = RecordingSubscriber::new();
    store.subscribe(recorder.callback());
    store.dispatch(TestAction::Set(7));

    let fault = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        store.dispatch(TestAction::Poison);
    }));

    assert!(fault.is_err());
    assert_eq!(store.snapshot(), TestState { value: 7 });
    // Only the successful transition was observed.
    assert_eq!(recorder.len(), 1);
}

// ============================================================================
// Effect channel
// ============================================================================

#[test]
fn effect_handler_sees_a_snapshot_of_the_current_state() {
    let (store, probe) = test_store();

    store.dispatch(TestAction::Set(7));
    store.dispatch_effect(TestAction::Probe);
    store.dispatch(TestAction::Set(8));
    store.dispatch_effect(TestAction::Probe);

    assert_eq!(*probe.seen.borrow(), vec![7, 8]);
}

#[test]
fn effect_follow_up_re_enters_the_reducer_channel() {
    let (store, _) = test_store();
    let recorder = RecordingSubscriber::new();
    store.subscribe(recorder.callback());

    store.dispatch_effect(TestAction::SetViaEffect(11));

    assert_eq!(store.state(|s| s.value), 11);
    assert_eq!(recorder.len(), 1);
}

#[test]
fn effect_channel_does_not_notify_subscribers_by_itself() {
    let (store, _) = test_store();
    let recorder = RecordingSubscriber::new();
    store.subscribe(recorder.callback());

    store.dispatch_effect(TestAction::Probe);

    assert!(recorder.is_empty());
}
