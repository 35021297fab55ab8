//! # Uniflow Runtime
//!
//! The Store runtime for the Uniflow architecture.
//!
//! The [`Store`] is the single authoritative holder of state and the router
//! for two independent action channels:
//!
//! - `dispatch` — the synchronous reducer channel. Looks up the action's
//!   kind in the reducer, commits the replacement state, then notifies
//!   every subscriber with the post-transition state.
//! - `dispatch_effect` — the effect channel. Hands a state snapshot to the
//!   effect handler, which may start asynchronous work and dispatch
//!   follow-up actions whenever it resolves.
//!
//! ## Scheduling rule
//!
//! Dispatch is synchronous and re-entrant; there is no event queue, no
//! lock, no scheduler, and no cancellation. A subscriber that dispatches
//! re-enters depth-first: the nested transition (including its own
//! notification pass) completes before the outer pass resumes. The design
//! assumes a single-threaded cooperative host; the effect channel is the
//! sole suspension point.
//!
//! ## Example
//!
//! ```ignore
//! use uniflow_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, my_effects, environment);
//!
//! store.subscribe(|state, dispatchers| render(state, dispatchers));
//! store.dispatch(Action::DoSomething);
//! store.dispatch_effect(Action::DoSomething);
//!
//! let value = store.state(|s| s.some_field);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use uniflow_core::{Action, Dispatchers, EffectHandler, Reducer, Subscriber};

/// Single authoritative holder of state and router for both action
/// channels.
///
/// The Store owns:
/// 1. The current state (replaced wholesale per transition)
/// 2. The reducer (pure transition logic)
/// 3. The effect handler and its environment (injected dependencies)
/// 4. The subscriber list (append-only, notified in registration order)
///
/// Cloning a `Store` clones a handle to the same inner cell; all clones
/// observe the same state and subscriber list. The store is deliberately
/// single-threaded (`Rc`/`RefCell`): overlapping dispatch can only happen
/// through the synchronous re-entrance described on [`dispatch`].
///
/// [`dispatch`]: Store::dispatch
///
/// # Type Parameters
///
/// - `R`: Reducer implementation (fixes the state and action types)
/// - `H`: Effect handler implementation over the same state and action
pub struct Store<R, H>
where
    R: Reducer,
    H: EffectHandler<State = R::State, Action = R::Action>,
{
    inner: Rc<StoreInner<R, H>>,
}

struct StoreInner<R, H>
where
    R: Reducer,
    H: EffectHandler<State = R::State, Action = R::Action>,
{
    state: RefCell<R::State>,
    reducer: R,
    effects: H,
    environment: H::Environment,
    subscribers: RefCell<Vec<Rc<Subscriber<R::State, R::Action>>>>,
}

impl<R, H> Store<R, H>
where
    R: Reducer + 'static,
    R::State: 'static,
    R::Action: 'static,
    H: EffectHandler<State = R::State, Action = R::Action> + 'static,
    H::Environment: 'static,
{
    /// Create a new store with initial state, reducer, effect handler, and
    /// environment.
    ///
    /// Both registries are fixed at construction; there is no dynamic
    /// registration. For a feature without effects, pass
    /// [`uniflow_core::NoEffects`] and `()`.
    #[must_use]
    pub fn new(initial_state: R::State, reducer: R, effects: H, environment: H::Environment) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(initial_state),
                reducer,
                effects,
                environment,
                subscribers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Query the current state through a closure, without cloning it.
    ///
    /// No side effects, never fails.
    pub fn state<T>(&self, f: impl FnOnce(&R::State) -> T) -> T {
        f(&self.inner.state.borrow())
    }

    /// Owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> R::State {
        self.inner.state.borrow().clone()
    }

    /// Append a subscriber to the notification list.
    ///
    /// Append-only for the lifetime of the store; there is no unsubscribe.
    /// Insertion order is notification order, and registering the same
    /// callback twice runs it once per registration. A subscriber added
    /// during a notification pass is picked up from the next dispatch
    /// onward.
    pub fn subscribe<F>(&self, subscriber: F)
    where
        F: Fn(&R::State, &Dispatchers<R::Action>) + 'static,
    {
        self.inner.subscribers.borrow_mut().push(Rc::new(subscriber));
    }

    /// Dispatch an action on the reducer channel.
    ///
    /// 1. If the reducer does not route the kind, this is a silent no-op:
    ///    no state change, no notification.
    /// 2. Otherwise the replacement state is committed **after** the
    ///    reducer returns, then every subscriber runs synchronously with
    ///    `(new_state, dispatchers)` in registration order.
    ///
    /// Re-entrant and depth-first: a nested dispatch from a subscriber
    /// fully completes (including its own notification pass) before the
    /// outer pass resumes; the outer pass keeps handing out its own
    /// transition's state.
    ///
    /// # Panics
    ///
    /// A panicking reducer propagates to the caller; the state stays
    /// whatever it was before this dispatch (no partial commit).
    pub fn dispatch(&self, action: R::Action) {
        dispatch_on(&self.inner, action);
    }

    /// Dispatch an action on the effect channel.
    ///
    /// If the effect handler does not route the kind, this is a silent
    /// no-op. Otherwise the handler runs with a snapshot of the current
    /// state and may start asynchronous work; a late completion still
    /// lands its follow-up dispatch whenever it resolves, even if the
    /// state has moved on. Design idempotent reducers accordingly.
    pub fn dispatch_effect(&self, action: R::Action) {
        dispatch_effect_on(&self.inner, action);
    }

    /// Mint a `{dispatch, dispatch_effect}` handle for this store.
    ///
    /// The handle holds a weak reference: once the last `Store` clone is
    /// dropped, dispatching through an outstanding handle is discarded
    /// (logged at trace level) rather than resurrecting the store.
    #[must_use]
    pub fn dispatchers(&self) -> Dispatchers<R::Action> {
        dispatchers_for(&self.inner)
    }
}

impl<R, H> Clone for Store<R, H>
where
    R: Reducer,
    H: EffectHandler<State = R::State, Action = R::Action>,
{
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<R, H> std::fmt::Debug for Store<R, H>
where
    R: Reducer,
    R::State: std::fmt::Debug,
    H: EffectHandler<State = R::State, Action = R::Action>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.inner.state.borrow())
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .finish_non_exhaustive()
    }
}

/// Build a weak-backed dispatch handle for `inner`.
fn dispatchers_for<R, H>(inner: &Rc<StoreInner<R, H>>) -> Dispatchers<R::Action>
where
    R: Reducer + 'static,
    R::State: 'static,
    R::Action: 'static,
    H: EffectHandler<State = R::State, Action = R::Action> + 'static,
    H::Environment: 'static,
{
    let on_dispatch: Weak<StoreInner<R, H>> = Rc::downgrade(inner);
    let on_effect: Weak<StoreInner<R, H>> = Rc::downgrade(inner);

    Dispatchers::new(
        move |action: R::Action| match on_dispatch.upgrade() {
            Some(inner) => dispatch_on(&inner, action),
            None => tracing::trace!(kind = action.kind(), "store dropped; late dispatch discarded"),
        },
        move |action: R::Action| match on_effect.upgrade() {
            Some(inner) => dispatch_effect_on(&inner, action),
            None => tracing::trace!(kind = action.kind(), "store dropped; late effect discarded"),
        },
    )
}

fn dispatch_on<R, H>(inner: &Rc<StoreInner<R, H>>, action: R::Action)
where
    R: Reducer + 'static,
    R::State: 'static,
    R::Action: 'static,
    H: EffectHandler<State = R::State, Action = R::Action> + 'static,
    H::Environment: 'static,
{
    let kind = action.kind();
    let dispatchers = dispatchers_for(inner);

    // The reducer runs against a clone of the current state with no
    // interior borrow held, so a nested dispatch can never observe a state
    // being mutated or hit a borrow conflict.
    let current = inner.state.borrow().clone();
    let Some(next) = inner.reducer.reduce(&current, action, &dispatchers) else {
        tracing::trace!(kind, "no reducer routes this kind; ignoring");
        return;
    };

    // Commit happens only here, after the reducer returned successfully.
    tracing::debug!(kind, "state transition");
    *inner.state.borrow_mut() = next.clone();

    // Snapshot the registrations so nested subscribe calls cannot
    // invalidate the pass. Every subscriber of this pass observes this
    // transition's state, even if a nested dispatch moves current state on.
    let subscribers: Vec<_> = inner.subscribers.borrow().iter().map(Rc::clone).collect();
    tracing::trace!(kind, subscribers = subscribers.len(), "notifying");
    for subscriber in subscribers {
        subscriber(&next, &dispatchers);
    }
}

fn dispatch_effect_on<R, H>(inner: &Rc<StoreInner<R, H>>, action: R::Action)
where
    R: Reducer + 'static,
    R::State: 'static,
    R::Action: 'static,
    H: EffectHandler<State = R::State, Action = R::Action> + 'static,
    H::Environment: 'static,
{
    let kind = action.kind();
    let dispatchers = dispatchers_for(inner);
    let current = inner.state.borrow().clone();

    tracing::debug!(kind, "effect channel");
    inner
        .effects
        .handle(&current, action, &inner.environment, &dispatchers);
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniflow_core::NoEffects;

    #[derive(Clone, Debug, PartialEq)]
    struct CounterState {
        count: i64,
    }

    #[derive(Clone, Debug)]
    enum CounterAction {
        Increment,
        Noise,
    }

    impl Action for CounterAction {
        fn kind(&self) -> &'static str {
            match self {
                Self::Increment => "INCREMENT",
                Self::Noise => "NOISE",
            }
        }
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = CounterState;
        type Action = CounterAction;

        fn reduce(
            &self,
            state: &CounterState,
            action: CounterAction,
            _dispatchers: &Dispatchers<CounterAction>,
        ) -> Option<CounterState> {
            match action {
                CounterAction::Increment => Some(CounterState {
                    count: state.count + 1,
                }),
                CounterAction::Noise => None,
            }
        }
    }

    fn counter_store() -> Store<CounterReducer, NoEffects<CounterState, CounterAction>> {
        Store::new(
            CounterState { count: 0 },
            CounterReducer,
            NoEffects::new(),
            (),
        )
    }

    #[test]
    fn dispatch_replaces_state() {
        let store = counter_store();
        store.dispatch(CounterAction::Increment);
        store.dispatch(CounterAction::Increment);
        assert_eq!(store.state(|s| s.count), 2);
    }

    #[test]
    fn snapshot_is_an_owned_copy() {
        let store = counter_store();
        let before = store.snapshot();
        store.dispatch(CounterAction::Increment);
        assert_eq!(before.count, 0);
        assert_eq!(store.snapshot().count, 1);
    }

    #[test]
    fn unrouted_kind_changes_nothing() {
        let store = counter_store();
        store.dispatch(CounterAction::Noise);
        assert_eq!(store.state(|s| s.count), 0);
    }

    #[test]
    fn clones_share_the_same_state_cell() {
        let store = counter_store();
        let clone = store.clone();
        store.dispatch(CounterAction::Increment);
        assert_eq!(clone.state(|s| s.count), 1);
    }

    #[test]
    fn minted_dispatchers_reach_the_store() {
        let store = counter_store();
        let dispatchers = store.dispatchers();
        dispatchers.dispatch(CounterAction::Increment);
        assert_eq!(store.state(|s| s.count), 1);
    }

    #[test]
    fn late_dispatch_after_drop_is_discarded() {
        let store = counter_store();
        let dispatchers = store.dispatchers();
        drop(store);
        // Must not panic; the action is simply lost.
        dispatchers.dispatch(CounterAction::Increment);
    }
}
