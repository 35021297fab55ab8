//! # Uniflow Core
//!
//! Core contracts for the Uniflow unidirectional state-management
//! architecture.
//!
//! This crate defines the vocabulary shared by the store runtime, the
//! testing utilities, and every feature built on top of them:
//!
//! - **Action**: an immutable, data-only description of an intent, tagged
//!   by kind
//! - **Reducer**: pure function `(State, Action, Dispatchers) → Option<State>`
//! - **Effect handler**: `(State, Action, Environment, Dispatchers) → ()`,
//!   free to start asynchronous work and dispatch follow-up actions
//! - **Dispatchers**: the `{dispatch, dispatch_effect}` capability pair
//!   threaded through reducers, effect handlers, and subscribers
//! - **Subscriber**: callback notified after every completed state
//!   transition
//!
//! ## Architecture Principles
//!
//! - Unidirectional Data Flow
//! - Two independent action channels: pure transitions vs. side effects
//! - State is replaced wholesale per transition, never mutated in place
//! - Unknown action kinds are silent no-ops on both channels
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use uniflow_core::{Action, Dispatchers, Reducer};
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! impl Action for CounterAction {
//!     fn kind(&self) -> &'static str {
//!         match self {
//!             Self::Increment => "INCREMENT",
//!         }
//!     }
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = i64;
//!     type Action = CounterAction;
//!
//!     fn reduce(
//!         &self,
//!         state: &i64,
//!         action: CounterAction,
//!         _dispatchers: &Dispatchers<CounterAction>,
//!     ) -> Option<i64> {
//!         match action {
//!             CounterAction::Increment => Some(state + 1),
//!         }
//!     }
//! }
//! ```

/// Action module - the tagged, data-only input type for both channels
///
/// Actions represent every possible input to the system. Concrete action
/// types are enums: one variant per kind, each variant carrying exactly the
/// payload fields that kind needs, so reducers and effect handlers are
/// total functions over the union.
pub mod action {
    /// An immutable descriptor of an intended state change or effect.
    ///
    /// The kind string is the sole routing key of the design: it names the
    /// action in logs and on the wire, and it is what a reducer or effect
    /// handler matches on (via the enum tag) to decide whether the action
    /// is routed or silently ignored.
    pub trait Action {
        /// Stable kind tag for this action.
        ///
        /// Kind strings are part of the cross-implementation contract and
        /// must not change between releases.
        fn kind(&self) -> &'static str;
    }
}

/// Dispatcher module - the capability pair for nested dispatch
///
/// Reducers, effect handlers, and subscribers all receive a
/// [`Dispatchers`] handle instead of the store itself, so nested dispatch
/// is possible without closing over the store instance directly.
pub mod dispatcher {
    use std::rc::Rc;

    /// The `{dispatch, dispatch_effect}` capability pair.
    ///
    /// `dispatch` enters the synchronous reducer channel; `dispatch_effect`
    /// enters the effect channel. The handle is cheaply cloneable and
    /// single-threaded (`Rc`-backed) by design: the store assumes a
    /// cooperative host where overlapping dispatch can only occur through
    /// synchronous re-entrance.
    ///
    /// Handles minted by a store hold a weak reference to it; a dispatch
    /// through a handle that outlived its store is discarded.
    ///
    /// # Example
    ///
    /// ```
    /// use uniflow_core::Dispatchers;
    ///
    /// // An inert handle, useful in tests.
    /// let dispatchers: Dispatchers<u32> = Dispatchers::new(|_| {}, |_| {});
    /// dispatchers.dispatch(1);
    /// dispatchers.dispatch_effect(2);
    /// ```
    pub struct Dispatchers<A> {
        dispatch: Rc<dyn Fn(A)>,
        dispatch_effect: Rc<dyn Fn(A)>,
    }

    impl<A> Dispatchers<A> {
        /// Build a handle from the two channel entry points.
        pub fn new(
            dispatch: impl Fn(A) + 'static,
            dispatch_effect: impl Fn(A) + 'static,
        ) -> Self {
            Self {
                dispatch: Rc::new(dispatch),
                dispatch_effect: Rc::new(dispatch_effect),
            }
        }

        /// Enter the synchronous reducer channel.
        ///
        /// Re-entrant and depth-first: if called from inside a subscriber
        /// notification, the nested transition (including its own
        /// notification pass) completes before control returns.
        pub fn dispatch(&self, action: A) {
            (self.dispatch)(action);
        }

        /// Enter the effect channel.
        ///
        /// The routed effect handler may start asynchronous work; the store
        /// places no ordering guarantee on when a follow-up action from
        /// that work lands relative to other activity.
        pub fn dispatch_effect(&self, action: A) {
            (self.dispatch_effect)(action);
        }
    }

    // Manual Clone: `A` itself does not need to be Clone to share the handle.
    impl<A> Clone for Dispatchers<A> {
        fn clone(&self) -> Self {
            Self {
                dispatch: Rc::clone(&self.dispatch),
                dispatch_effect: Rc::clone(&self.dispatch_effect),
            }
        }
    }

    impl<A> std::fmt::Debug for Dispatchers<A> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Dispatchers").finish_non_exhaustive()
        }
    }
}

/// Reducer module - the pure state-transition contract
///
/// Reducers contain all transition logic. They are deterministic, total
/// over the kinds they route, and side-effect free.
pub mod reducer {
    use crate::action::Action;
    use crate::dispatcher::Dispatchers;

    /// Pure function computing the next state from the current state and
    /// an action.
    ///
    /// # Contract
    ///
    /// - Reads `state` by reference and returns a **complete replacement**
    ///   state, never a partial patch. Callers merge defaults explicitly
    ///   (copy existing fields, override named ones).
    /// - Returns `None` for an unrouted kind. The store treats that as a
    ///   silent no-op: no state change, no subscriber notification. Make
    ///   this the explicit default branch of the `match`, not an accident.
    /// - Must be synchronous. `dispatchers` is provided only so it can be
    ///   threaded onward to nested calls; a reducer does not invoke it
    ///   itself (convention, not enforced).
    /// - A panic propagates to the dispatch caller and the store commits
    ///   nothing.
    pub trait Reducer {
        /// The state this reducer transitions. Cloned once per dispatch so
        /// the reducer never observes a state being concurrently mutated.
        type State: Clone;
        /// The action union this reducer routes.
        type Action: Action;

        /// Compute the replacement state, or `None` when the kind is not
        /// routed here.
        fn reduce(
            &self,
            state: &Self::State,
            action: Self::Action,
            dispatchers: &Dispatchers<Self::Action>,
        ) -> Option<Self::State>;
    }
}

/// Effect module - the side-effecting contract
///
/// Effect handlers perform external work (network, timers, ...) in
/// response to an action. They never produce a state themselves; any state
/// change flows back through `dispatch` as a follow-up action.
pub mod effect {
    use crate::action::Action;
    use crate::dispatcher::Dispatchers;
    use std::marker::PhantomData;

    /// Handler for the effect channel.
    ///
    /// # Contract
    ///
    /// - Receives a snapshot of the current state and must not attempt to
    ///   mutate it; outcomes are dispatched as actions.
    /// - Unknown kinds are a no-op (default branch).
    /// - May suspend (spawn asynchronous work). The handler owns its own
    ///   failures: an asynchronous error must be caught inside the effect
    ///   and converted into a follow-up failure action. An uncaught
    ///   asynchronous error is lost to the store - the runtime does not
    ///   repair it.
    pub trait EffectHandler {
        /// State snapshot type handed to the handler.
        type State;
        /// The action union this handler routes.
        type Action: Action;
        /// Injected dependencies (HTTP clients, clocks, ...).
        type Environment;

        /// Run the effect for `action`, if one is registered for its kind.
        fn handle(
            &self,
            state: &Self::State,
            action: Self::Action,
            env: &Self::Environment,
            dispatchers: &Dispatchers<Self::Action>,
        );
    }

    /// Effect handler that routes nothing.
    ///
    /// For features that are pure state machines: every `dispatch_effect`
    /// is a no-op, matching the "unknown kind ⇒ no-op" contract for the
    /// whole action union.
    #[derive(Debug)]
    pub struct NoEffects<S, A> {
        _marker: PhantomData<fn() -> (S, A)>,
    }

    impl<S, A> NoEffects<S, A> {
        /// Create the null handler.
        #[must_use]
        pub const fn new() -> Self {
            Self {
                _marker: PhantomData,
            }
        }
    }

    impl<S, A> Default for NoEffects<S, A> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<S, A: Action> EffectHandler for NoEffects<S, A> {
        type State = S;
        type Action = A;
        type Environment = ();

        fn handle(&self, _state: &S, _action: A, _env: &(), _dispatchers: &Dispatchers<A>) {}
    }
}

/// Subscriber module - post-transition observation
pub mod subscriber {
    use crate::dispatcher::Dispatchers;

    /// Callback invoked after every completed state transition.
    ///
    /// Receives the post-transition state and a dispatch handle, so a
    /// subscriber (typically the view layer) can render and trigger
    /// follow-up actions. Subscribers registered more than once run once
    /// per registration.
    pub type Subscriber<S, A> = dyn Fn(&S, &Dispatchers<A>);
}

// Re-export commonly used items
pub use action::Action;
pub use dispatcher::Dispatchers;
pub use effect::{EffectHandler, NoEffects};
pub use reducer::Reducer;
pub use subscriber::Subscriber;
