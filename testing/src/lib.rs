//! # Uniflow Testing
//!
//! Testing utilities and helpers for the Uniflow architecture.
//!
//! This crate provides:
//! - [`ReducerTest`]: a fluent Given-When-Then harness for pure reducers
//! - [`mocks`]: recording subscribers and inert dispatch handles
//! - [`harness`]: a current-thread local-task executor and a polling
//!   helper for tests that exercise asynchronous effects
//!
//! ## Example
//!
//! ```ignore
//! use uniflow_testing::{ReducerTest, mocks::RecordingSubscriber};
//!
//! ReducerTest::new(MoviesReducer)
//!     .given_state(MoviesState::default())
//!     .when_action(MovieAction::FetchMoviesRequest { query: "dune".into(), page: 1 })
//!     .then_state(|state| {
//!         assert!(state.is_fetching_items);
//!     })
//!     .run();
//! ```


pub use reducer_test::ReducerTest;

/// Mock implementations and inert handles for tests
pub mod mocks {
    use std::cell::RefCell;
    use std::rc::Rc;
    use uniflow_core::Dispatchers;

    /// Dispatch handle that routes both channels to nowhere.
    ///
    /// For exercising reducers and effect handlers in isolation, where a
    /// nested dispatch should simply be swallowed.
    #[must_use]
    pub fn noop_dispatchers<A: 'static>() -> Dispatchers<A> {
        Dispatchers::new(|_| {}, |_| {})
    }

    /// Subscriber that records every post-transition state it observes.
    ///
    /// Cloning the recorder shares the underlying log, so one half can be
    /// turned into a store subscriber while the other half stays in the
    /// test for assertions.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let recorder = RecordingSubscriber::new();
    /// store.subscribe(recorder.callback());
    ///
    /// store.dispatch(CounterAction::Increment);
    ///
    /// assert_eq!(recorder.len(), 1);
    /// assert_eq!(recorder.last().map(|s| s.count), Some(1));
    /// ```
    #[derive(Debug)]
    pub struct RecordingSubscriber<S> {
        states: Rc<RefCell<Vec<S>>>,
    }

    impl<S: Clone + 'static> RecordingSubscriber<S> {
        /// Create a recorder with an empty log.
        #[must_use]
        pub fn new() -> Self {
            Self {
                states: Rc::new(RefCell::new(Vec::new())),
            }
        }

        /// Produce the subscriber callback that feeds this recorder.
        #[must_use]
        pub fn callback<A>(&self) -> impl Fn(&S, &Dispatchers<A>) + 'static {
            let states = Rc::clone(&self.states);
            move |state, _dispatchers| states.borrow_mut().push(state.clone())
        }

        /// Every state observed so far, in notification order.
        #[must_use]
        pub fn states(&self) -> Vec<S> {
            self.states.borrow().clone()
        }

        /// Number of notifications observed.
        #[must_use]
        pub fn len(&self) -> usize {
            self.states.borrow().len()
        }

        /// Whether no notification has been observed yet.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.states.borrow().is_empty()
        }

        /// The most recently observed state.
        #[must_use]
        pub fn last(&self) -> Option<S> {
            self.states.borrow().last().cloned()
        }
    }

    impl<S: Clone + 'static> Default for RecordingSubscriber<S> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<S> Clone for RecordingSubscriber<S> {
        fn clone(&self) -> Self {
            Self {
                states: Rc::clone(&self.states),
            }
        }
    }
}

/// Execution helpers for effect-driven tests
///
/// Effect handlers spawn their asynchronous work on the ambient
/// [`tokio::task::LocalSet`]; these helpers provide that ambient set on a
/// fresh current-thread runtime so plain `#[test]` functions can drive the
/// whole request lifecycle.
pub mod harness {
    use std::future::Future;
    use std::time::Duration;

    /// Run `future` to completion on a current-thread runtime inside a
    /// `LocalSet`.
    ///
    /// Tasks spawned with `tokio::task::spawn_local` from inside `future`
    /// (e.g. by effect handlers) are polled while `future` is awaited.
    ///
    /// # Panics
    ///
    /// Panics if the runtime cannot be built, which should never happen in
    /// practice.
    #[allow(clippy::expect_used)]
    pub fn run_local<F: Future>(future: F) -> F::Output {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("current-thread runtime should always build");
        let local = tokio::task::LocalSet::new();
        rt.block_on(local.run_until(future))
    }

    /// Poll `condition` until it holds, panicking after `timeout`.
    ///
    /// # Panics
    ///
    /// Panics if the condition does not hold within `timeout`.
    #[allow(clippy::panic)]
    pub async fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) {
        let deadline = tokio::time::Instant::now() + timeout;
        while !condition() {
            assert!(
                tokio::time::Instant::now() < deadline,
                "condition not met within {timeout:?}"
            );
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }
}
