//! Effect channel for the movie-search feature.
//!
//! The single effect here is the network call: `FETCH_MOVIES_REQUEST`
//! spawns the gateway search and, on completion, dispatches exactly one of
//! the two outcome actions. Every other kind - and a request with an empty
//! query - is a no-op on this channel.

use crate::gateway::MovieGateway;
use crate::types::{MovieAction, MoviesState};
use std::marker::PhantomData;
use std::rc::Rc;
use uniflow_core::{Dispatchers, EffectHandler};

/// Injected dependencies for the movie effects.
pub struct MoviesEnvironment<G> {
    /// Search gateway, shared with the spawned request task.
    pub gateway: Rc<G>,
}

impl<G> MoviesEnvironment<G> {
    /// Wrap a gateway for injection.
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            gateway: Rc::new(gateway),
        }
    }
}

// Manual Clone: `G` itself does not need to be Clone behind the Rc.
impl<G> Clone for MoviesEnvironment<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Rc::clone(&self.gateway),
        }
    }
}

/// Effect handler for the movie-search feature.
///
/// Generic over the gateway type so tests can inject stubs.
///
/// The spawned request owns its failure handling: a gateway error is
/// converted into `FETCH_MOVIES_FAILURE` carrying the error's display
/// string, so the store never sees an unreported outcome.
///
/// # Panics
///
/// `handle` spawns onto the ambient [`tokio::task::LocalSet`] and panics
/// if called outside one.
#[derive(Debug, Clone, Copy)]
pub struct MoviesEffects<G> {
    _marker: PhantomData<fn() -> G>,
}

impl<G> MoviesEffects<G> {
    /// Create the handler.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<G> Default for MoviesEffects<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: MovieGateway + 'static> EffectHandler for MoviesEffects<G> {
    type State = MoviesState;
    type Action = MovieAction;
    type Environment = MoviesEnvironment<G>;

    fn handle(
        &self,
        _state: &MoviesState,
        action: MovieAction,
        env: &MoviesEnvironment<G>,
        dispatchers: &Dispatchers<MovieAction>,
    ) {
        match action {
            MovieAction::FetchMoviesRequest { query, page } if !query.is_empty() => {
                let gateway = Rc::clone(&env.gateway);
                let dispatchers = dispatchers.clone();

                tokio::task::spawn_local(async move {
                    match gateway.search(query, page).await {
                        Ok(movies) => {
                            dispatchers.dispatch(MovieAction::FetchMoviesSuccess { movies });
                        },
                        Err(err) => {
                            tracing::warn!(error = %err, "movie search failed");
                            dispatchers.dispatch(MovieAction::FetchMoviesFailure {
                                error: err.to_string(),
                            });
                        },
                    }
                });
            },

            // An empty query is silently dropped; outcomes and selection
            // have no effect-channel behavior.
            _ => {},
        }
    }
}
