//! Pure state transitions for the movie-search feature.

use crate::types::{Movie, MovieAction, MoviesState};
use uniflow_core::{Dispatchers, Reducer};

/// Reducer for the request lifecycle and the selection transition.
///
/// Routes every kind of [`MovieAction`]; each arm returns a complete
/// replacement state, copying the fields it does not change. The reducer is
/// intentionally idempotent where outcomes can land late: a stale
/// `FETCH_MOVIES_SUCCESS` simply replaces the result list again.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoviesReducer;

impl Reducer for MoviesReducer {
    type State = MoviesState;
    type Action = MovieAction;

    fn reduce(
        &self,
        state: &MoviesState,
        action: MovieAction,
        _dispatchers: &Dispatchers<MovieAction>,
    ) -> Option<MoviesState> {
        match action {
            MovieAction::FetchMoviesRequest { .. } => Some(MoviesState {
                items: state.items.clone(),
                is_fetching_items: true,
                error: None,
            }),

            MovieAction::FetchMoviesSuccess { movies } => Some(MoviesState {
                items: movies,
                is_fetching_items: false,
                error: None,
            }),

            MovieAction::FetchMoviesFailure { error } => Some(MoviesState {
                items: Vec::new(),
                is_fetching_items: false,
                error: Some(error),
            }),

            MovieAction::ShowMovieDescription { index } => Some(MoviesState {
                items: state
                    .items
                    .iter()
                    .enumerate()
                    .map(|(i, movie)| Movie {
                        show_description: i == index,
                        ..movie.clone()
                    })
                    .collect(),
                ..state.clone()
            }),
        }
    }
}
