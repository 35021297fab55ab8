//! Terminal view for the movie-search feature.
//!
//! The view layer is nothing but a subscriber: it consumes
//! `(state, dispatchers)` after every transition and draws the whole
//! screen from scratch. It holds no state of its own.

use crate::types::{MovieAction, MoviesState, Phase};
use uniflow_core::Dispatchers;

/// Render the state into a displayable string.
#[must_use]
pub fn render_to_string(state: &MoviesState) -> String {
    match state.phase() {
        Phase::Idle => "No results yet. Search for a movie.".to_string(),
        Phase::Loading => "Searching...".to_string(),
        Phase::Errored => format!(
            "Error: {}",
            state.error.as_deref().unwrap_or("Unknown error")
        ),
        Phase::Loaded => {
            let mut out = String::new();
            for (index, movie) in state.items.iter().enumerate() {
                out.push_str(&format!("{index:>3}. [{:.1}] {}\n", movie.rating, movie.title));
                if movie.show_description {
                    out.push_str(&format!("     {}\n", movie.description));
                }
            }
            out
        },
    }
}

/// Subscriber entry point: print the rendered state.
///
/// The dispatch handle is part of the subscriber signature so an
/// interactive view can trigger follow-up actions (e.g. selection); this
/// plain renderer does not use it.
pub fn render(state: &MoviesState, _dispatchers: &Dispatchers<MovieAction>) {
    println!("{}", render_to_string(state));
}
