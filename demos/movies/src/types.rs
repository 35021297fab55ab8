//! Domain types for the movie-search feature.
//!
//! `MovieAction` is the tagged union routed by both channels. Its kind
//! strings are a cross-implementation contract and double as the serde tag,
//! so a serialized action carries exactly `{"kind": "...", ...payload}`.

use serde::{Deserialize, Serialize};
use uniflow_core::Action;

/// Action kind strings.
///
/// These must match other implementations of the same feature exactly; they
/// are the routing keys of the design.
pub mod kinds {
    /// Start a search request.
    pub const FETCH_MOVIES_REQUEST: &str = "FETCH_MOVIES_REQUEST";
    /// A search resolved with results.
    pub const FETCH_MOVIES_SUCCESS: &str = "FETCH_MOVIES_SUCCESS";
    /// A search failed.
    pub const FETCH_MOVIES_FAILURE: &str = "FETCH_MOVIES_FAILURE";
    /// Toggle the detail flag of one result.
    pub const SHOW_MOVIE_DESCRIPTION: &str = "SHOW_MOVIE_DESCRIPTION";
}

/// Normalized display record for one search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Movie title.
    pub title: String,
    /// Derived image URL, absent when the upstream record has no poster.
    pub thumbnail: Option<String>,
    /// Average vote, as reported upstream.
    pub rating: f64,
    /// Overview text.
    pub description: String,
    /// Whether the view shows this item's description.
    pub show_description: bool,
}

/// State of the movie-search feature.
///
/// Replaced wholesale on every transition; reducers never patch it in
/// place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviesState {
    /// Current result list.
    pub items: Vec<Movie>,
    /// Whether a request is in flight.
    pub is_fetching_items: bool,
    /// Human-readable error from the last failed request, if any.
    pub error: Option<String>,
}

impl MoviesState {
    /// Derive the lifecycle phase from the state fields.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_fetching_items {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Errored
        } else if self.items.is_empty() {
            Phase::Idle
        } else {
            Phase::Loaded
        }
    }
}

/// Lifecycle phase of the request state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing requested yet.
    Idle,
    /// Request in flight.
    Loading,
    /// Results available; selection is valid from here.
    Loaded,
    /// Last request failed.
    Errored,
}

/// All inputs to the movie-search feature.
///
/// One variant per kind, each carrying exactly its payload; reducers and
/// effect handlers are total functions over this union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum MovieAction {
    /// Start a search for `query`.
    #[serde(rename = "FETCH_MOVIES_REQUEST")]
    FetchMoviesRequest {
        /// Search text. An empty query never fires the network request.
        query: String,
        /// Result page, 1-based.
        page: u32,
    },
    /// The search resolved; replace the result list.
    #[serde(rename = "FETCH_MOVIES_SUCCESS")]
    FetchMoviesSuccess {
        /// Normalized results.
        movies: Vec<Movie>,
    },
    /// The search failed.
    #[serde(rename = "FETCH_MOVIES_FAILURE")]
    FetchMoviesFailure {
        /// Human-readable description of the failure.
        error: String,
    },
    /// Show the description of the item at `index`, hiding all others.
    #[serde(rename = "SHOW_MOVIE_DESCRIPTION")]
    ShowMovieDescription {
        /// Index into the current result list.
        index: usize,
    },
}

impl Action for MovieAction {
    fn kind(&self) -> &'static str {
        match self {
            Self::FetchMoviesRequest { .. } => kinds::FETCH_MOVIES_REQUEST,
            Self::FetchMoviesSuccess { .. } => kinds::FETCH_MOVIES_SUCCESS,
            Self::FetchMoviesFailure { .. } => kinds::FETCH_MOVIES_FAILURE,
            Self::ShowMovieDescription { .. } => kinds::SHOW_MOVIE_DESCRIPTION,
        }
    }
}
