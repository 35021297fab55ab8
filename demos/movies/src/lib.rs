//! # Movie Search Example
//!
//! A movie-search feature demonstrating the Uniflow architecture.
//!
//! This example showcases the full pattern the core is designed for:
//!
//! - A request lifecycle `REQUEST → (SUCCESS | FAILURE)` driven through the
//!   two channels: the reducer flips the loading flag, the effect handler
//!   performs the network call and dispatches exactly one outcome action
//! - An orthogonal `SELECT` transition toggling a per-item detail flag
//! - A view layer that is nothing but a subscriber `(state, dispatchers)`
//! - An injected gateway capability, swapped for a stub in tests
//!
//! ## Phases
//!
//! The state moves through `idle → loading → (loaded | errored)`;
//! selection is meaningful only once loaded.
//!
//! ## Example
//!
//! ```ignore
//! use movies::{GatewayConfig, MovieAction, MoviesEffects, MoviesEnvironment,
//!              MoviesReducer, MoviesState, TmdbGateway};
//! use uniflow_runtime::Store;
//!
//! let gateway = TmdbGateway::new(GatewayConfig::new(api_key));
//! let store = Store::new(
//!     MoviesState::default(),
//!     MoviesReducer,
//!     MoviesEffects::new(),
//!     MoviesEnvironment::new(gateway),
//! );
//!
//! store.subscribe(movies::view::render);
//! store.dispatch(MovieAction::FetchMoviesRequest { query: "dune".into(), page: 1 });
//! store.dispatch_effect(MovieAction::FetchMoviesRequest { query: "dune".into(), page: 1 });
//! ```

/// Domain types: state, actions, display records
pub mod types;

/// Pure state transitions for the movie feature
pub mod reducer;

/// HTTP boundary: the search gateway and its error taxonomy
pub mod gateway;

/// Effect channel: the network call and its outcome actions
pub mod effects;

/// Terminal view subscriber
pub mod view;

pub use effects::{MoviesEffects, MoviesEnvironment};
pub use gateway::{GatewayConfig, GatewayError, MovieGateway, TmdbGateway};
pub use reducer::MoviesReducer;
pub use types::{Movie, MovieAction, MoviesState, Phase};
