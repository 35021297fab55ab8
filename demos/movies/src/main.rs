//! Movie search CLI demo.
//!
//! Wires one store to a terminal view subscriber, fires the search on both
//! channels, and waits for the request to settle. Requires `TMDB_API_KEY`
//! in the environment.

use anyhow::Context;
use movies::{
    GatewayConfig, MovieAction, MoviesEffects, MoviesEnvironment, MoviesReducer, MoviesState,
    Phase, TmdbGateway, view,
};
use std::time::Duration;
use uniflow_runtime::Store;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let query: String = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    anyhow::ensure!(!query.is_empty(), "usage: movies <query>");
    let api_key = std::env::var("TMDB_API_KEY").context("TMDB_API_KEY must be set")?;

    // One store, constructed explicitly and handed to the view by
    // subscription rather than through a module-level global.
    let gateway = TmdbGateway::new(GatewayConfig::new(api_key));
    let store = Store::new(
        MoviesState::default(),
        MoviesReducer,
        MoviesEffects::new(),
        MoviesEnvironment::new(gateway),
    );
    store.subscribe(view::render);

    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            store.dispatch(MovieAction::FetchMoviesRequest {
                query: query.clone(),
                page: 1,
            });
            store.dispatch_effect(MovieAction::FetchMoviesRequest { query, page: 1 });

            // The effect channel is the sole suspension point; poll until
            // the request settles.
            while store.state(|s| s.is_fetching_items) {
                tokio::time::sleep(Duration::from_millis(25)).await;
            }

            // Demonstrate the orthogonal selection transition.
            if store.state(|s| s.phase() == Phase::Loaded) {
                store.dispatch(MovieAction::ShowMovieDescription { index: 0 });
            }
        })
        .await;

    Ok(())
}
