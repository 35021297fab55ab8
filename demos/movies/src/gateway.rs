//! HTTP boundary for the movie search.
//!
//! The effect channel talks to the outside world through the
//! [`MovieGateway`] capability; production uses [`TmdbGateway`], tests
//! inject stubs. Whatever goes wrong on the wire is normalized into a
//! single [`GatewayError`] whose `Display` output becomes the failure
//! action's error string.

use crate::types::Movie;
use serde::Deserialize;
use thiserror::Error;

/// Errors from the search boundary.
///
/// Every variant renders to a human-readable message; the effect handler
/// forwards that message verbatim in `FETCH_MOVIES_FAILURE`.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The server answered with a non-2xx status.
    ///
    /// Displays the server's `status_message` when it sent one, otherwise
    /// the fallback literal `"Unknown error"`.
    #[error("{}", message.as_deref().unwrap_or("Unknown error"))]
    Api {
        /// Message extracted from the error body, if any.
        message: Option<String>,
    },

    /// Transport failure or undecodable JSON body.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Capability for issuing a movie search.
///
/// Deliberately not `Send`: the effect channel runs on a single-threaded
/// cooperative host, so implementations may hold `Rc`s and other local
/// state.
#[allow(async_fn_in_trait)]
pub trait MovieGateway {
    /// Search for movies matching `query` on the given 1-based `page`.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] for non-2xx responses, transport
    /// failures, and undecodable bodies.
    async fn search(&self, query: String, page: u32) -> Result<Vec<Movie>, GatewayError>;
}

/// Configuration for the TMDB-backed gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// API base URL.
    pub base_url: String,
    /// Prefix for derived poster thumbnail URLs.
    pub image_base_url: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Result language.
    pub language: String,
    /// Whether adult titles are included.
    pub include_adult: bool,
}

impl GatewayConfig {
    /// Configuration with production defaults for the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            api_key: api_key.into(),
            language: "en-US".to_string(),
            include_adult: false,
        }
    }

    /// Override the API base URL (e.g. for a local test server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the thumbnail URL prefix.
    #[must_use]
    pub fn with_image_base_url(mut self, image_base_url: impl Into<String>) -> Self {
        self.image_base_url = image_base_url.into();
        self
    }

    /// Override the result language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Production gateway against the TMDB search endpoint.
#[derive(Debug, Clone)]
pub struct TmdbGateway {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl TmdbGateway {
    /// Create a gateway with a fresh HTTP client.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

/// Wire shape of a successful search response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<MovieRecord>,
}

/// Wire shape of one upstream result. Only the fields the display record
/// needs; everything else in the payload is ignored.
#[derive(Debug, Deserialize)]
struct MovieRecord {
    #[serde(default)]
    title: String,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    overview: String,
}

impl MovieRecord {
    fn into_movie(self, image_base_url: &str) -> Movie {
        Movie {
            title: self.title,
            thumbnail: self.poster_path.map(|path| format!("{image_base_url}{path}")),
            rating: self.vote_average,
            description: self.overview,
            show_description: false,
        }
    }
}

/// Wire shape of an upstream error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    status_message: Option<String>,
}

impl MovieGateway for TmdbGateway {
    async fn search(&self, query: String, page: u32) -> Result<Vec<Movie>, GatewayError> {
        let url = format!("{}/search/movie", self.config.base_url);
        let page_param = page.to_string();

        tracing::debug!(%query, page, "issuing movie search");
        let response = self
            .http
            .get(&url)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("language", self.config.language.as_str()),
                ("query", query.as_str()),
                ("page", page_param.as_str()),
                ("include_adult", if self.config.include_adult { "true" } else { "false" }),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.status_message);
            tracing::warn!(%status, "movie search rejected");
            return Err(GatewayError::Api { message });
        }

        let body: SearchResponse = response.json().await?;
        Ok(body
            .results
            .into_iter()
            .map(|record| record.into_movie(&self.config.image_base_url))
            .collect())
    }
}
