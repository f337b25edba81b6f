//! Places API client: request construction, transport and outcome conversion.

use std::future::Future;

use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};

use super::error::SearchError;
use super::response::{Endpoint, parse_error_message, parse_places};
use crate::state::{Coordinate, PlaceResult, SearchMode, SearchOutcome};
use crate::theme::{ApiKey, Settings};

/// Query parameters of one request, per endpoint variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaceQuery {
    /// Proximity browse within `radius_m` meters, at most `limit` results.
    Nearby {
        /// Search radius in meters.
        radius_m: u32,
        /// Maximum number of results.
        limit: u32,
    },
    /// Free-text query sorted by distance; `None` searches everything around.
    Text {
        /// Trimmed, non-empty query text.
        query: Option<String>,
    },
}

impl PlaceQuery {
    const fn endpoint(&self) -> Endpoint {
        match self {
            Self::Nearby { .. } => Endpoint::Nearby,
            Self::Text { .. } => Endpoint::Search,
        }
    }
}

/// What: Anything that can turn a center and optional query into a [`SearchOutcome`].
///
/// Details:
/// - Implementations never fail: every error is folded into [`SearchOutcome::Failed`].
pub trait PlaceSearch {
    /// Search around `coordinate`, optionally narrowed by `query`.
    fn search(
        &self,
        coordinate: Coordinate,
        query: Option<&str>,
    ) -> impl Future<Output = SearchOutcome> + Send;
}

/// HTTP client for the places endpoints.
#[derive(Clone, Debug)]
pub struct PlaceSearchClient {
    http: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
    mode: SearchMode,
    radius_m: u32,
    limit: u32,
}

impl PlaceSearchClient {
    /// What: Build a client from settings.
    ///
    /// Inputs:
    /// - `settings`: Loaded settings (base URL, key, mode, radius, limit).
    ///
    /// Output:
    /// - `Ok(PlaceSearchClient)`; `Err(SearchError::Client)` if the HTTP client cannot be built.
    ///
    /// # Errors
    /// - Returns `Err` when the TLS backend or default headers cannot be initialized.
    ///
    /// Details:
    /// - No request timeout is set; the transport's own behavior applies.
    /// - A missing API key is accepted here and reported on each search instead.
    pub fn new(settings: &Settings) -> Result<Self, SearchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut builder = reqwest::Client::builder()
            .user_agent(format!("nearby/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);
        if is_loopback(&settings.places_base_url) {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| SearchError::Client(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: settings.places_base_url.trim_end_matches('/').to_string(),
            api_key: settings.places_api_key.clone(),
            mode: settings.search_mode,
            radius_m: settings.search_radius_m,
            limit: settings.search_limit,
        })
    }

    /// Endpoint variant this client uses.
    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        self.mode
    }

    /// What: Choose the endpoint variant and parameters for a search.
    ///
    /// Inputs:
    /// - `query`: Raw query text, if the caller collected any.
    ///
    /// Output:
    /// - `PlaceQuery::Nearby` in nearby mode (query ignored), `PlaceQuery::Text` otherwise.
    #[must_use]
    pub fn build_query(&self, query: Option<&str>) -> PlaceQuery {
        match self.mode {
            SearchMode::Nearby => PlaceQuery::Nearby {
                radius_m: self.radius_m,
                limit: self.limit,
            },
            SearchMode::Text => PlaceQuery::Text {
                query: query
                    .map(str::trim)
                    .filter(|q| !q.is_empty())
                    .map(str::to_string),
            },
        }
    }

    /// What: Build the full request URL for a search.
    ///
    /// Inputs:
    /// - `coordinate`: Search center.
    /// - `query`: Endpoint variant and its parameters.
    ///
    /// Output:
    /// - Absolute URL with encoded query parameters.
    ///
    /// # Errors
    /// - Returns `Err(SearchError::Client)` when the configured base URL is not a valid URL.
    pub fn request_url(&self, coordinate: Coordinate, query: &PlaceQuery) -> Result<Url, SearchError> {
        let ll = coordinate.to_ll_param();
        let (path, params): (&str, Vec<(&str, String)>) = match query {
            PlaceQuery::Nearby { radius_m, limit } => (
                "nearby",
                vec![
                    ("ll", ll),
                    ("radius", radius_m.to_string()),
                    ("limit", limit.to_string()),
                ],
            ),
            PlaceQuery::Text { query } => {
                let mut params = vec![("ll", ll)];
                if let Some(q) = query {
                    params.push(("query", q.clone()));
                }
                params.push(("sort", "DISTANCE".to_string()));
                ("search", params)
            }
        };
        Url::parse_with_params(&format!("{}/{path}", self.base_url), &params)
            .map_err(|e| SearchError::Client(format!("invalid places URL {}: {e}", self.base_url)))
    }

    /// What: Run one search and return normalized places.
    ///
    /// Inputs:
    /// - `coordinate`: Search center.
    /// - `query`: Optional free text (used in text mode only).
    ///
    /// Output:
    /// - `Ok(Vec<PlaceResult>)` in API order.
    ///
    /// # Errors
    /// - `MissingApiKey` when no key is configured (nothing is sent).
    /// - `Api` on non-2xx status, with the server message when parseable.
    /// - `Network` on transport failures, `Decode` on non-JSON bodies.
    pub async fn try_search(
        &self,
        coordinate: Coordinate,
        query: Option<&str>,
    ) -> Result<Vec<PlaceResult>, SearchError> {
        if self.api_key.is_empty() {
            return Err(SearchError::MissingApiKey);
        }
        let place_query = self.build_query(query);
        let url = self.request_url(coordinate, &place_query)?;
        tracing::debug!(endpoint = ?place_query.endpoint(), %url, "places request");

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.api_key.header_value()?)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: body.as_deref().and_then(parse_error_message),
            });
        }
        let body = response.text().await?;
        Ok(parse_places(place_query.endpoint(), &body)?)
    }
}

/// Whether `base_url` points at this machine; such endpoints never go through a proxy.
fn is_loopback(base_url: &str) -> bool {
    Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        .is_some_and(|h| matches!(h.as_str(), "localhost" | "127.0.0.1" | "[::1]"))
}

impl PlaceSearch for PlaceSearchClient {
    async fn search(&self, coordinate: Coordinate, query: Option<&str>) -> SearchOutcome {
        match self.try_search(coordinate, query).await {
            Ok(places) => {
                tracing::info!(count = places.len(), "place search finished");
                SearchOutcome::Found(places)
            }
            Err(err) => {
                tracing::error!(error = %err, "error occurred during place search");
                SearchOutcome::Failed(err.to_string())
            }
        }
    }
}
