//! Catalog client over the store's HTTP endpoints.

use std::fmt::Debug;
use std::str::FromStr;
use std::time::Duration;

use enum_dispatch::enum_dispatch;
use reqwest::header::{self, HeaderMap};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;
use crate::error::{reject_error_response, response_detail, AuthError, CatalogClientError};
use crate::mock::MockClient;
use crate::types::*;

/// The complete catalog service interface.
///
/// This trait enables alternate implementations:
/// - **HTTP**: REST calls to the catalog service via [`CatalogClient`]
/// - **Mock**: canned responses without HTTP via [`MockClient`]
#[enum_dispatch]
#[allow(async_fn_in_trait)]
pub trait ClientTrait {
    /// Fetch products, browsing or searching depending on the query.
    async fn fetch_products(
        &self,
        params: &ProductQuery,
    ) -> Result<Vec<Product>, CatalogClientError>;

    /// Fetch prefix completions for a partially typed query.
    async fn autocomplete(
        &self,
        prefix: impl AsRef<str> + Send + Sync,
    ) -> Result<Vec<String>, CatalogClientError>;

    /// Check whether a searched term is part of the catalog vocabulary.
    async fn spellcheck(
        &self,
        word: impl AsRef<str> + Send + Sync,
    ) -> Result<SpellcheckVerdict, CatalogClientError>;

    /// Fetch the most frequently searched terms.
    async fn top_searches(&self) -> Result<Vec<TopSearch>, CatalogClientError>;

    /// Fetch the known brand vocabulary.
    async fn brands(&self) -> Result<Vec<String>, CatalogClientError>;

    /// Fetch the known toothbrush type vocabulary.
    async fn toothbrush_types(&self) -> Result<Vec<String>, CatalogClientError>;

    /// Log in with existing credentials.
    async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, AuthError>;

    /// Register a new account.
    async fn register(&self, request: &RegisterRequest) -> Result<ServerMessage, AuthError>;
}

/// Either a client for the actual catalog service,
/// or a mock client for testing.
#[derive(Debug)]
#[enum_dispatch(ClientTrait)]
pub enum Client {
    Catalog(CatalogClient),
    Mock(MockClient),
}

/// A client for the catalog service.
///
/// Wraps a [reqwest::Client] configured with timeouts and default headers.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    config: CatalogConfig,
}

impl Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client from configuration.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogClientError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|source| CatalogClientError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            })?;
        let http = build_http_client(&config)?;
        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    /// Get the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, CatalogClientError> {
        let response = self
            .http
            .get(self.endpoint(path))
            .query(params)
            .send()
            .await
            .map_err(CatalogClientError::Request)?;
        let response = reject_error_response(response).await?;
        response.json().await.map_err(CatalogClientError::Deserialize)
    }
}

// ---------------------------------------------------------------------------
// ClientTrait implementation for CatalogClient
// ---------------------------------------------------------------------------

impl ClientTrait for CatalogClient {
    #[instrument(skip_all, fields(endpoint = params.endpoint()))]
    async fn fetch_products(
        &self,
        params: &ProductQuery,
    ) -> Result<Vec<Product>, CatalogClientError> {
        debug!(
            query = params.query.as_deref(),
            sort = %params.sort,
            brands = params.brands.as_deref(),
            types = params.types.as_deref(),
            "fetching products"
        );
        let products: Vec<Product> = self.get_json(params.endpoint(), &params.params()).await?;
        debug!(n_products = products.len(), "received products");
        Ok(products)
    }

    #[instrument(skip_all, fields(prefix = %prefix.as_ref()))]
    async fn autocomplete(
        &self,
        prefix: impl AsRef<str> + Send + Sync,
    ) -> Result<Vec<String>, CatalogClientError> {
        self.get_json("autocomplete", &[("prefix", prefix.as_ref())])
            .await
    }

    #[instrument(skip_all, fields(word = %word.as_ref()))]
    async fn spellcheck(
        &self,
        word: impl AsRef<str> + Send + Sync,
    ) -> Result<SpellcheckVerdict, CatalogClientError> {
        self.get_json("spellcheck", &[("word", word.as_ref())]).await
    }

    #[instrument(skip_all)]
    async fn top_searches(&self) -> Result<Vec<TopSearch>, CatalogClientError> {
        self.get_json("top-searches", &[]).await
    }

    #[instrument(skip_all)]
    async fn brands(&self) -> Result<Vec<String>, CatalogClientError> {
        self.get_json("brands", &[]).await
    }

    #[instrument(skip_all)]
    async fn toothbrush_types(&self) -> Result<Vec<String>, CatalogClientError> {
        self.get_json("types", &[]).await
    }

    #[instrument(skip_all, fields(username = %request.username))]
    async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, AuthError> {
        let response = self
            .http
            .post(self.endpoint("auth/login"))
            .json(request)
            .send()
            .await
            .map_err(CatalogClientError::Request)?;
        let status = response.status();
        if status.is_client_error() {
            let message = response_detail(response).await;
            return Err(AuthError::Rejected { status, message });
        }
        let response = reject_error_response(response).await?;
        let outcome = response
            .json()
            .await
            .map_err(CatalogClientError::Deserialize)?;
        Ok(outcome)
    }

    #[instrument(skip_all, fields(username = %request.username))]
    async fn register(&self, request: &RegisterRequest) -> Result<ServerMessage, AuthError> {
        let response = self
            .http
            .post(self.endpoint("auth/register"))
            .json(request)
            .send()
            .await
            .map_err(CatalogClientError::Request)?;
        let status = response.status();
        if status.is_client_error() {
            let message = response_detail(response).await;
            return Err(AuthError::Rejected { status, message });
        }
        let response = reject_error_response(response).await?;
        let message = response
            .json()
            .await
            .map_err(CatalogClientError::Deserialize)?;
        Ok(message)
    }
}

// ---------------------------------------------------------------------------
// HTTP client builder
// ---------------------------------------------------------------------------

/// Build an HTTP client with timeouts and the configured default headers.
fn build_http_client(config: &CatalogConfig) -> Result<reqwest::Client, CatalogClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );

    for (key, value) in &config.extra_headers {
        headers.insert(
            header::HeaderName::from_str(key).map_err(
                |e: reqwest::header::InvalidHeaderName| CatalogClientError::Other(e.to_string()),
            )?,
            header::HeaderValue::from_str(value).map_err(
                |e: reqwest::header::InvalidHeaderValue| CatalogClientError::Other(e.to_string()),
            )?,
        );
    }

    debug!(
        base_url = %config.base_url,
        extra_headers = config.extra_headers.len(),
        "building catalog HTTP client"
    );

    let client_builder = reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(15))
        .timeout(Duration::from_secs(60));

    let client_builder = if let Some(ref user_agent) = config.user_agent {
        client_builder.user_agent(user_agent.clone())
    } else {
        client_builder
    };

    client_builder
        .build()
        .map_err(|e| CatalogClientError::Other(e.to_string()))
}
