//! Wire types for the catalog service.

use serde::{Deserialize, Serialize};

/// Sort parameter sent when no sort directive is active.
pub const DEFAULT_SORT: &str = "default";

/// A single catalog product.
///
/// Fields mirror the scraped listing data verbatim, which is why
/// numeric-looking values like `price` and `rating` stay strings on the
/// wire. The trailing facet fields are absent for listings that were
/// scraped before facet extraction existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub brand: String,
    pub price: String,
    pub rating: String,
    pub review_count: String,
    pub description: String,
    pub image_url: String,
    pub product_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toothbrush_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_life: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waterproof_rating: Option<String>,
}

/// One entry of the top-searches side panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopSearch {
    pub term: String,
    pub count: u64,
}

/// Verdict from the spelling endpoint.
///
/// The service only includes `suggestions` in the payload when `exists`
/// is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellcheckVerdict {
    pub exists: bool,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Payload for `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Successful login response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginOutcome {
    pub message: String,
    pub username: String,
}

/// Bare `{"message": ...}` payload used by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessage {
    pub message: String,
}

/// Query parameters for a product fetch.
///
/// A `query` of `None` selects the browse endpoint, `Some` the search
/// endpoint. Facet parameters are omitted from the request entirely when
/// the corresponding selection is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub query: Option<String>,
    pub sort: String,
    pub brands: Option<String>,
    pub types: Option<String>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            query: None,
            sort: DEFAULT_SORT.to_string(),
            brands: None,
            types: None,
        }
    }
}

impl ProductQuery {
    /// Endpoint path this query is addressed to.
    pub fn endpoint(&self) -> &'static str {
        if self.query.is_some() { "search" } else { "products" }
    }

    /// The exact key/value pairs sent on the wire, in order.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::with_capacity(4);
        if let Some(ref query) = self.query {
            params.push(("query", query.as_str()));
        }
        params.push(("sort", self.sort.as_str()));
        if let Some(ref brands) = self.brands {
            params.push(("brands", brands.as_str()));
        }
        if let Some(ref types) = self.types {
            params.push(("types", types.as_str()));
        }
        params
    }
}
