//! HTTP client infrastructure for the toothbrush catalog service.
//!
//! This crate provides:
//! - HTTP client construction with timeouts and default headers
//! - Wire types for every catalog endpoint
//! - Common error handling for catalog operations
//! - A mock client seeded with canned responses for tests
//!
//! ## Usage
//!
//! ```ignore
//! use bristle_catalog::{CatalogClient, CatalogConfig, ClientTrait, ProductQuery};
//!
//! let config = CatalogConfig {
//!     base_url: "http://localhost:8080/api".to_string(),
//!     extra_headers: BTreeMap::new(),
//!     user_agent: None,
//! };
//!
//! let client = CatalogClient::new(config)?;
//! let products = client.fetch_products(&ProductQuery::default()).await?;
//! ```

mod client;
mod config;
mod error;
mod mock;
mod types;

pub use client::{CatalogClient, Client, ClientTrait};
pub use config::CatalogConfig;
pub use error::{AuthError, CatalogClientError};
pub use mock::{ErrorReply, MockClient};
pub use types::{
    DEFAULT_SORT,
    LoginOutcome,
    LoginRequest,
    Product,
    ProductQuery,
    RegisterRequest,
    ServerMessage,
    SpellcheckVerdict,
    TopSearch,
};
