//! Configuration types for catalog client construction.

use std::collections::BTreeMap;

/// Configuration for catalog client construction.
///
/// Every component that issues HTTP calls receives one of these at
/// construction time; the base URL is never read from a global.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL for the catalog service, including any path prefix.
    pub base_url: String,
    /// Additional headers to include in requests.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
}
