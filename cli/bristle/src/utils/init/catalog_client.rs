use anyhow::Result;
use bristle_catalog::{CatalogClient, CatalogConfig, Client};
use tracing::debug;

use crate::config::Config;

pub const DEFAULT_CATALOG_URL: &str = "http://localhost:8080/api";

/// Initialize the catalog API client from the layered configuration.
///
/// The base URL falls back to [DEFAULT_CATALOG_URL] when not configured.
pub fn init_catalog_client(config: &Config) -> Result<Client> {
    let base_url = config
        .bristle
        .catalog_url
        .clone()
        .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());

    let user_agent = config
        .bristle
        .user_agent
        .clone()
        .unwrap_or_else(|| format!("bristle/{}", env!("CARGO_PKG_VERSION")));

    debug!("using catalog client with url: {}", base_url);
    let client = CatalogClient::new(CatalogConfig {
        base_url,
        extra_headers: config.bristle.extra_headers.clone(),
        user_agent: Some(user_agent),
    })?;
    Ok(client.into())
}
