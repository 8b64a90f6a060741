use std::collections::{BTreeMap, HashMap};
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config as HierarchicalConfig, Environment};
use serde::{Deserialize, Serialize};
use tracing::debug;
use xdg::BaseDirectories;

/// Name of bristle managed directories (config, data, cache)
const BRISTLE_DIR_NAME: &str = "bristle";
const BRISTLE_CONFIG_DIR_VAR: &str = "BRISTLE_CONFIG_DIR";
pub const BRISTLE_CONFIG_FILE: &str = "bristle.toml";

#[derive(Clone, Debug, Deserialize, Default, Serialize)]
pub struct Config {
    /// bristle configuration options
    #[serde(default, flatten)]
    pub bristle: BristleConfig,
}

/// User-facing configuration, layered from the config file and
/// `BRISTLE_`-prefixed environment variables.
#[derive(Clone, Debug, Deserialize, Serialize, Default)]
pub struct BristleConfig {
    /// The URL of the catalog instance to use
    // Using a URL here adds an extra trailing slash,
    // so just use a String.
    pub catalog_url: Option<String>,

    /// Additional headers to send with every catalog request
    #[serde(default)]
    pub extra_headers: BTreeMap<String, String>,

    /// Overrides the User-Agent header sent to the catalog
    pub user_agent: Option<String>,

    /// How many products 'bristle search' prints before truncating
    pub page_size: Option<usize>,
}

impl Config {
    /// Creates a [Config] from the environment and config file
    pub fn parse() -> Result<Config> {
        Self::parse_with(config_file_path().as_deref(), env::vars())
    }

    /// Layer an optional TOML file under `BRISTLE_`-prefixed variables
    /// from `env_vars`.
    ///
    /// The environment is passed in rather than read here so tests can
    /// layer without mutating process state.
    fn parse_with(
        config_file: Option<&Path>,
        env_vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Config> {
        let mut builder = HierarchicalConfig::builder();

        if let Some(path) = config_file {
            debug!(path = %path.display(), "layering config file");
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }

        let final_config = builder
            .add_source(
                Environment::with_prefix("BRISTLE")
                    .source(Some(HashMap::from_iter(env_vars)))
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = final_config
            .try_deserialize()
            .context("Could not parse config")?;
        Ok(config)
    }
}

/// The config file to read: `$BRISTLE_CONFIG_DIR/bristle.toml` when the
/// variable is set, the XDG config home otherwise.
fn config_file_path() -> Option<PathBuf> {
    match env::var(BRISTLE_CONFIG_DIR_VAR) {
        Ok(dir) => Some(PathBuf::from(dir).join(BRISTLE_CONFIG_FILE)),
        Err(_) => BaseDirectories::with_prefix(BRISTLE_DIR_NAME)
            .get_config_home()
            .map(|home| home.join(BRISTLE_CONFIG_FILE)),
    }
}
