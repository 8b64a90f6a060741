use anyhow::Result;
use bpaf::Bpaf;
use bristle_catalog::{Client, ClientTrait};
use tracing::{debug, instrument};

use crate::utils::display::DisplayTopSearches;
use crate::utils::message;

/// Show the most searched terms
#[derive(Debug, Bpaf, Clone)]
pub struct Top {
    /// Display the terms as a JSON array
    #[bpaf(long)]
    pub json: bool,
}

impl Top {
    #[instrument(name = "top", fields(json = self.json), skip_all)]
    pub async fn handle(self, client: Client) -> Result<()> {
        debug!("fetching top searches");
        let top_searches = client.top_searches().await?;

        if self.json {
            println!("{}", serde_json::to_string(&top_searches)?);
            return Ok(());
        }

        if top_searches.is_empty() {
            message::plain("No searches recorded yet.");
            return Ok(());
        }

        message::plain(DisplayTopSearches::new(&top_searches));
        Ok(())
    }
}
