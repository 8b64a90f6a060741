use std::fmt::Write;

use anyhow::{Result, bail};
use bpaf::Bpaf;
use bristle_catalog::{Client, ClientTrait, SpellcheckVerdict};
use bristle_core::filters::FacetDimension;
use bristle_core::pagination::PAGE_SIZE;
use bristle_core::request::SearchContext;
use bristle_core::sort::SortField;
use indoc::formatdoc;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::utils::display::DisplayProducts;
use crate::utils::message;

const BROWSE_HINT: &str = "Use 'bristle browse' to refine results interactively";

/// Search the catalog once and print the matches
#[derive(Debug, Bpaf, Clone)]
pub struct Search {
    /// Display search results as a JSON array
    #[bpaf(long)]
    pub json: bool,

    /// Print all search results
    #[bpaf(short, long)]
    pub all: bool,

    /// Sort by 'price', 'battery', or 'waterproof'.
    ///
    /// Passing a field twice sorts it descending.
    #[bpaf(long("sort"), argument("FIELD"), many)]
    pub sort: Vec<SortField>,

    /// Only show products of this brand; may be repeated
    #[bpaf(long("brand"), argument("BRAND"), many)]
    pub brands: Vec<String>,

    /// Only show products of this type; may be repeated
    #[bpaf(long("type"), argument("TYPE"), many)]
    pub types: Vec<String>,

    /// The term to search for
    #[bpaf(positional("search-term"))]
    pub search_term: String,
}

impl Search {
    #[instrument(
        name = "search",
        fields(json = self.json, show_all = self.all, search_term = self.search_term),
        skip_all
    )]
    pub async fn handle(self, config: Config, client: Client) -> Result<()> {
        debug!("performing search for term: {}", self.search_term);

        let mut context = SearchContext::default();
        context.query = self.search_term.clone();
        for field in &self.sort {
            context.sort.toggle(*field);
        }
        for brand in &self.brands {
            context.filters.toggle(FacetDimension::Brand, brand.as_str());
        }
        for value in &self.types {
            context.filters.toggle(FacetDimension::Type, value.as_str());
        }

        let products = client.fetch_products(&context.compose()).await?;

        if self.json {
            debug!("printing search results as JSON");
            println!("{}", serde_json::to_string(&products)?);
            return Ok(());
        }

        // The spelling probe is advisory, a failure only costs the hint.
        let verdict = match client.spellcheck(&self.search_term).await {
            Ok(verdict) => Some(verdict),
            Err(err) => {
                debug!("spellcheck failed: {err}");
                None
            },
        };

        if products.is_empty() {
            let mut message = format!(
                "No products matched this search term: '{}'",
                self.search_term
            );
            if let Some(suggestion) = did_you_mean(verdict.as_ref()) {
                message = formatdoc! {"
                    {message}

                    {suggestion}
                "};
            }
            bail!(message);
        }

        let shown = if self.all {
            products.len()
        } else {
            config
                .bristle
                .page_size
                .unwrap_or(PAGE_SIZE)
                .min(products.len())
        };
        println!("{}", DisplayProducts::from(&products[..shown]));

        let mut hints = String::new();

        if shown < products.len() {
            writeln!(&mut hints)?;
            writeln!(
                &mut hints,
                "Showing {shown} of {} products. Use 'bristle search {} --all' to see the rest.",
                products.len(),
                self.search_term,
            )?;
        }

        writeln!(&mut hints)?;
        writeln!(&mut hints, "{BROWSE_HINT}")?;

        if let Some(suggestion) = did_you_mean(verdict.as_ref()) {
            writeln!(&mut hints)?;
            writeln!(&mut hints, "{suggestion}")?;
        }

        message::plain(hints);
        Ok(())
    }
}

/// `Did you mean` line for a term the catalog vocabulary rejects, [None]
/// for a recognized term or a failed probe.
fn did_you_mean(verdict: Option<&SpellcheckVerdict>) -> Option<String> {
    let verdict = verdict?;
    if verdict.exists || verdict.suggestions.is_empty() {
        return None;
    }
    Some(format!(
        "Did you mean: {}?",
        verdict.suggestions.iter().join(", ")
    ))
}
