//! The coordinating state machine for one catalog-browsing session.
//!
//! [`SearchSession`] owns the canonical view state: query text, sort
//! priorities, facet filters, the current page, the result set, both
//! suggestion surfaces, and the side panels. Mutators return [`Command`]s
//! describing the asynchronous work they require; completions of that
//! work come back through [`SearchSession::apply`]. The session performs
//! no I/O of its own, which keeps every ordering hazard testable without
//! a server.
//!
//! Each fetch family carries its own monotonically increasing token. A
//! completion whose token is no longer current is discarded wholesale: it
//! touches neither results nor the loading flag, because the superseding
//! request's own completion is responsible for both.

use std::time::Duration;

use bristle_catalog::{CatalogClientError, Product, ProductQuery, SpellcheckVerdict, TopSearch};
use tracing::{debug, warn};

use crate::filters::{FacetDimension, FacetFilters};
use crate::pagination::PageView;
use crate::request::SearchContext;
use crate::sort::{SortField, SortPriorityList};

/// How long a suggestion list stays up after the input loses focus, so a
/// pointer selection on a list item can land before the list unmounts.
pub const SUGGESTION_HIDE_DELAY: Duration = Duration::from_millis(200);

/// Asynchronous work requested by a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch products; browse or search is encoded in the params.
    FetchProducts { token: u64, params: ProductQuery },
    /// Fetch prefix completions.
    FetchSuggestions { token: u64, prefix: String },
    /// Check the submitted word against the catalog vocabulary.
    FetchSpellcheck { word: String },
    /// Refresh the top-searches side panel.
    FetchTopSearches,
    /// Fetch the brand vocabulary.
    FetchBrands,
    /// Fetch the toothbrush type vocabulary.
    FetchTypes,
    /// Deliver [`Completion::SuggestionsHideElapsed`] after
    /// [`SUGGESTION_HIDE_DELAY`].
    ScheduleSuggestionsHide { token: u64 },
    /// Scroll the result list back to the top.
    ScrollToTop,
}

/// Completion of a previously issued [`Command`].
#[derive(Debug)]
pub enum Completion {
    ProductsLoaded {
        token: u64,
        /// The submitted query word when the fetch was a search.
        searched: Option<String>,
        outcome: Result<Vec<Product>, CatalogClientError>,
    },
    SuggestionsLoaded {
        token: u64,
        outcome: Result<Vec<String>, CatalogClientError>,
    },
    SpellcheckLoaded {
        word: String,
        outcome: Result<SpellcheckVerdict, CatalogClientError>,
    },
    TopSearchesLoaded {
        outcome: Result<Vec<TopSearch>, CatalogClientError>,
    },
    BrandsLoaded {
        outcome: Result<Vec<String>, CatalogClientError>,
    },
    TypesLoaded {
        outcome: Result<Vec<String>, CatalogClientError>,
    },
    SuggestionsHideElapsed { token: u64 },
}

/// Canonical state of one browsing session.
#[derive(Debug)]
pub struct SearchSession {
    context: SearchContext,
    page: usize,
    products: Vec<Product>,
    suggestions: Vec<String>,
    spelling_suggestions: Option<Vec<String>>,
    top_searches: Vec<TopSearch>,
    known_brands: Vec<String>,
    known_types: Vec<String>,
    loading: bool,
    input_focused: bool,
    products_token: u64,
    suggestions_token: u64,
    hide_token: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            context: SearchContext::default(),
            page: 1,
            products: Vec::new(),
            suggestions: Vec::new(),
            spelling_suggestions: None,
            top_searches: Vec::new(),
            known_brands: Vec::new(),
            known_types: Vec::new(),
            loading: false,
            input_focused: false,
            products_token: 0,
            suggestions_token: 0,
            hide_token: 0,
        }
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands for session start: an unfiltered browse plus the one-time
    /// vocabulary fetches and the initial top-searches panel.
    pub fn startup(&mut self) -> Vec<Command> {
        let mut commands = vec![self.issue_product_fetch()];
        commands.push(Command::FetchTopSearches);
        commands.push(Command::FetchBrands);
        commands.push(Command::FetchTypes);
        commands
    }

    /// Submit `text` as the query and run the search pipeline.
    ///
    /// A blank submission is a no-op; clearing back to an unfiltered
    /// catalog goes through [`SearchSession::show_all`] instead.
    pub fn submit(&mut self, text: impl Into<String>) -> Vec<Command> {
        let text = text.into();
        if text.trim().is_empty() {
            return Vec::new();
        }
        self.context.query = text;
        self.run_search()
    }

    /// Record a keystroke in the query input.
    ///
    /// A trimmed length of one or less clears the suggestion list without
    /// any network call; anything longer issues a prefix fetch carrying a
    /// fresh token.
    pub fn input_changed(&mut self, text: impl Into<String>) -> Vec<Command> {
        let text = text.into();
        self.context.query = text.clone();
        if text.trim().chars().count() <= 1 {
            self.invalidate_suggestions();
            return Vec::new();
        }
        self.suggestions_token += 1;
        vec![Command::FetchSuggestions {
            token: self.suggestions_token,
            prefix: text,
        }]
    }

    /// The query input gained focus; any pending delayed hide is void.
    pub fn focus(&mut self) {
        self.input_focused = true;
        self.hide_token += 1;
    }

    /// The query input lost focus. The suggestion list stays visible for
    /// [`SUGGESTION_HIDE_DELAY`] so a selection can still land.
    pub fn blur(&mut self) -> Vec<Command> {
        self.hide_token += 1;
        vec![Command::ScheduleSuggestionsHide {
            token: self.hide_token,
        }]
    }

    /// A suggestion was picked from the dropdown: it becomes the query,
    /// the dropdown clears, and the full search pipeline runs.
    pub fn select_suggestion(&mut self, term: impl Into<String>) -> Vec<Command> {
        self.context.query = term.into();
        self.invalidate_suggestions();
        self.run_search()
    }

    /// A spelling correction was picked from the fallback panel; same
    /// contract as [`SearchSession::select_suggestion`], the panel itself
    /// clears when the pipeline starts.
    pub fn select_correction(&mut self, term: impl Into<String>) -> Vec<Command> {
        self.context.query = term.into();
        self.run_search()
    }

    /// Cycle `field` through its sort states and re-run the round trip
    /// with the current query text.
    pub fn toggle_sort(&mut self, field: SortField) -> Vec<Command> {
        self.context.sort.toggle(field);
        self.refetch()
    }

    /// Toggle a facet value and re-run the round trip with the current
    /// query text.
    pub fn toggle_filter(
        &mut self,
        dimension: FacetDimension,
        value: impl Into<String>,
    ) -> Vec<Command> {
        self.context.filters.toggle(dimension, value);
        self.refetch()
    }

    /// Move to `target` if it is a valid page; out-of-range requests are
    /// silently ignored. Navigation scrolls back to the top of the list.
    pub fn navigate(&mut self, target: usize) -> Vec<Command> {
        if !self.page_view().contains(target) {
            return Vec::new();
        }
        self.page = target;
        vec![Command::ScrollToTop]
    }

    /// Reset query, suggestions, spelling panel, filters, and sort in one
    /// transition, then browse the unfiltered catalog.
    pub fn show_all(&mut self) -> Vec<Command> {
        self.context.query.clear();
        self.context.sort.clear();
        self.context.filters.clear();
        self.invalidate_suggestions();
        self.spelling_suggestions = None;
        self.page = 1;
        vec![self.issue_product_fetch()]
    }

    /// Apply the completion of previously issued work, returning any
    /// follow-up commands.
    pub fn apply(&mut self, completion: Completion) -> Vec<Command> {
        match completion {
            Completion::ProductsLoaded {
                token,
                searched,
                outcome,
            } => {
                if token != self.products_token {
                    debug!(
                        token,
                        current = self.products_token,
                        "discarding superseded product response"
                    );
                    return Vec::new();
                }
                self.loading = false;
                match outcome {
                    Ok(products) => {
                        self.products = products;
                        self.page = 1;
                        match searched {
                            // A search is always followed by a spelling
                            // probe and a top-searches refresh; a browse
                            // by neither.
                            Some(word) => vec![
                                Command::FetchSpellcheck { word },
                                Command::FetchTopSearches,
                            ],
                            None => Vec::new(),
                        }
                    },
                    Err(err) => {
                        warn!(%err, "product fetch failed, keeping previous results");
                        Vec::new()
                    },
                }
            },
            Completion::SuggestionsLoaded { token, outcome } => {
                if token != self.suggestions_token {
                    debug!(
                        token,
                        current = self.suggestions_token,
                        "discarding superseded suggestion response"
                    );
                    return Vec::new();
                }
                match outcome {
                    Ok(suggestions) => self.suggestions = suggestions,
                    Err(err) => debug!(%err, "autocomplete fetch failed"),
                }
                Vec::new()
            },
            Completion::SpellcheckLoaded { word, outcome } => {
                if word != self.context.query {
                    debug!(word, "dropping spelling verdict for superseded query");
                    return Vec::new();
                }
                match outcome {
                    Ok(verdict) if !verdict.exists => {
                        self.spelling_suggestions = Some(verdict.suggestions);
                    },
                    Ok(_) => {},
                    Err(err) => debug!(%err, "spellcheck failed"),
                }
                Vec::new()
            },
            Completion::TopSearchesLoaded { outcome } => {
                match outcome {
                    Ok(top_searches) => self.top_searches = top_searches,
                    Err(err) => debug!(%err, "top-searches refresh failed"),
                }
                Vec::new()
            },
            Completion::BrandsLoaded { outcome } => {
                match outcome {
                    Ok(brands) => self.known_brands = brands,
                    Err(err) => warn!(%err, "brand vocabulary fetch failed"),
                }
                Vec::new()
            },
            Completion::TypesLoaded { outcome } => {
                match outcome {
                    Ok(types) => self.known_types = types,
                    Err(err) => warn!(%err, "type vocabulary fetch failed"),
                }
                Vec::new()
            },
            Completion::SuggestionsHideElapsed { token } => {
                if token == self.hide_token {
                    self.input_focused = false;
                }
                Vec::new()
            },
        }
    }

    // Accessors

    pub fn query(&self) -> &str {
        &self.context.query
    }

    pub fn sort(&self) -> &SortPriorityList {
        &self.context.sort
    }

    pub fn filters(&self) -> &FacetFilters {
        &self.context.filters
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_view(&self) -> PageView {
        PageView::new(self.products.len(), self.page)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The slice of results shown on the current page.
    pub fn visible_products(&self) -> &[Product] {
        self.page_view().slice(&self.products)
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Suggestions are only shown while the input has focus and the list
    /// is non-empty.
    pub fn suggestions_visible(&self) -> bool {
        self.input_focused && !self.suggestions.is_empty()
    }

    pub fn spelling_suggestions(&self) -> Option<&[String]> {
        self.spelling_suggestions.as_deref()
    }

    pub fn top_searches(&self) -> &[TopSearch] {
        &self.top_searches
    }

    pub fn known_brands(&self) -> &[String] {
        &self.known_brands
    }

    pub fn known_types(&self) -> &[String] {
        &self.known_types
    }

    // Transition helpers

    /// Start the full search pipeline for the current query: the spelling
    /// panel clears, the page resets, and a tokened fetch goes out.
    fn run_search(&mut self) -> Vec<Command> {
        self.spelling_suggestions = None;
        self.page = 1;
        vec![self.issue_product_fetch()]
    }

    /// Re-run the browse-or-search round trip after a sort or filter
    /// mutation, keeping the current query text.
    fn refetch(&mut self) -> Vec<Command> {
        if self.context.query.is_empty() {
            self.page = 1;
            vec![self.issue_product_fetch()]
        } else {
            self.run_search()
        }
    }

    fn issue_product_fetch(&mut self) -> Command {
        self.loading = true;
        self.products_token += 1;
        Command::FetchProducts {
            token: self.products_token,
            params: self.context.compose(),
        }
    }

    /// Clear the suggestion list and invalidate any in-flight prefix
    /// fetch so its late response cannot repopulate the list.
    fn invalidate_suggestions(&mut self) {
        self.suggestions.clear();
        self.suggestions_token += 1;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pagination::PAGE_SIZE;

    fn product(name: &str) -> Product {
        Product {
            name: name.to_string(),
            brand: "Oral-B".to_string(),
            price: "$19.99".to_string(),
            rating: "4.2".to_string(),
            review_count: "311".to_string(),
            description: "Rechargeable".to_string(),
            image_url: "https://img.example/p.jpg".to_string(),
            product_url: "https://shop.example/p".to_string(),
            toothbrush_type: None,
            battery_life: None,
            waterproof_rating: None,
        }
    }

    fn products(n: usize) -> Vec<Product> {
        (0..n).map(|i| product(&format!("brush-{i}"))).collect()
    }

    /// Unwrap a lone product fetch command.
    fn fetch(commands: &[Command]) -> (u64, ProductQuery) {
        match commands {
            [Command::FetchProducts { token, params }] => (*token, params.clone()),
            other => panic!("expected a single product fetch, found {other:?}"),
        }
    }

    fn loaded(token: u64, params: &ProductQuery, outcome: Vec<Product>) -> Completion {
        Completion::ProductsLoaded {
            token,
            searched: params.query.clone(),
            outcome: Ok(outcome),
        }
    }

    #[test]
    fn startup_browses_and_fills_the_side_panels() {
        let mut session = SearchSession::new();
        let commands = session.startup();

        assert_eq!(commands, vec![
            Command::FetchProducts {
                token: 1,
                params: ProductQuery::default(),
            },
            Command::FetchTopSearches,
            Command::FetchBrands,
            Command::FetchTypes,
        ]);
        assert!(session.loading());

        let follow_ups = session.apply(loaded(1, &ProductQuery::default(), products(3)));
        assert_eq!(follow_ups, vec![]);
        assert_eq!(session.products().len(), 3);
        assert!(!session.loading());

        session.apply(Completion::BrandsLoaded {
            outcome: Ok(vec!["Oral-B".to_string(), "Philips".to_string()]),
        });
        session.apply(Completion::TypesLoaded {
            outcome: Ok(vec!["Electric".to_string()]),
        });
        assert_eq!(session.known_brands(), ["Oral-B", "Philips"]);
        assert_eq!(session.known_types(), ["Electric"]);
    }

    #[test]
    fn empty_submit_is_a_no_op() {
        let mut session = SearchSession::new();
        assert_eq!(session.submit("   "), vec![]);
        assert_eq!(session.query(), "");
        assert!(!session.loading());
    }

    #[test]
    fn submit_composes_search_with_current_sort_and_filters() {
        let mut session = SearchSession::new();
        session.toggle_sort(SortField::Price);
        session.toggle_filter(FacetDimension::Brand, "Oral-B");

        let commands = session.submit("electric");
        let (token, params) = fetch(&commands);
        assert_eq!(token, 3);
        assert_eq!(params, ProductQuery {
            query: Some("electric".to_string()),
            sort: "price_asc".to_string(),
            brands: Some("Oral-B".to_string()),
            types: None,
        });
        assert!(session.loading());
    }

    #[test]
    fn successful_search_chains_spellcheck_and_top_searches() {
        let mut session = SearchSession::new();
        let (token, params) = fetch(&session.submit("sonic"));

        let follow_ups = session.apply(loaded(token, &params, products(2)));
        assert_eq!(follow_ups, vec![
            Command::FetchSpellcheck {
                word: "sonic".to_string(),
            },
            Command::FetchTopSearches,
        ]);
        assert!(!session.loading());
        assert_eq!(session.products().len(), 2);
    }

    #[test]
    fn browse_completion_chains_nothing() {
        let mut session = SearchSession::new();
        let commands = session.toggle_filter(FacetDimension::Type, "Electric");
        let (token, params) = fetch(&commands);
        assert_eq!(params.query, None);

        let follow_ups = session.apply(loaded(token, &params, products(1)));
        assert_eq!(follow_ups, vec![]);
    }

    #[test]
    fn failed_product_fetch_keeps_prior_results_and_clears_loading() {
        let mut session = SearchSession::new();
        let (token, params) = fetch(&session.startup()[..1]);
        session.apply(loaded(token, &params, products(4)));

        let (token, _params) = fetch(&session.submit("broken"));
        let follow_ups = session.apply(Completion::ProductsLoaded {
            token,
            searched: Some("broken".to_string()),
            outcome: Err(CatalogClientError::Other("connection refused".to_string())),
        });

        assert_eq!(follow_ups, vec![]);
        assert_eq!(session.products().len(), 4);
        assert!(!session.loading());
    }

    #[test]
    fn stale_product_response_is_discarded_entirely() {
        let mut session = SearchSession::new();
        let (first_token, first_params) = fetch(&session.startup()[..1]);
        let (second_token, second_params) = fetch(&session.toggle_sort(SortField::Price));

        // The older response resolves last-minute, after a newer request
        // went out; it must not touch results, page, or loading.
        let follow_ups = session.apply(loaded(first_token, &first_params, products(9)));
        assert_eq!(follow_ups, vec![]);
        assert_eq!(session.products().len(), 0);
        assert!(session.loading());

        session.apply(loaded(second_token, &second_params, products(2)));
        assert_eq!(session.products().len(), 2);
        assert!(!session.loading());
    }

    #[test]
    fn stale_suggestion_response_is_discarded() {
        let mut session = SearchSession::new();
        session.focus();
        session.input_changed("br");
        let commands = session.input_changed("bra");
        let token = match &commands[..] {
            [Command::FetchSuggestions { token, prefix }] => {
                assert_eq!(prefix, "bra");
                *token
            },
            other => panic!("expected a suggestion fetch, found {other:?}"),
        };

        session.apply(Completion::SuggestionsLoaded {
            token: token - 1,
            outcome: Ok(vec!["brush".to_string()]),
        });
        assert_eq!(session.suggestions(), &[] as &[String]);

        session.apply(Completion::SuggestionsLoaded {
            token,
            outcome: Ok(vec!["braun".to_string()]),
        });
        assert_eq!(session.suggestions(), ["braun"]);
        assert!(session.suggestions_visible());
    }

    #[test]
    fn results_replacement_resets_page() {
        let mut session = SearchSession::new();
        let (token, params) = fetch(&session.startup()[..1]);
        session.apply(loaded(token, &params, products(2 * PAGE_SIZE)));

        session.navigate(2);
        assert_eq!(session.page(), 2);

        let (token, params) = fetch(&session.toggle_filter(FacetDimension::Brand, "Philips"));
        assert_eq!(session.page(), 1);

        session.navigate(2);
        session.apply(loaded(token, &params, products(PAGE_SIZE + 1)));
        assert_eq!(session.page(), 1);
    }

    #[test]
    fn navigate_applies_only_in_range_and_scrolls() {
        let mut session = SearchSession::new();
        let (token, params) = fetch(&session.startup()[..1]);
        session.apply(loaded(token, &params, products(2 * PAGE_SIZE)));

        assert_eq!(session.navigate(0), vec![]);
        assert_eq!(session.page(), 1);
        assert_eq!(session.navigate(3), vec![]);
        assert_eq!(session.page(), 1);

        assert_eq!(session.navigate(2), vec![Command::ScrollToTop]);
        assert_eq!(session.page(), 2);
        assert_eq!(session.visible_products().len(), PAGE_SIZE);
    }

    #[test]
    fn spelling_fallback_scenario() {
        let mut session = SearchSession::new();
        let (token, params) = fetch(&session.submit("toothbruush"));

        let follow_ups = session.apply(loaded(token, &params, vec![]));
        assert_eq!(follow_ups[0], Command::FetchSpellcheck {
            word: "toothbruush".to_string(),
        });

        session.apply(Completion::SpellcheckLoaded {
            word: "toothbruush".to_string(),
            outcome: Ok(SpellcheckVerdict {
                exists: false,
                suggestions: vec!["toothbrush".to_string()],
            }),
        });
        assert_eq!(
            session.spelling_suggestions(),
            Some(&["toothbrush".to_string()][..])
        );

        let commands = session.select_correction("toothbrush");
        let (_token, params) = fetch(&commands);
        assert_eq!(params.query, Some("toothbrush".to_string()));
        assert_eq!(session.query(), "toothbrush");
        assert_eq!(session.spelling_suggestions(), None);
    }

    #[test]
    fn recognized_word_leaves_the_panel_absent() {
        let mut session = SearchSession::new();
        let (token, params) = fetch(&session.submit("toothbrush"));
        session.apply(loaded(token, &params, products(5)));

        session.apply(Completion::SpellcheckLoaded {
            word: "toothbrush".to_string(),
            outcome: Ok(SpellcheckVerdict {
                exists: true,
                suggestions: vec![],
            }),
        });
        assert_eq!(session.spelling_suggestions(), None);
    }

    #[test]
    fn spellcheck_for_superseded_query_is_ignored() {
        let mut session = SearchSession::new();
        let (token, params) = fetch(&session.submit("sonicure"));
        session.apply(loaded(token, &params, vec![]));

        // A newer submission changes the query before the verdict lands.
        session.submit("oral");
        session.apply(Completion::SpellcheckLoaded {
            word: "sonicure".to_string(),
            outcome: Ok(SpellcheckVerdict {
                exists: false,
                suggestions: vec!["sonicare".to_string()],
            }),
        });
        assert_eq!(session.spelling_suggestions(), None);
    }

    #[test]
    fn short_input_clears_suggestions_without_network() {
        let mut session = SearchSession::new();
        session.focus();
        let commands = session.input_changed("br");
        assert_eq!(commands.len(), 1);
        let token = match &commands[0] {
            Command::FetchSuggestions { token, .. } => *token,
            other => panic!("expected a suggestion fetch, found {other:?}"),
        };
        session.apply(Completion::SuggestionsLoaded {
            token,
            outcome: Ok(vec!["braun".to_string(), "brush".to_string()]),
        });
        assert!(session.suggestions_visible());

        assert_eq!(session.input_changed("b"), vec![]);
        assert_eq!(session.suggestions(), &[] as &[String]);
        assert!(!session.suggestions_visible());
    }

    #[test]
    fn late_suggestion_response_after_clearing_is_stale() {
        let mut session = SearchSession::new();
        session.focus();
        let commands = session.input_changed("br");
        let token = match &commands[0] {
            Command::FetchSuggestions { token, .. } => *token,
            other => panic!("expected a suggestion fetch, found {other:?}"),
        };

        // The input shrank before the response arrived; the in-flight
        // fetch was invalidated, not merely cleared.
        session.input_changed("b");
        session.apply(Completion::SuggestionsLoaded {
            token,
            outcome: Ok(vec!["brush".to_string()]),
        });
        assert_eq!(session.suggestions(), &[] as &[String]);
    }

    #[test]
    fn suggestion_selection_clears_list_and_searches() {
        let mut session = SearchSession::new();
        session.focus();
        let commands = session.input_changed("bra");
        let token = match &commands[0] {
            Command::FetchSuggestions { token, .. } => *token,
            other => panic!("expected a suggestion fetch, found {other:?}"),
        };
        session.apply(Completion::SuggestionsLoaded {
            token,
            outcome: Ok(vec!["braun".to_string()]),
        });

        let commands = session.select_suggestion("braun");
        let (_token, params) = fetch(&commands);
        assert_eq!(params.query, Some("braun".to_string()));
        assert_eq!(session.query(), "braun");
        assert_eq!(session.suggestions(), &[] as &[String]);
    }

    #[test]
    fn selection_can_land_during_the_hide_delay() {
        let mut session = SearchSession::new();
        session.focus();
        let commands = session.input_changed("or");
        let token = match &commands[0] {
            Command::FetchSuggestions { token, .. } => *token,
            other => panic!("expected a suggestion fetch, found {other:?}"),
        };
        session.apply(Completion::SuggestionsLoaded {
            token,
            outcome: Ok(vec!["oral".to_string()]),
        });

        let hide = session.blur();
        let hide_token = match &hide[..] {
            [Command::ScheduleSuggestionsHide { token }] => *token,
            other => panic!("expected a scheduled hide, found {other:?}"),
        };
        assert!(session.suggestions_visible());

        // The pointer selection fires before the delayed hide elapses.
        let commands = session.select_suggestion("oral");
        let (_token, params) = fetch(&commands);
        assert_eq!(params.query, Some("oral".to_string()));

        session.apply(Completion::SuggestionsHideElapsed { token: hide_token });
        assert!(!session.suggestions_visible());
    }

    #[test]
    fn refocus_invalidates_a_pending_hide() {
        let mut session = SearchSession::new();
        session.focus();
        let commands = session.input_changed("or");
        let token = match &commands[0] {
            Command::FetchSuggestions { token, .. } => *token,
            other => panic!("expected a suggestion fetch, found {other:?}"),
        };
        session.apply(Completion::SuggestionsLoaded {
            token,
            outcome: Ok(vec!["oral".to_string()]),
        });

        let hide = session.blur();
        let stale_hide_token = match &hide[..] {
            [Command::ScheduleSuggestionsHide { token }] => *token,
            other => panic!("expected a scheduled hide, found {other:?}"),
        };

        session.focus();
        session.apply(Completion::SuggestionsHideElapsed {
            token: stale_hide_token,
        });
        assert!(session.suggestions_visible());
    }

    #[test]
    fn show_all_resets_every_dimension_atomically() {
        let mut session = SearchSession::new();
        session.focus();
        session.toggle_sort(SortField::Price);
        session.toggle_filter(FacetDimension::Brand, "Oral-B");
        let (token, params) = fetch(&session.submit("sonicure"));
        session.apply(loaded(token, &params, products(2 * PAGE_SIZE)));
        session.apply(Completion::SpellcheckLoaded {
            word: "sonicure".to_string(),
            outcome: Ok(SpellcheckVerdict {
                exists: false,
                suggestions: vec!["sonicare".to_string()],
            }),
        });
        session.navigate(2);

        let commands = session.show_all();
        let (_token, composed) = fetch(&commands);
        assert_eq!(composed, ProductQuery::default());

        assert_eq!(session.query(), "");
        assert!(session.sort().is_empty());
        assert!(session.filters().is_empty());
        assert_eq!(session.page(), 1);
        assert_eq!(session.spelling_suggestions(), None);
        assert_eq!(session.suggestions(), &[] as &[String]);
        assert!(session.loading());
    }

    #[test]
    fn sort_toggles_refetch_with_updated_priority() {
        let mut session = SearchSession::new();
        let (_, params) = fetch(&session.toggle_sort(SortField::Price));
        assert_eq!(params.sort, "price_asc");

        let (_, params) = fetch(&session.toggle_sort(SortField::Battery));
        assert_eq!(params.sort, "price_asc,battery_asc");

        let (_, params) = fetch(&session.toggle_sort(SortField::Price));
        assert_eq!(params.sort, "price_desc,battery_asc");
    }
}
