//! Composition of view state into catalog request parameters.

use bristle_catalog::ProductQuery;

use crate::filters::FacetFilters;
use crate::sort::SortPriorityList;

/// The minimal state that fully determines the next catalog request.
///
/// The current page is deliberately absent: the service returns the full
/// matching set and pagination happens on the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchContext {
    pub query: String,
    pub sort: SortPriorityList,
    pub filters: FacetFilters,
}

impl SearchContext {
    /// Compose the parameters for the next round trip.
    ///
    /// An empty query browses the catalog; anything else runs a full-text
    /// search. The sort parameter is always present, falling back to the
    /// default token, while facet parameters are omitted when their
    /// selection is empty. Every mutation of query, sort, or filters
    /// re-runs this composition; results are never patched incrementally.
    pub fn compose(&self) -> ProductQuery {
        ProductQuery {
            query: (!self.query.is_empty()).then(|| self.query.clone()),
            sort: self.sort.as_param(),
            brands: self.filters.brands_param(),
            types: self.filters.types_param(),
        }
    }
}
