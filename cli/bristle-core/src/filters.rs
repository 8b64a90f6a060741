//! Multi-select facet filter state.

use std::collections::BTreeSet;

use itertools::Itertools;

/// The two filterable product dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetDimension {
    Brand,
    Type,
}

/// Independent multi-select sets for the brand and type facets.
///
/// Backed by ordered sets so serialized filters don't reorder between
/// otherwise identical requests. An empty set means "no filter on this
/// dimension".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetFilters {
    selected_brands: BTreeSet<String>,
    selected_types: BTreeSet<String>,
}

impl FacetFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` to the named set, or remove it if already present.
    pub fn toggle(&mut self, dimension: FacetDimension, value: impl Into<String>) {
        let set = match dimension {
            FacetDimension::Brand => &mut self.selected_brands,
            FacetDimension::Type => &mut self.selected_types,
        };
        let value = value.into();
        if !set.remove(&value) {
            set.insert(value);
        }
    }

    pub fn is_selected(&self, dimension: FacetDimension, value: &str) -> bool {
        match dimension {
            FacetDimension::Brand => self.selected_brands.contains(value),
            FacetDimension::Type => self.selected_types.contains(value),
        }
    }

    pub fn clear(&mut self) {
        self.selected_brands.clear();
        self.selected_types.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected_brands.is_empty() && self.selected_types.is_empty()
    }

    pub fn brands(&self) -> &BTreeSet<String> {
        &self.selected_brands
    }

    pub fn types(&self) -> &BTreeSet<String> {
        &self.selected_types
    }

    /// Comma-joined brand parameter, `None` when nothing is selected.
    pub fn brands_param(&self) -> Option<String> {
        (!self.selected_brands.is_empty()).then(|| self.selected_brands.iter().join(","))
    }

    /// Comma-joined type parameter, `None` when nothing is selected.
    pub fn types_param(&self) -> Option<String> {
        (!self.selected_types.is_empty()).then(|| self.selected_types.iter().join(","))
    }
}
