//! Ordered, toggleable multi-key sort state.
//!
//! Each sortable field cycles through three states independently of the
//! other fields: inactive, ascending, descending. The order in which
//! fields became active encodes their priority, with the first entry as
//! the primary sort key.

use std::str::FromStr;

use bristle_catalog::DEFAULT_SORT;
use itertools::Itertools;
use thiserror::Error;

/// A product attribute results can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Price,
    Battery,
    Waterproof,
}

impl SortField {
    /// All sortable fields, in the order their controls are presented.
    pub const ALL: [SortField; 3] = [SortField::Price, SortField::Battery, SortField::Waterproof];

    /// Wire token for this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::Battery => "battery",
            SortField::Waterproof => "waterproof",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort field '{0}', expected one of: price, battery, waterproof")]
pub struct UnknownSortField(pub String);

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(SortField::Price),
            "battery" => Ok(SortField::Battery),
            "waterproof" => Ok(SortField::Waterproof),
            _ => Err(UnknownSortField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Wire token suffix for this direction.
    pub fn suffix(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    /// Arrow shown on an active sort control.
    pub fn glyph(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// One `(field, direction)` pair of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortDirective {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortDirective {
    /// Wire token, e.g. `price_desc`.
    pub fn as_param(&self) -> String {
        format!("{}_{}", self.field.as_str(), self.direction.suffix())
    }
}

/// Ordered sequence of sort directives holding at most one entry per
/// field; earlier entries sort first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortPriorityList {
    entries: Vec<SortDirective>,
}

impl SortPriorityList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance `field` through its three-state cycle.
    ///
    /// An inactive field is appended ascending at the lowest priority. An
    /// ascending entry flips to descending in place, keeping its priority.
    /// A descending entry is removed, promoting every entry behind it by
    /// one position. No other field's entry is touched.
    pub fn toggle(&mut self, field: SortField) {
        match self.entries.iter().position(|d| d.field == field) {
            None => self.entries.push(SortDirective {
                field,
                direction: SortDirection::Ascending,
            }),
            Some(index) => match self.entries[index].direction {
                SortDirection::Ascending => {
                    self.entries[index].direction = SortDirection::Descending;
                },
                SortDirection::Descending => {
                    self.entries.remove(index);
                },
            },
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[SortDirective] {
        &self.entries
    }

    /// Direction for `field`, if it is part of the active sort.
    pub fn direction_of(&self, field: SortField) -> Option<SortDirection> {
        self.entries
            .iter()
            .find(|d| d.field == field)
            .map(|d| d.direction)
    }

    /// 1-based priority badge for `field`.
    ///
    /// A badge is only shown when more than one directive is active;
    /// a lone directive is unambiguous without one.
    pub fn priority_badge(&self, field: SortField) -> Option<usize> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries
            .iter()
            .position(|d| d.field == field)
            .map(|index| index + 1)
    }

    /// Wire encoding: comma-joined directive tokens in priority order, or
    /// the default token when no directive is active.
    pub fn as_param(&self) -> String {
        if self.entries.is_empty() {
            return DEFAULT_SORT.to_string();
        }
        self.entries.iter().map(SortDirective::as_param).join(",")
    }
}
