//! Rendering for catalog output.

use std::fmt::Display;

use bristle_catalog::{Product, TopSearch};
use bristle_core::pagination::PageView;
use itertools::Itertools;

/// An intermediate representation of a product used for rendering
#[derive(Debug, PartialEq, Clone)]
struct DisplayProduct {
    name: String,
    brand: String,
    price: String,
    rating: String,
    review_count: String,
}

/// Renders a product list as a column-aligned table, one product per
/// line.
pub struct DisplayProducts(Vec<DisplayProduct>);

impl From<&[Product]> for DisplayProducts {
    fn from(products: &[Product]) -> Self {
        Self(
            products
                .iter()
                .map(|p| DisplayProduct {
                    name: p.name.replace('\n', " "),
                    brand: p.brand.clone(),
                    price: p.price.clone(),
                    rating: p.rating.clone(),
                    review_count: p.review_count.clone(),
                })
                .collect(),
        )
    }
}

impl Display for DisplayProducts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name_width = self.0.iter().map(|p| p.name.len()).max().unwrap_or_default();
        let brand_width = self
            .0
            .iter()
            .map(|p| p.brand.len())
            .max()
            .unwrap_or_default();
        let price_width = self
            .0
            .iter()
            .map(|p| p.price.len())
            .max()
            .unwrap_or_default();

        let mut items = self.0.iter().peekable();
        while let Some(p) = items.next() {
            write!(
                f,
                "{name:<name_width$}  {brand:<brand_width$}  {price:>price_width$}  {rating} ({reviews} reviews)",
                name = p.name,
                brand = p.brand,
                price = p.price,
                rating = p.rating,
                reviews = p.review_count,
            )?;
            // Only print a newline if there are more items to print
            if items.peek().is_some() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Renders the top-searches panel, one term per line.
pub struct DisplayTopSearches<'a>(&'a [TopSearch]);

impl<'a> DisplayTopSearches<'a> {
    pub fn new(top_searches: &'a [TopSearch]) -> Self {
        Self(top_searches)
    }
}

impl Display for DisplayTopSearches<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let term_width = self
            .0
            .iter()
            .map(|t| t.term.len())
            .max()
            .unwrap_or_default();

        let mut items = self.0.iter().peekable();
        while let Some(t) = items.next() {
            write!(
                f,
                "{term:<term_width$}  {count}",
                term = t.term,
                count = t.count
            )?;
            if items.peek().is_some() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// One-line trending summary for the interactive view.
pub fn trending_line(top_searches: &[TopSearch]) -> String {
    let terms = top_searches
        .iter()
        .map(|t| format!("{} ({})", t.term, t.count))
        .join(", ");
    format!("Trending: {terms}")
}

/// Pagination footer for the interactive view.
pub fn page_footer(view: PageView) -> String {
    format!(
        "Page {page} of {total_pages} ({total} products)",
        page = view.page,
        total_pages = view.total_pages(),
        total = view.total,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn product(name: &str, brand: &str, price: &str) -> Product {
        Product {
            name: name.to_string(),
            brand: brand.to_string(),
            price: price.to_string(),
            rating: "4.5".to_string(),
            review_count: "1,204".to_string(),
            description: String::new(),
            image_url: String::new(),
            product_url: String::new(),
            toothbrush_type: None,
            battery_life: None,
            waterproof_rating: None,
        }
    }

    #[test]
    fn products_align_on_the_widest_cell() {
        let products = vec![
            product("Sonicare 9900 Prestige", "Philips", "$299.99"),
            product("iO Series 3", "Oral-B", "$79.99"),
        ];
        let rendered = DisplayProducts::from(products.as_slice()).to_string();
        assert_eq!(
            rendered,
            "Sonicare 9900 Prestige  Philips  $299.99  4.5 (1,204 reviews)\n\
             iO Series 3             Oral-B    $79.99  4.5 (1,204 reviews)"
        );
    }

    #[test]
    fn trending_line_joins_terms_with_counts() {
        let top = vec![
            TopSearch {
                term: "sonicare".to_string(),
                count: 41,
            },
            TopSearch {
                term: "oral-b".to_string(),
                count: 33,
            },
        ];
        assert_eq!(trending_line(&top), "Trending: sonicare (41), oral-b (33)");
    }

    #[test]
    fn page_footer_reports_totals() {
        assert_eq!(page_footer(PageView::new(38, 2)), "Page 2 of 3 (38 products)");
    }
}
