//! Catalog filter/sort engine.
//!
//! A pure, synchronous transformation from the raw fetched list plus the
//! current selection to the list actually rendered. Filters are an AND
//! chain of independent predicates; sort runs last. The raw list is
//! bounded by the fetch limit, so full recomputation on every input
//! change is the whole strategy - nothing is patched incrementally.

use crate::api::types::Product;

/// Sort applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Insertion order, i.e., whatever the query pipeline returned.
    #[default]
    Default,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Alphabetical by name, case-insensitive.
    NameAsc,
}

/// The current filter/sort selection. `None` dimensions mean "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Top-level catalog mode ("jerseys" / "posters"). Partially redundant
    /// with the query pipeline's server-side category parameter; kept so a
    /// mode switch re-derives instantly from the list already in hand.
    pub category_slug: Option<String>,
    /// Size, matched after trim+uppercase normalization.
    pub size: Option<String>,
    /// Manufacturer brand.
    pub brand: Option<String>,
    /// League.
    pub league: Option<String>,
    /// Club, matched against the product's team field.
    pub club: Option<String>,
    /// Season label.
    pub season: Option<String>,
    /// Kit type.
    pub kit_type: Option<String>,
    /// Sort selection.
    pub sort: SortOrder,
}

impl CatalogFilter {
    /// Derive the rendered list from `products`.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut derived: Vec<Product> = products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();

        match self.sort {
            SortOrder::Default => {}
            SortOrder::PriceAsc => derived.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceDesc => derived.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::NameAsc => {
                derived.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            }
        }

        derived
    }

    fn matches(&self, product: &Product) -> bool {
        matches_opt(self.category_slug.as_deref(), product.category_slug())
            && matches_size(self.size.as_deref(), product.size.as_deref())
            && matches_opt(self.brand.as_deref(), product.brand.as_deref())
            && matches_opt(self.league.as_deref(), product.league.as_deref())
            && matches_opt(self.club.as_deref(), product.team.as_deref())
            && matches_opt(self.season.as_deref(), product.season.as_deref())
            && matches_opt(self.kit_type.as_deref(), product.kit_type.as_deref())
    }
}

/// A `None` filter matches everything; a selected value requires equality.
fn matches_opt(selected: Option<&str>, actual: Option<&str>) -> bool {
    selected.is_none_or(|wanted| actual == Some(wanted))
}

/// Size matching normalizes both sides: the source field is free text.
fn matches_size(selected: Option<&str>, actual: Option<&str>) -> bool {
    selected.is_none_or(|wanted| {
        actual.is_some_and(|size| canonical_size(size) == canonical_size(wanted))
    })
}

// =============================================================================
// Size canonicalization
// =============================================================================

/// Canonical size ordering for display.
const SIZE_ORDER: [&str; 7] = ["XS", "S", "M", "L", "XL", "XXL", "XXXL"];

/// Normalize a free-text size label (trim + uppercase).
#[must_use]
pub fn canonical_size(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Rank of a size in the canonical order, if known.
#[must_use]
pub fn size_rank(size: &str) -> Option<usize> {
    let canonical = canonical_size(size);
    SIZE_ORDER.iter().position(|s| *s == canonical)
}

/// Sort size labels for display: canonical order first, unknown sizes
/// after known ones, alphabetically among themselves.
pub fn sort_sizes(sizes: &mut [String]) {
    sizes.sort_by(|a, b| match (size_rank(a), size_rank(b)) {
        (Some(ra), Some(rb)) => ra.cmp(&rb),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => canonical_size(a).cmp(&canonical_size(b)),
    });
}

// =============================================================================
// Club lookup
// =============================================================================

/// Fixed club lookup table keyed by league. The filter UI only offers
/// clubs from the selected league's row.
pub const LEAGUE_CLUBS: &[(&str, &[&str])] = &[
    (
        "Premier League",
        &[
            "Arsenal",
            "Chelsea",
            "Liverpool",
            "Manchester City",
            "Manchester United",
            "Tottenham Hotspur",
        ],
    ),
    (
        "La Liga",
        &["Atletico Madrid", "Barcelona", "Real Madrid", "Sevilla"],
    ),
    (
        "Serie A",
        &["AC Milan", "Inter", "Juventus", "Napoli", "Roma"],
    ),
    (
        "Bundesliga",
        &[
            "Bayer Leverkusen",
            "Bayern Munich",
            "Borussia Dortmund",
            "RB Leipzig",
        ],
    ),
    (
        "Ligue 1",
        &["Lyon", "Marseille", "Monaco", "Paris Saint-Germain"],
    ),
];

/// Clubs offered for a league; empty for unknown leagues.
#[must_use]
pub fn clubs_for_league(league: &str) -> &'static [&'static str] {
    LEAGUE_CLUBS
        .iter()
        .find(|(name, _)| *name == league)
        .map_or(&[], |(_, clubs)| clubs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tifo_core::{Price, ProductId};

    fn product(id: i64, name: &str, price: i64, size: Option<&str>) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: None,
            price: Price::from_rubles(price),
            tg_post_url: None,
            team: None,
            size: size.map(ToString::to_string),
            brand: None,
            league: None,
            season: None,
            kit_type: None,
            image_url: None,
            category_id: None,
            category: None,
            gallery: Vec::new(),
        }
    }

    fn sizes_fixture() -> Vec<Product> {
        vec![
            product(1, "A", 100, Some("M")),
            product(2, "B", 200, Some("L")),
            product(3, "C", 300, Some("M")),
            product(4, "D", 400, Some("S")),
            product(5, "E", 500, Some("XL")),
        ]
    }

    #[test]
    fn test_size_filter_selects_exact_matches() {
        let filter = CatalogFilter {
            size: Some("M".to_string()),
            ..CatalogFilter::default()
        };
        let derived = filter.apply(&sizes_fixture());
        assert_eq!(derived.len(), 2);
        assert!(derived.iter().all(|p| p.size.as_deref() == Some("M")));
    }

    #[test]
    fn test_size_filter_normalizes_both_sides() {
        let products = vec![product(1, "A", 100, Some(" m ")), product(2, "B", 200, Some("L"))];
        let filter = CatalogFilter {
            size: Some("M".to_string()),
            ..CatalogFilter::default()
        };
        let derived = filter.apply(&products);
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].id, ProductId::new(1));
    }

    #[test]
    fn test_empty_filter_keeps_insertion_order() {
        let products = sizes_fixture();
        let derived = CatalogFilter::default().apply(&products);
        assert_eq!(derived, products);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let products = sizes_fixture();
        let filter = CatalogFilter {
            size: Some("M".to_string()),
            sort: SortOrder::PriceDesc,
            ..CatalogFilter::default()
        };
        let once = filter.apply(&products);
        let twice = filter.apply(&products);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_price_sort() {
        let filter = CatalogFilter {
            sort: SortOrder::PriceDesc,
            ..CatalogFilter::default()
        };
        let derived = filter.apply(&sizes_fixture());
        let prices: Vec<_> = derived.iter().map(|p| p.price).collect();
        let mut expected = prices.clone();
        expected.sort_by(|a, b| b.cmp(a));
        assert_eq!(prices, expected);
    }

    #[test]
    fn test_name_sort_case_insensitive() {
        let products = vec![
            product(1, "zebra kit", 100, None),
            product(2, "Arsenal", 200, None),
            product(3, "milan", 300, None),
        ];
        let filter = CatalogFilter {
            sort: SortOrder::NameAsc,
            ..CatalogFilter::default()
        };
        let names: Vec<_> = filter.apply(&products).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Arsenal", "milan", "zebra kit"]);
    }

    #[test]
    fn test_filters_chain_as_and() {
        let mut products = sizes_fixture();
        if let Some(first) = products.first_mut() {
            first.brand = Some("adidas".to_string());
        }
        let filter = CatalogFilter {
            size: Some("M".to_string()),
            brand: Some("adidas".to_string()),
            ..CatalogFilter::default()
        };
        let derived = filter.apply(&products);
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].id, ProductId::new(1));
    }

    #[test]
    fn test_size_rank_and_sort() {
        let mut sizes = vec![
            "46".to_string(),
            "XL".to_string(),
            "m".to_string(),
            "Youth".to_string(),
            " s ".to_string(),
        ];
        sort_sizes(&mut sizes);
        assert_eq!(sizes, vec![" s ", "m", "XL", "46", "Youth"]);
    }

    #[test]
    fn test_clubs_for_league() {
        assert!(clubs_for_league("Serie A").contains(&"Juventus"));
        assert!(clubs_for_league("Conference of Nowhere").is_empty());
    }
}
