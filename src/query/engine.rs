use std::cmp::Reverse;

use crate::listing::Listing;

use super::params::{QueryParams, SortKey};

/// Case-folded view of [`QueryParams`] so the search term is lowered once.
struct Matcher<'p> {
    needle: String,
    params: &'p QueryParams,
}

impl<'p> Matcher<'p> {
    fn new(params: &'p QueryParams) -> Self {
        Self {
            needle: params.search.to_lowercase(),
            params,
        }
    }

    fn matches(&self, listing: &Listing) -> bool {
        self.matches_text(listing)
            && self.matches_suburb(listing)
            && self.params.price.contains(listing.price)
    }

    fn matches_text(&self, listing: &Listing) -> bool {
        self.needle.is_empty()
            || listing.title.to_lowercase().contains(&self.needle)
            || listing.description.to_lowercase().contains(&self.needle)
    }

    fn matches_suburb(&self, listing: &Listing) -> bool {
        self.params
            .suburb
            .as_deref()
            .is_none_or(|suburb| listing.address.suburb == suburb)
    }
}

/// True when `listing` passes the text, suburb and price filters.
pub fn matches(listing: &Listing, params: &QueryParams) -> bool {
    Matcher::new(params).matches(listing)
}

/// Listings passing the filters, in their input order.
pub fn filter<'a>(listings: &'a [Listing], params: &QueryParams) -> Vec<&'a Listing> {
    let matcher = Matcher::new(params);
    listings.iter().filter(|l| matcher.matches(l)).collect()
}

/// Stable in-place sort by `key`; ties keep their relative order.
pub fn sort_by_key(items: &mut [&Listing], key: SortKey) {
    match key {
        SortKey::PriceAsc => items.sort_by_key(|l| l.price),
        SortKey::PriceDesc => items.sort_by_key(|l| Reverse(l.price)),
        SortKey::Safety => items.sort_by_key(|l| Reverse(l.safety)),
        SortKey::Recent => items.sort_by_key(|l| Reverse(l.created_at)),
    }
}

/// Filters then sorts; recomputed from scratch on every call.
pub fn run<'a>(listings: &'a [Listing], params: &QueryParams) -> Vec<&'a Listing> {
    let mut out = filter(listings, params);
    sort_by_key(&mut out, params.sort);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::seed_listings;
    use crate::query::params::PriceRange;

    fn ids(items: &[&Listing]) -> Vec<String> {
        items.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let seed = seed_listings();
        let hits = run(&seed, &QueryParams::new().search("SAFE"));
        assert_eq!(ids(&hits), vec!["seed-3"]);

        let hits = run(&seed, &QueryParams::new().search("flatlet"));
        assert_eq!(ids(&hits), vec!["seed-5"]);
    }

    #[test]
    fn suburb_filter_is_exact() {
        let seed = seed_listings();
        assert_eq!(run(&seed, &QueryParams::new().suburb("Soweto")).len(), 1);
        assert!(run(&seed, &QueryParams::new().suburb("soweto")).is_empty());
        assert!(run(&seed, &QueryParams::new().suburb("Sow")).is_empty());
    }

    #[test]
    fn sorts_order_by_requested_key() {
        let seed = seed_listings();
        let asc = run(&seed, &QueryParams::new().sort(SortKey::PriceAsc));
        assert!(asc.windows(2).all(|w| w[0].price <= w[1].price));

        let desc = run(&seed, &QueryParams::new().sort(SortKey::PriceDesc));
        assert!(desc.windows(2).all(|w| w[0].price >= w[1].price));

        let safe = run(&seed, &QueryParams::new().sort(SortKey::Safety));
        assert_eq!(safe[0].id, "seed-3");

        let recent = run(&seed, &QueryParams::new());
        assert!(recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn filters_compose() {
        let seed = seed_listings();
        let params = QueryParams::new()
            .search("room")
            .price(PriceRange::R500To1500)
            .sort(SortKey::PriceAsc);
        let hits = run(&seed, &params);
        assert_eq!(ids(&hits), vec!["seed-4", "seed-2"]);
        assert!(hits.iter().all(|l| matches(l, &params)));
    }
}
