use proptest::prelude::*;

use backroom::{
    core::fixtures::{SUBURBS, sample_draft, seed_listings},
    listing::Listing,
    query::{self, PriceRange, QueryParams, SortKey},
};

const WORDS: [&str; 6] = ["Backroom", "Cottage", "Flatlet", "Garden", "Safe", "Studio"];

fn listing_from(i: usize, word: usize, suburb: usize, price: u32, safety: u8, ts: u16) -> Listing {
    let mut draft = sample_draft(&format!("{} {i}", WORDS[word]), price);
    draft.description = format!("Near {} taxi rank", SUBURBS[suburb]);
    draft.address.suburb = SUBURBS[suburb].to_string();
    draft.safety = safety;
    draft.into_listing(format!("p-{i}"), u64::from(ts))
}

fn listings_strategy() -> impl Strategy<Value = Vec<Listing>> {
    prop::collection::vec(
        (
            0usize..WORDS.len(),
            0usize..SUBURBS.len(),
            0u32..6_000,
            0u8..=100,
            0u16..50,
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (w, s, p, safety, ts))| listing_from(i, w, s, p, safety, ts))
            .collect()
    })
}

fn params_strategy() -> impl Strategy<Value = QueryParams> {
    (
        prop::sample::select(vec!["", "room", "GARDEN", "safe", "taxi", "zzz"]),
        prop::option::of(prop::sample::select(SUBURBS.to_vec())),
        prop::sample::select(PriceRange::ALL.to_vec()),
        prop::sample::select(SortKey::ALL.to_vec()),
    )
        .prop_map(|(search, suburb, price, sort)| QueryParams {
            search: search.to_string(),
            suburb: suburb.map(str::to_string),
            price,
            sort,
        })
}

fn expected_match(l: &Listing, p: &QueryParams) -> bool {
    let needle = p.search.to_lowercase();
    let text = needle.is_empty()
        || l.title.to_lowercase().contains(&needle)
        || l.description.to_lowercase().contains(&needle);
    let suburb = p.suburb.as_ref().is_none_or(|s| &l.address.suburb == s);
    let price = match p.price {
        PriceRange::Any => true,
        PriceRange::R500To1500 => l.price >= 500 && l.price <= 1500,
        PriceRange::R1500To2500 => l.price > 1500 && l.price <= 2500,
        PriceRange::R2500To3500 => l.price > 2500 && l.price <= 3500,
        PriceRange::R3500To5000 => l.price > 3500 && l.price <= 5000,
    };
    text && suburb && price
}

fn ids(items: &[&Listing]) -> Vec<String> {
    items.iter().map(|l| l.id.clone()).collect()
}

fn in_order(a: &Listing, b: &Listing, key: SortKey) -> bool {
    match key {
        SortKey::Recent => a.created_at >= b.created_at,
        SortKey::PriceAsc => a.price <= b.price,
        SortKey::PriceDesc => a.price >= b.price,
        SortKey::Safety => a.safety >= b.safety,
    }
}

fn tied(a: &Listing, b: &Listing, key: SortKey) -> bool {
    match key {
        SortKey::Recent => a.created_at == b.created_at,
        SortKey::PriceAsc | SortKey::PriceDesc => a.price == b.price,
        SortKey::Safety => a.safety == b.safety,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn filter_equals_full_scan_in_input_order(
        listings in listings_strategy(),
        params in params_strategy(),
    ) {
        let got = query::filter(&listings, &params);
        let expected: Vec<&Listing> = listings.iter().filter(|l| expected_match(l, &params)).collect();
        prop_assert_eq!(ids(&got), ids(&expected));
    }

    #[test]
    fn run_orders_filtered_set_stably(
        listings in listings_strategy(),
        params in params_strategy(),
    ) {
        let filtered = query::filter(&listings, &params);
        let result = query::run(&listings, &params);

        let mut a = ids(&filtered);
        let mut b = ids(&result);
        a.sort();
        b.sort();
        prop_assert_eq!(a, b);

        for w in result.windows(2) {
            prop_assert!(in_order(w[0], w[1], params.sort));
        }

        // Ties keep their input order.
        let position = |id: &str| listings.iter().position(|l| l.id == id);
        for w in result.windows(2) {
            if tied(w[0], w[1], params.sort) {
                prop_assert!(position(w[0].id.as_str()) < position(w[1].id.as_str()));
            }
        }
    }

    #[test]
    fn sorting_twice_changes_nothing(
        listings in listings_strategy(),
        params in params_strategy(),
    ) {
        let once = query::run(&listings, &params);
        let mut twice = once.clone();
        query::sort_by_key(&mut twice, params.sort);
        prop_assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn every_price_lands_in_at_most_one_bucket(price in 0u32..8_000) {
        let hits = PriceRange::ALL[1..].iter().filter(|r| r.contains(price)).count();
        if (500..=5000).contains(&price) {
            prop_assert_eq!(hits, 1);
        } else {
            prop_assert_eq!(hits, 0);
        }
        prop_assert!(PriceRange::Any.contains(price));
    }
}

#[test]
fn default_params_return_everything_newest_first() {
    let seed = seed_listings();
    let result = query::run(&seed, &QueryParams::new());
    assert_eq!(result.len(), seed.len());
    assert!(result.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[test]
fn safe_search_with_safety_sort_finds_only_the_cottage() {
    let seed = seed_listings();
    let params = QueryParams::new().search("SAFE").sort(SortKey::Safety);
    let result = query::run(&seed, &params);
    assert_eq!(ids(&result), vec!["seed-3".to_string()]);
}

#[test]
fn unknown_suburb_yields_empty_result() {
    let seed = seed_listings();
    let params = QueryParams::new().suburb("Sandton");
    assert!(query::run(&seed, &params).is_empty());
}

#[test]
fn cheap_rooms_by_price() {
    let seed = seed_listings();
    let params = QueryParams::new()
        .search("room")
        .price(PriceRange::R500To1500)
        .sort(SortKey::PriceAsc);
    assert_eq!(
        ids(&query::run(&seed, &params)),
        vec!["seed-4".to_string(), "seed-2".to_string()]
    );
}
