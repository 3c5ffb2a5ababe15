// tests/sift.rs
//
// Relevance & dedup filter: dedup policies, ordering, report accounting,
// plus for-all properties over generated batches.

use std::collections::HashSet;

use listing_sift::classify::{Verdict, classify};
use listing_sift::listing::{NormalizeOptions, NormalizedListing, RawRecord, normalize};
use listing_sift::sift::{DedupPolicy, DiscardReason, sift};
use listing_sift::vocab::Vocabulary;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn batch(raws: &[RawRecord]) -> Vec<NormalizedListing> {
    let opts = NormalizeOptions::default();
    raws.iter()
        .enumerate()
        .filter_map(|(i, r)| normalize(r, "iphone", &opts).ok().map(|l| l.at_position(i)))
        .collect()
}

const AD: &str = "https://www.donedeal.ie/phones-for-sale/iphone-12-64gb/36012345";

#[test]
fn scenario_duplicate_collapses_to_one() {
    let listings = batch(&[
        RawRecord::new("iPhone 12 64GB", "€250", AD),
        RawRecord::new("iPhone 12 64gb excellent", "€250", &format!("{AD}?utm_source=facebook")),
    ]);
    let (results, report) = sift(listings, "iphone", &Vocabulary::builtin(), DedupPolicy::FirstSeen);

    assert_eq!(results.len(), 1);
    assert_eq!(results.as_slice()[0].title(), "iPhone 12 64GB");
    assert_eq!(report.count(DiscardReason::Duplicate), 1);
    let dup = report.entries_for(DiscardReason::Duplicate).next().unwrap();
    assert_eq!(dup.title, "iPhone 12 64gb excellent");
    assert_eq!(dup.position, 1);
    assert_eq!(dup.term.as_deref(), Some("iPhone 12 64GB"));
}

#[test]
fn lowest_price_policy_keeps_cheapest_in_group() {
    // both round to 250 units, so they share an identity
    let raws = [
        RawRecord::new("iPhone 12", "€250.40", AD),
        RawRecord::new("iPhone 12 reduced", "€249.60", AD),
    ];
    let vocab = Vocabulary::builtin();

    let (first, _) = sift(batch(&raws), "iphone", &vocab, DedupPolicy::FirstSeen);
    assert_eq!(first.as_slice()[0].title(), "iPhone 12");

    let (lowest, report) = sift(batch(&raws), "iphone", &vocab, DedupPolicy::LowestPrice);
    assert_eq!(lowest.len(), 1);
    assert_eq!(lowest.as_slice()[0].title(), "iPhone 12 reduced");
    assert_eq!(report.entries_for(DiscardReason::Duplicate).next().unwrap().title, "iPhone 12");
}

#[test]
fn lowest_price_ties_go_to_earliest() {
    let raws = [
        RawRecord::new("iPhone 12 a", "€250", AD),
        RawRecord::new("iPhone 12 b", "€250", AD),
    ];
    let (results, _) = sift(batch(&raws), "iphone", &Vocabulary::builtin(), DedupPolicy::LowestPrice);
    assert_eq!(results.as_slice()[0].title(), "iPhone 12 a");
}

#[test]
fn different_prices_stay_distinct() {
    let raws = [
        RawRecord::new("iPhone 12 64GB", "€250", ""),
        RawRecord::new("iPhone 12 64GB", "€260", ""),
    ];
    let (results, report) = sift(batch(&raws), "iphone", &Vocabulary::builtin(), DedupPolicy::FirstSeen);
    assert_eq!(results.len(), 2);
    assert!(report.is_empty());
}

#[test]
fn sorted_by_price_with_stable_ties() {
    let raws = [
        RawRecord::new("iPhone 13", "€500", ""),
        RawRecord::new("iPhone 11 red", "€200", ""),
        RawRecord::new("iPhone X", "€150", ""),
        RawRecord::new("iPhone 11 black", "€200", ""),
    ];
    let (results, _) = sift(batch(&raws), "iphone", &Vocabulary::builtin(), DedupPolicy::FirstSeen);
    let titles: Vec<&str> = results.iter().map(|l| l.title()).collect();
    assert_eq!(titles, ["iPhone X", "iPhone 11 red", "iPhone 11 black", "iPhone 13"]);
}

#[test]
fn report_counts_each_reason() {
    let raws = [
        RawRecord::new("iPhone 12 64GB Good Condition", "€250", ""),
        RawRecord::new("Case for iPhone 12", "€10", ""),
        RawRecord::new("Toyota Corolla 2015", "€8000", ""),
        RawRecord::new("iPad Pro 11 inch", "€400", ""),
        RawRecord::new("Samsung Galaxy S21", "€300", ""),
        RawRecord::new("iPhone 12 64GB Good Condition", "€250", ""),
    ];
    let (results, report) = sift(batch(&raws), "iphone", &Vocabulary::builtin(), DedupPolicy::FirstSeen);

    assert_eq!(results.len(), 1);
    assert_eq!(report.total(), 5);
    for reason in DiscardReason::ALL {
        assert_eq!(report.count(reason), 1, "{:?}", reason);
    }
    assert_eq!(report.counts().values().sum::<usize>(), 5);
}

#[test]
fn price_summary_over_results() {
    let raws = [
        RawRecord::new("iPhone 13", "€500", ""),
        RawRecord::new("iPhone 11", "€200", ""),
        RawRecord::new("iPhone X", "€150", ""),
    ];
    let (results, _) = sift(batch(&raws), "iphone", &Vocabulary::builtin(), DedupPolicy::FirstSeen);
    let ps = results.price_summary().unwrap();
    assert_eq!(ps.count, 3);
    assert_eq!(ps.min, Decimal::from(150));
    assert_eq!(ps.max, Decimal::from(500));
    assert_eq!(ps.mean, Decimal::new(28333, 2));

    let (empty, _) = sift(Vec::new(), "iphone", &Vocabulary::builtin(), DedupPolicy::FirstSeen);
    assert!(empty.price_summary().is_none());
}

#[test]
fn price_summary_survives_totals_past_decimal_max() {
    let raws = [
        RawRecord::new("iPhone 12", "79228162514264337593543950335", "https://example.com/ad/10000001"),
        RawRecord::new("iPhone 13", "79228162514264337593543950335", "https://example.com/ad/10000002"),
    ];
    let (results, _) = sift(batch(&raws), "iphone", &Vocabulary::builtin(), DedupPolicy::FirstSeen);
    assert_eq!(results.len(), 2);
    let ps = results.price_summary().unwrap();
    assert_eq!(ps.max, Decimal::MAX);
    assert!(ps.mean >= ps.min - Decimal::ONE && ps.mean <= ps.max);
}

#[test]
fn slug_link_duplicate_collapses_to_one() {
    let slug = "https://www.donedeal.ie/phones-for-sale/iphone-12-64gb/abc123";
    let listings = batch(&[
        RawRecord::new("iPhone 12 64GB", "€250", slug),
        RawRecord::new("iPhone 12 64gb excellent", "€250", &format!("{slug}?utm_source=fb")),
    ]);
    let (results, report) = sift(listings, "iphone", &Vocabulary::builtin(), DedupPolicy::FirstSeen);
    assert_eq!(results.len(), 1);
    assert_eq!(report.count(DiscardReason::Duplicate), 1);
}

/* ---------------- Properties ---------------- */

const TITLES: &[&str] = &[
    "iPhone 12 64GB",
    "iPhone 12 64gb excellent",
    "iPhone 13 Pro",
    "Case for iPhone 12",
    "iPhone charger cable",
    "Toyota Corolla",
    "iPad Air",
    "Samsung Galaxy S21",
    "I phone 8",
];

const URLS: &[&str] = &[
    "",
    "https://www.donedeal.ie/phones/iphone/36012345",
    "https://www.donedeal.ie/phones/iphone/36012345?utm_source=x",
    "https://www.donedeal.ie/phones/iphone/36099999",
];

fn raw_strategy() -> impl Strategy<Value = RawRecord> {
    (0..TITLES.len(), prop::sample::select(vec![100u32, 150, 250, 250, 300]), 0..URLS.len())
        .prop_map(|(t, p, u)| RawRecord::new(TITLES[t], &format!("€{p}"), URLS[u]))
}

fn policy_strategy() -> impl Strategy<Value = DedupPolicy> {
    prop_oneof![Just(DedupPolicy::FirstSeen), Just(DedupPolicy::LowestPrice)]
}

proptest! {
    #[test]
    fn sift_invariants(raws in prop::collection::vec(raw_strategy(), 0..40), policy in policy_strategy()) {
        let vocab = Vocabulary::builtin();
        let listings = batch(&raws);
        let n = listings.len();
        let (results, report) = sift(listings, "iphone", &vocab, policy);

        // unique identity keys
        let keys: HashSet<&str> = results.iter().map(|l| l.identity_key()).collect();
        prop_assert_eq!(keys.len(), results.len());

        // non-decreasing price
        for w in results.as_slice().windows(2) {
            prop_assert!(w[0].price() <= w[1].price());
        }

        // every kept listing is relevant
        for l in &results {
            prop_assert_eq!(classify(l, "iphone", &vocab), Verdict::Relevant);
        }

        // every input shows up exactly once, kept or discarded
        prop_assert_eq!(results.len() + report.total(), n);
        let mut seen: Vec<usize> = results.iter().map(|l| l.position())
            .chain(report.entries().iter().map(|e| e.position))
            .collect();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), n);
    }

    #[test]
    fn equal_prices_keep_input_order(raws in prop::collection::vec(raw_strategy(), 0..40)) {
        let (results, _) = sift(batch(&raws), "iphone", &Vocabulary::builtin(), DedupPolicy::FirstSeen);
        for w in results.as_slice().windows(2) {
            if w[0].price() == w[1].price() {
                prop_assert!(w[0].position() < w[1].position());
            }
        }
    }

    #[test]
    fn resifting_results_is_a_no_op(raws in prop::collection::vec(raw_strategy(), 0..40), policy in policy_strategy()) {
        let vocab = Vocabulary::builtin();
        let (once, _) = sift(batch(&raws), "iphone", &vocab, policy);
        let (twice, report) = sift(once.clone().into_vec(), "iphone", &vocab, policy);
        prop_assert_eq!(twice, once);
        prop_assert!(report.is_empty());
    }
}
