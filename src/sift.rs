// src/sift.rs
//! Relevance & dedup filter: classify a batch, collapse duplicates by
//! identity key, sort by price. Pure; every input listing ends up either in
//! the `ResultSet` or under exactly one reason in the `DiscardReport`.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::classify::{Exclusion, Verdict, explain_tokens, search_words};
use crate::core::price::mean_price;
use crate::core::sanitize::tokens;
use crate::listing::NormalizedListing;
use crate::vocab::Vocabulary;

/// Which member of an identity group survives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DedupPolicy {
    /// Earliest in input order
    #[default]
    FirstSeen,
    /// Cheapest; ties go to the earliest
    LowestPrice,
}

impl DedupPolicy {
    pub fn label(&self) -> &'static str {
        match self {
            DedupPolicy::FirstSeen => "first",
            DedupPolicy::LowestPrice => "lowest",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "first-seen" | "firstseen" => Some(DedupPolicy::FirstSeen),
            "lowest" | "lowest-price" | "lowestprice" | "cheapest" => Some(DedupPolicy::LowestPrice),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiscardReason {
    WrongCategory,
    Accessory,
    WrongProduct,
    NoMatch,
    Duplicate,
}

impl DiscardReason {
    pub const ALL: [DiscardReason; 5] = [
        DiscardReason::WrongCategory,
        DiscardReason::Accessory,
        DiscardReason::WrongProduct,
        DiscardReason::NoMatch,
        DiscardReason::Duplicate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DiscardReason::Duplicate => "Duplicate",
            DiscardReason::WrongCategory => Exclusion::WrongCategory.label(),
            DiscardReason::Accessory => Exclusion::Accessory.label(),
            DiscardReason::WrongProduct => Exclusion::WrongProduct.label(),
            DiscardReason::NoMatch => Exclusion::NoMatch.label(),
        }
    }
}

impl From<Exclusion> for DiscardReason {
    fn from(x: Exclusion) -> Self {
        match x {
            Exclusion::WrongCategory => DiscardReason::WrongCategory,
            Exclusion::Accessory => DiscardReason::Accessory,
            Exclusion::WrongProduct => DiscardReason::WrongProduct,
            Exclusion::NoMatch => DiscardReason::NoMatch,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscardEntry {
    pub reason: DiscardReason,
    /// Vocabulary term that fired; for duplicates, the kept listing's title
    pub term: Option<String>,
    pub title: String,
    pub price: Decimal,
    pub url: String,
    /// Raw input position of the discarded listing
    pub position: usize,
    pub identity_key: String,
}

impl DiscardEntry {
    fn new(reason: DiscardReason, term: Option<String>, l: &NormalizedListing) -> Self {
        Self {
            reason,
            term,
            title: s!(l.title()),
            price: l.price(),
            url: s!(l.url()),
            position: l.position(),
            identity_key: s!(l.identity_key()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscardReport {
    entries: Vec<DiscardEntry>,
}

impl DiscardReport {
    fn push(&mut self, entry: DiscardEntry) {
        self.entries.push(entry);
    }

    /// Count per reason; reasons with no entries are absent.
    pub fn counts(&self) -> BTreeMap<DiscardReason, usize> {
        let mut out = BTreeMap::new();
        for e in &self.entries {
            *out.entry(e.reason).or_insert(0) += 1;
        }
        out
    }

    pub fn count(&self, reason: DiscardReason) -> usize {
        self.entries.iter().filter(|e| e.reason == reason).count()
    }

    pub fn entries_for(&self, reason: DiscardReason) -> impl Iterator<Item = &DiscardEntry> {
        self.entries.iter().filter(move |e| e.reason == reason)
    }

    pub fn entries(&self) -> &[DiscardEntry] { &self.entries }
    pub fn total(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

/// Relevant, deduplicated listings in ascending price order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultSet {
    listings: Vec<NormalizedListing>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceSummary {
    pub count: usize,
    pub min: Decimal,
    pub max: Decimal,
    /// Rounded to cents
    pub mean: Decimal,
}

impl ResultSet {
    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedListing> { self.listings.iter() }
    pub fn len(&self) -> usize { self.listings.len() }
    pub fn is_empty(&self) -> bool { self.listings.is_empty() }
    pub fn as_slice(&self) -> &[NormalizedListing] { &self.listings }
    pub fn into_vec(self) -> Vec<NormalizedListing> { self.listings }

    /// None for an empty set.
    pub fn price_summary(&self) -> Option<PriceSummary> {
        let first = self.listings.first()?;
        let last = self.listings.last()?;
        let prices: Vec<Decimal> = self.listings.iter().map(|l| l.price()).collect();
        Some(PriceSummary {
            count: prices.len(),
            min: first.price(),
            max: last.price(),
            mean: mean_price(&prices)?,
        })
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a NormalizedListing;
    type IntoIter = std::slice::Iter<'a, NormalizedListing>;
    fn into_iter(self) -> Self::IntoIter { self.listings.iter() }
}

pub fn sift(
    listings: Vec<NormalizedListing>,
    search_term: &str,
    vocab: &Vocabulary,
    policy: DedupPolicy,
) -> (ResultSet, DiscardReport) {
    let family = vocab.resolve_family(&tokens(search_term));
    let words = search_words(search_term);
    let mut report = DiscardReport::default();

    // (sift-input index, listing)
    let mut relevant: Vec<(usize, NormalizedListing)> = Vec::with_capacity(listings.len());
    for (seq, listing) in listings.into_iter().enumerate() {
        let c = explain_tokens(listing.title_tokens(), &words, family, vocab);
        match c.verdict {
            Verdict::Relevant => relevant.push((seq, listing)),
            Verdict::Excluded(why) => report.push(DiscardEntry::new(why.into(), c.term, &listing)),
        }
    }

    let mut kept = dedup(relevant, policy, &mut report);

    kept.sort_by_key(|(seq, _)| *seq);
    kept.sort_by(|(_, a), (_, b)| a.price().cmp(&b.price())); // stable

    let listings = kept.into_iter().map(|(_, l)| l).collect();
    (ResultSet { listings }, report)
}

fn dedup(
    relevant: Vec<(usize, NormalizedListing)>,
    policy: DedupPolicy,
    report: &mut DiscardReport,
) -> Vec<(usize, NormalizedListing)> {
    let mut kept: Vec<(usize, NormalizedListing)> = Vec::with_capacity(relevant.len());
    let mut by_key: HashMap<String, usize> = HashMap::new();

    for (seq, listing) in relevant {
        let Some(&slot) = by_key.get(listing.identity_key()) else {
            by_key.insert(s!(listing.identity_key()), kept.len());
            kept.push((seq, listing));
            continue;
        };

        let cheaper = listing.price() < kept[slot].1.price();
        let loser = if policy == DedupPolicy::LowestPrice && cheaper {
            std::mem::replace(&mut kept[slot], (seq, listing)).1
        } else {
            listing
        };
        let winner_title = s!(kept[slot].1.title());
        report.push(DiscardEntry::new(DiscardReason::Duplicate, Some(winner_title), &loser));
    }
    kept
}
