// src/models.rs
//! Per-model price summary over a cleaned result set.
//!
//! Model key = family anchor + model words + storage, so
//! "Apple iPhone 12 Pro 128GB Blue" and "iphone12 pro 128 gb unlocked"
//! both land on "iphone 12 pro 128gb".

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::core::price::mean_price;
use crate::core::sanitize::tokens;
use crate::listing::NormalizedListing;
use crate::sift::ResultSet;
use crate::vocab::{FamilyVocab, Vocabulary};

static RE_STORAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,4})\s?(gb|tb)\b").expect("storage pattern")
});

/// Tokens that distinguish variants within a product line.
const MODEL_WORDS: &[&str] = &["pro", "plus", "max", "mini", "ultra", "lite", "se", "oled", "slim", "xl", "xs", "xr", "fe"];

/// Dropped from fallback keys: condition phrases, colours, selling chatter.
const NOISE_WORDS: &[&str] = &[
    "apple", "brand", "new", "used", "mint", "excellent", "good", "great", "perfect", "condition",
    "unlocked", "locked", "boxed", "box", "sealed", "refurbished", "for", "sale", "with", "and",
    "in", "the", "a", "ono", "quick", "cheap", "black", "white", "blue", "red", "green", "gold",
    "silver", "grey", "gray", "purple", "pink", "yellow", "midnight", "starlight", "graphite",
    "space", "rose",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelGroup {
    pub model: String,
    /// Cheapest member's title
    pub representative_title: String,
    pub count: usize,
    pub min: Decimal,
    pub max: Decimal,
    /// Rounded to cents
    pub mean: Decimal,
}

/// Storage capacity as written in the title, normalized ("64 GB" → "64gb").
pub fn storage_of(title_folded: &str) -> Option<String> {
    RE_STORAGE
        .captures(title_folded)
        .map(|c| join!(&c[1], &c[2]))
}

fn is_storage_at(toks: &[String], i: usize) -> bool {
    toks.get(i + 1).is_some_and(|next| next == "gb" || next == "tb")
}

/// Model key of one listing. Falls back to the de-noised title when neither a
/// family anchor nor a search token occurs in it.
pub fn model_key(listing: &NormalizedListing, search: &[String], family: Option<&FamilyVocab>) -> String {
    let toks = listing.title_tokens();

    let family_hit = family.and_then(|fam| {
        fam.anchors()
            .filter_map(|t| t.position_in(toks).map(|pos| (pos, t.tokens().len())))
            .min()
            .map(|(pos, len)| (pos + len, s!(fam.key())))
    });
    let anchor = family_hit.or_else(|| {
        search
            .iter()
            .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
            .find_map(|t| toks.iter().position(|x| x == t).map(|pos| (pos + 1, t.clone())))
    });

    let Some((after, anchor_text)) = anchor else {
        let cleaned: Vec<&str> = toks
            .iter()
            .map(String::as_str)
            .filter(|t| !NOISE_WORDS.contains(t))
            .collect();
        return cleaned.join(" ");
    };

    let mut parts = vec![anchor_text];
    for (i, tok) in toks.iter().enumerate().skip(after) {
        let is_num = tok.chars().all(|c| c.is_ascii_digit());
        if (is_num && !is_storage_at(toks, i)) || MODEL_WORDS.contains(&tok.as_str()) {
            parts.push(tok.clone());
        } else {
            break;
        }
    }
    if let Some(storage) = storage_of(listing.title_folded()) {
        parts.push(storage);
    }
    parts.join(" ")
}

struct Acc {
    representative: String,
    prices: Vec<Decimal>,
}

/// Groups ordered by cheapest price, then model key.
pub fn group_by_model(results: &ResultSet, search_term: &str, vocab: &Vocabulary) -> Vec<ModelGroup> {
    let search = tokens(search_term);
    let family = vocab.resolve_family(&search);

    let mut groups: HashMap<String, Acc> = HashMap::new();
    for listing in results {
        let key = model_key(listing, &search, family);
        groups
            .entry(key)
            .or_insert_with(|| Acc { representative: s!(listing.title()), prices: Vec::new() })
            .prices
            .push(listing.price());
    }

    let mut out: Vec<ModelGroup> = groups
        .into_iter()
        .filter_map(|(model, acc)| {
            let min = acc.prices.iter().min().copied()?;
            let max = acc.prices.iter().max().copied()?;
            let count = acc.prices.len();
            let mean = mean_price(&acc.prices)?;
            Some(ModelGroup {
                model,
                representative_title: acc.representative,
                count,
                min,
                max,
                mean,
            })
        })
        .collect();

    out.sort_by(|a, b| a.min.cmp(&b.min).then_with(|| a.model.cmp(&b.model)));
    out
}
