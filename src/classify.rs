// src/classify.rs
//! Relevance rules, applied in fixed priority (first match wins):
//!
//! 1. category blocklist            → `WrongCategory`
//! 2. accessory term of the family  → `Accessory`
//! 3. sibling product of the family → `WrongProduct`
//! 4. no search word / synonym      → `NoMatch`
//!
//! Rules 2-3 need a family; a search term no family claims skips them.
//! Rule 4 matches each whitespace-separated search word as a whole phrase,
//! so "ps4" needs "ps 4" (or "PS4") in the title, not a lone "4".

use crate::core::sanitize::tokens;
use crate::listing::NormalizedListing;
use crate::vocab::{FamilyVocab, Term, Vocabulary};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Exclusion {
    WrongCategory,
    Accessory,
    WrongProduct,
    NoMatch,
}

impl Exclusion {
    pub const ALL: [Exclusion; 4] = [
        Exclusion::WrongCategory,
        Exclusion::Accessory,
        Exclusion::WrongProduct,
        Exclusion::NoMatch,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Exclusion::WrongCategory => "WrongCategory",
            Exclusion::Accessory => "Accessory",
            Exclusion::WrongProduct => "WrongProduct",
            Exclusion::NoMatch => "NoMatch",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    Relevant,
    Excluded(Exclusion),
}

impl Verdict {
    pub fn is_relevant(&self) -> bool {
        matches!(self, Verdict::Relevant)
    }
}

/// Verdict plus the vocabulary term that fired (None when relevant or `NoMatch`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub verdict: Verdict,
    pub term: Option<String>,
}

impl Classification {
    fn relevant() -> Self {
        Self { verdict: Verdict::Relevant, term: None }
    }

    fn excluded(why: Exclusion, term: Option<&Term>) -> Self {
        Self { verdict: Verdict::Excluded(why), term: term.map(|t| s!(t.text())) }
    }
}

pub fn classify(listing: &NormalizedListing, search_term: &str, vocab: &Vocabulary) -> Verdict {
    explain(listing, search_term, vocab).verdict
}

pub fn explain(listing: &NormalizedListing, search_term: &str, vocab: &Vocabulary) -> Classification {
    let family = vocab.resolve_family(&tokens(search_term));
    explain_tokens(listing.title_tokens(), &search_words(search_term), family, vocab)
}

/// Search term split on whitespace, one phrase per word.
pub fn search_words(search_term: &str) -> Vec<Term> {
    search_term.split_whitespace().filter_map(Term::parse).collect()
}

/// Rule evaluation against pre-tokenized input; `sift` resolves the family once per batch.
pub(crate) fn explain_tokens(
    title: &[String],
    words: &[Term],
    family: Option<&FamilyVocab>,
    vocab: &Vocabulary,
) -> Classification {
    if let Some(t) = first_match(vocab.categories(), title) {
        return Classification::excluded(Exclusion::WrongCategory, Some(t));
    }

    if let Some(fam) = family {
        if let Some(t) = first_match(&fam.accessories, title) {
            return Classification::excluded(Exclusion::Accessory, Some(t));
        }
        if let Some(t) = first_match(&fam.siblings, title) {
            return Classification::excluded(Exclusion::WrongProduct, Some(t));
        }
    }

    let named = words.iter().any(|w| w.matches(title))
        || family.is_some_and(|fam| fam.anchors().any(|t| t.matches(title)));
    if !named {
        return Classification::excluded(Exclusion::NoMatch, None);
    }

    Classification::relevant()
}

fn first_match<'a>(terms: &'a [Term], title: &[String]) -> Option<&'a Term> {
    terms.iter().find(|t| t.matches(title))
}
