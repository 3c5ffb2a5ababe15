// src/vocab.rs
//! Classifier vocabulary: the data behind the relevance rules.
//!
//! Shape: a global category blocklist plus
//! `family_key -> { accessories, siblings, synonyms }`.
//! New search targets are supported by adding a family here (or in a JSON
//! file), never by adding branches to the classifier.
//!
//! Every term is stored pre-tokenized (see [`crate::core::sanitize::tokens`]),
//! so matching is whole-token and case-insensitive: "case" never fires on
//! "showcase", and "screen protector" matches "Screen-Protector".

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::sanitize::{find_phrase, fold, tokens};

#[derive(Debug, Error)]
pub enum VocabError {
    #[error("cannot read vocabulary {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("malformed vocabulary: {0}")]
    Json(#[from] serde_json::Error),
    #[error("family key is empty")]
    EmptyFamilyKey,
    #[error("family '{0}' is defined twice")]
    DuplicateFamily(String),
    #[error("empty term in {list} of '{family}'")]
    EmptyTerm { family: String, list: &'static str },
}

/// One vocabulary entry, folded and tokenized once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term {
    text: String,
    tokens: Vec<String>,
}

impl Term {
    pub fn parse(text: &str) -> Option<Self> {
        let toks = tokens(text);
        if toks.is_empty() { return None; }
        Some(Self { text: fold(text), tokens: toks })
    }

    pub fn text(&self) -> &str { &self.text }
    pub fn tokens(&self) -> &[String] { &self.tokens }

    /// Whole-token phrase match against already tokenized text.
    pub fn matches(&self, hay: &[String]) -> bool {
        find_phrase(hay, &self.tokens).is_some()
    }

    pub fn position_in(&self, hay: &[String]) -> Option<usize> {
        find_phrase(hay, &self.tokens)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FamilyVocab {
    key: Term,
    pub accessories: Vec<Term>,
    pub siblings: Vec<Term>,
    pub synonyms: Vec<Term>,
}

impl FamilyVocab {
    pub fn key(&self) -> &str { self.key.text() }

    /// Key followed by synonyms: the words that name the family itself.
    pub fn anchors(&self) -> impl Iterator<Item = &Term> {
        std::iter::once(&self.key).chain(self.synonyms.iter())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Vocabulary {
    categories: Vec<Term>,
    families: BTreeMap<String, FamilyVocab>,
}

/* ---------------- File shape ---------------- */

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct VocabFile {
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    families: BTreeMap<String, FamilyFile>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct FamilyFile {
    #[serde(default)]
    accessories: Vec<String>,
    #[serde(default)]
    siblings: Vec<String>,
    #[serde(default)]
    synonyms: Vec<String>,
}

/* ---------------- Construction ---------------- */

fn term_list<S: AsRef<str>>(
    items: &[S],
    family: &str,
    list: &'static str,
) -> Result<Vec<Term>, VocabError> {
    let mut out: Vec<Term> = Vec::with_capacity(items.len());
    for item in items {
        let term = Term::parse(item.as_ref())
            .ok_or_else(|| VocabError::EmptyTerm { family: s!(family), list })?;
        if !out.contains(&term) { out.push(term); }
    }
    Ok(out)
}

impl Vocabulary {
    /// No categories, no families: only the term-absence rule can fire.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn set_categories<S: AsRef<str>>(&mut self, terms: &[S]) -> Result<(), VocabError> {
        self.categories = term_list(terms, "categories", "categories")?;
        Ok(())
    }

    pub fn insert_family<S: AsRef<str>>(
        &mut self,
        key: &str,
        accessories: &[S],
        siblings: &[S],
        synonyms: &[S],
    ) -> Result<(), VocabError> {
        let key_term = Term::parse(key).ok_or(VocabError::EmptyFamilyKey)?;
        let folded = s!(key_term.text());
        if self.families.contains_key(&folded) {
            return Err(VocabError::DuplicateFamily(folded));
        }
        let family = FamilyVocab {
            accessories: term_list(accessories, &folded, "accessories")?,
            siblings: term_list(siblings, &folded, "siblings")?,
            synonyms: term_list(synonyms, &folded, "synonyms")?,
            key: key_term,
        };
        self.families.insert(folded, family);
        Ok(())
    }

    pub fn from_json_str(text: &str) -> Result<Self, VocabError> {
        let file: VocabFile = serde_json::from_str(text)?;
        let mut vocab = Self::empty();
        vocab.set_categories(&file.categories)?;
        for (key, fam) in &file.families {
            vocab.insert_family(key, &fam.accessories, &fam.siblings, &fam.synonyms)?;
        }
        Ok(vocab)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, VocabError> {
        let text = fs::read_to_string(path)
            .map_err(|source| VocabError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text)
    }

    /// Pretty JSON in the same shape `from_json_str` reads.
    pub fn to_json_string(&self) -> Result<String, VocabError> {
        let texts = |terms: &[Term]| terms.iter().map(|t| s!(t.text())).collect::<Vec<_>>();
        let file = VocabFile {
            categories: texts(self.categories.as_slice()),
            families: self
                .families
                .iter()
                .map(|(k, f)| {
                    (k.clone(), FamilyFile {
                        accessories: texts(f.accessories.as_slice()),
                        siblings: texts(f.siblings.as_slice()),
                        synonyms: texts(f.synonyms.as_slice()),
                    })
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// The table shipped with the app.
    pub fn builtin() -> Self {
        let mut vocab = Self::empty();
        // Seeds are static and non-empty; a failure here is a typo in BUILTIN_*
        vocab.set_categories(BUILTIN_CATEGORIES).expect("builtin categories");
        for seed in BUILTIN_FAMILIES {
            vocab
                .insert_family(seed.key, seed.accessories, seed.siblings, seed.synonyms)
                .expect("builtin family");
        }
        vocab
    }
}

/* ---------------- Lookup ---------------- */

impl Vocabulary {
    pub fn categories(&self) -> &[Term] {
        &self.categories
    }

    pub fn family(&self, key: &str) -> Option<&FamilyVocab> {
        self.families.get(&fold(key))
    }

    pub fn families(&self) -> impl Iterator<Item = (&str, &FamilyVocab)> {
        self.families.iter().map(|(k, f)| (k.as_str(), f))
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// Family named by the search term: the one whose key or synonym occurs
    /// earliest in the search tokens (ties → key order). None → unconfigured.
    pub fn resolve_family(&self, search_tokens: &[String]) -> Option<&FamilyVocab> {
        self.families
            .values()
            .filter_map(|fam| {
                fam.anchors()
                    .filter_map(|t| t.position_in(search_tokens))
                    .min()
                    .map(|pos| (pos, fam))
            })
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, fam)| fam)
    }
}

/* ---------------- Built-in table ---------------- */

struct FamilySeed {
    key: &'static str,
    accessories: &'static [&'static str],
    siblings: &'static [&'static str],
    synonyms: &'static [&'static str],
}

/// Cross-posted categories that pollute every search.
const BUILTIN_CATEGORIES: &[&str] = &[
    // vehicles
    "toyota", "volkswagen", "vw", "ford", "bmw", "audi", "mercedes", "honda", "nissan",
    "hyundai", "kia", "skoda", "peugeot", "renault", "opel", "mazda", "tractor", "trailer",
    "caravan", "motorbike", "motorcycle", "hatchback", "saloon", "diesel", "petrol", "nct",
    // real estate
    "apartment", "house for sale", "house to let", "bedroom", "bed apartment", "to let",
    "for rent", "property", "acres", "site for sale",
    // employment
    "jobs", "hiring", "vacancy", "salary", "part time", "full time",
    // pets / animals
    "puppy", "puppies", "dog", "dogs", "kitten", "kittens", "horse", "pony", "foal",
    "lambs", "hens", "parrot", "rabbit",
];

const PHONE_ACCESSORIES: &[&str] = &[
    "case", "cases", "cover", "covers", "charger", "charging cable", "cable", "cables",
    "screen protector", "protector", "tempered glass", "lens protector", "holder", "mount",
    "stand", "skin", "wallet", "strap", "adapter", "power bank", "magsafe", "popsocket",
    "box only", "empty box",
];

const BUILTIN_FAMILIES: &[FamilySeed] = &[
    FamilySeed {
        key: "iphone",
        accessories: PHONE_ACCESSORIES,
        siblings: &["ipad", "ipod", "imac", "macbook", "apple watch", "airpods", "apple tv"],
        synonyms: &["i phone"],
    },
    FamilySeed {
        key: "samsung",
        accessories: PHONE_ACCESSORIES,
        siblings: &["galaxy tab", "galaxy watch", "galaxy buds", "tv", "television", "monitor",
                    "fridge", "freezer", "washing machine", "microwave", "soundbar"],
        synonyms: &["galaxy"],
    },
    FamilySeed {
        key: "pixel",
        accessories: PHONE_ACCESSORIES,
        siblings: &["pixel watch", "pixel buds", "pixel tablet", "chromecast", "nest"],
        synonyms: &["google pixel"],
    },
    FamilySeed {
        key: "ipad",
        accessories: &["case", "cover", "keyboard", "pencil", "charger", "cable", "screen protector",
                       "tempered glass", "stand", "holder", "sleeve", "stylus"],
        siblings: &["iphone", "ipod", "imac", "macbook", "apple watch", "airpods"],
        synonyms: &[],
    },
    FamilySeed {
        key: "macbook",
        accessories: &["sleeve", "bag", "case", "cover", "keyboard cover", "charger", "adapter",
                       "dock", "hub", "screen protector", "stand"],
        siblings: &["ipad", "iphone", "imac", "mac mini", "mac studio", "ipod"],
        synonyms: &["mac book"],
    },
    FamilySeed {
        key: "airpods",
        accessories: &["case", "cover", "charger", "cable", "ear tips", "strap", "hook"],
        siblings: &["iphone", "ipad", "beats", "apple watch", "macbook"],
        synonyms: &["air pods"],
    },
    FamilySeed {
        key: "playstation",
        accessories: &["controller", "controllers", "dualsense", "dualshock", "headset",
                       "charging station", "charging dock", "cover", "faceplate", "stand",
                       "skin", "cable", "camera"],
        siblings: &["xbox", "nintendo", "psp", "ps vita", "gamecube", "wii"],
        synonyms: &["ps5", "ps4", "ps3", "play station"],
    },
    FamilySeed {
        key: "xbox",
        accessories: &["controller", "controllers", "headset", "charging station", "stand",
                       "skin", "cable", "kinect", "battery pack"],
        siblings: &["playstation", "ps5", "ps4", "nintendo", "wii"],
        synonyms: &["series x", "series s"],
    },
    FamilySeed {
        key: "nintendo",
        accessories: &["joy con", "joycon", "controller", "dock", "case", "carry case",
                       "screen protector", "charger", "grip"],
        siblings: &["playstation", "ps5", "ps4", "xbox"],
        synonyms: &["switch", "switch oled", "switch lite"],
    },
];
