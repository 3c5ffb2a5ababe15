// tests/classify.rs
//
// Relevance rules against the built-in vocabulary and small custom tables.

use listing_sift::classify::{Exclusion, Verdict, classify, explain};
use listing_sift::listing::{NormalizeOptions, NormalizedListing, RawRecord, normalize};
use listing_sift::vocab::Vocabulary;

fn listing(title: &str, price: &str) -> NormalizedListing {
    normalize(&RawRecord::new(title, price, ""), "iphone", &NormalizeOptions::default()).unwrap()
}

fn verdict(title: &str, term: &str, vocab: &Vocabulary) -> Verdict {
    classify(&listing(title, "€100"), term, vocab)
}

#[test]
fn iphone_scenarios() {
    let vocab = Vocabulary::builtin();
    let cases = [
        ("iPhone 12 64GB Good Condition", "€250", Verdict::Relevant),
        ("Case for iPhone 12", "€10", Verdict::Excluded(Exclusion::Accessory)),
        ("Toyota Corolla 2015", "€8000", Verdict::Excluded(Exclusion::WrongCategory)),
        ("iPad Pro 11 inch", "€400", Verdict::Excluded(Exclusion::WrongProduct)),
        ("Samsung Galaxy S21", "€300", Verdict::Excluded(Exclusion::NoMatch)),
    ];
    for (title, price, expected) in cases {
        assert_eq!(classify(&listing(title, price), "iphone", &vocab), expected, "{title}");
    }
}

#[test]
fn category_beats_accessory() {
    let vocab = Vocabulary::builtin();
    let c = explain(&listing("Toyota iPhone holder", "€15"), "iphone", &vocab);
    assert_eq!(c.verdict, Verdict::Excluded(Exclusion::WrongCategory));
    assert_eq!(c.term.as_deref(), Some("toyota"));
}

#[test]
fn accessory_beats_sibling() {
    let vocab = Vocabulary::builtin();
    let c = explain(&listing("iPad case fits iPhone too", "€15"), "iphone", &vocab);
    assert_eq!(c.verdict, Verdict::Excluded(Exclusion::Accessory));
}

#[test]
fn matching_is_whole_token() {
    let vocab = Vocabulary::builtin();
    // "case" must not fire inside "showcase"
    assert_eq!(verdict("iPhone 13 showcase condition", "iphone", &vocab), Verdict::Relevant);
}

#[test]
fn multi_word_terms_match_across_punctuation() {
    let vocab = Vocabulary::builtin();
    let c = explain(&listing("iPhone 11 Screen-Protector x3", "€5"), "iphone", &vocab);
    assert_eq!(c.verdict, Verdict::Excluded(Exclusion::Accessory));
    assert_eq!(c.term.as_deref(), Some("screen protector"));
}

#[test]
fn case_insensitive() {
    let vocab = Vocabulary::builtin();
    assert_eq!(verdict("IPHONE 12 CASE", "iPhone", &vocab), Verdict::Excluded(Exclusion::Accessory));
    assert_eq!(verdict("iphone 12", "IPHONE", &vocab), Verdict::Relevant);
}

#[test]
fn synonym_satisfies_term_presence() {
    let vocab = Vocabulary::builtin();
    assert_eq!(verdict("I phone 8 64gb", "iphone", &vocab), Verdict::Relevant);
}

#[test]
fn family_resolves_through_synonym() {
    let vocab = Vocabulary::builtin();
    assert_eq!(verdict("Galaxy Watch 4", "galaxy s21", &vocab), Verdict::Excluded(Exclusion::WrongProduct));
    assert_eq!(verdict("Samsung Galaxy S21 128GB", "galaxy s21", &vocab), Verdict::Relevant);
}

#[test]
fn unconfigured_term_skips_family_rules() {
    let vocab = Vocabulary::builtin();
    // "case" would be an accessory for phones; kettles have no family here
    assert_eq!(verdict("Kettle with case", "kettle", &vocab), Verdict::Relevant);
    assert_eq!(verdict("Toaster", "kettle", &vocab), Verdict::Excluded(Exclusion::NoMatch));
    // category blocklist still applies
    assert_eq!(verdict("Kettle and dog bowl", "kettle", &vocab), Verdict::Excluded(Exclusion::WrongCategory));
}

#[test]
fn no_match_has_no_term() {
    let vocab = Vocabulary::builtin();
    let c = explain(&listing("Samsung Galaxy S21", "€300"), "iphone", &vocab);
    assert_eq!(c.verdict, Verdict::Excluded(Exclusion::NoMatch));
    assert_eq!(c.term, None);
}

#[test]
fn empty_vocabulary_only_checks_term_presence() {
    let vocab = Vocabulary::empty();
    assert_eq!(verdict("Toyota iPhone case", "iphone", &vocab), Verdict::Relevant);
    assert_eq!(verdict("Samsung S21", "iphone", &vocab), Verdict::Excluded(Exclusion::NoMatch));
}

#[test]
fn new_family_is_configuration_not_code() {
    let vocab = Vocabulary::from_json_str(
        r#"{
            "categories": ["puppy"],
            "families": {
                "kettle": { "accessories": ["lid", "filter"], "siblings": ["toaster"], "synonyms": ["jug"] }
            }
        }"#,
    )
    .unwrap();
    assert_eq!(verdict("Kettle lid", "kettle", &vocab), Verdict::Excluded(Exclusion::Accessory));
    assert_eq!(verdict("Kettle and toaster set", "kettle", &vocab), Verdict::Excluded(Exclusion::WrongProduct));
    assert_eq!(verdict("Electric jug 1.7L", "kettle", &vocab), Verdict::Relevant);
    assert_eq!(verdict("Puppy kettle", "kettle", &vocab), Verdict::Excluded(Exclusion::WrongCategory));
}

#[test]
fn search_words_match_as_whole_phrases() {
    let vocab = Vocabulary::builtin();
    // "ps4" needs "ps 4" together, a lone "4" is not enough
    assert_eq!(verdict("4 kitchen chairs", "ps4", &vocab), Verdict::Excluded(Exclusion::NoMatch));
    assert_eq!(verdict("PS4 Slim 500GB", "ps4", &vocab), Verdict::Relevant);
    assert_eq!(verdict("PS 4 with two games", "ps4", &vocab), Verdict::Relevant);

    // "64gb" needs "64 gb", not any "gb"
    assert_eq!(
        verdict("Samsung Galaxy A52 128GB", "iphone 64gb", &vocab),
        Verdict::Excluded(Exclusion::NoMatch)
    );
    assert_eq!(verdict("Unlocked 64GB handset", "iphone 64gb", &vocab), Verdict::Relevant);
}
