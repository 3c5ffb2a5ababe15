// src/config/consts.rs

// Local store (debug log)
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Input
pub const DEFAULT_INPUT: &str = "sheets/listings.csv";
pub const DEFAULT_SEARCH_TERM: &str = "iphone";

// Export
pub const DEFAULT_OUT_DIR: &str = "sheets";
pub const DEFAULT_FILE: &str = "cleaned_listings";
pub const DISCARDS_SUFFIX: &str = "_discarded";
pub const CURRENCY_SYMBOL: &str = "€";

// Values the scraper writes when a field was missing on the card
pub const PLACEHOLDERS: &[&str] = &["n/a", "na", "-"];

// URL canonicalization: query parameters that never identify a listing
pub const TRACKING_PARAMS: &[&str] = &[
    "fbclid", "gclid", "dclid", "msclkid", "yclid", "igshid", "mc_cid", "mc_eid",
    "_ga", "_gl", "ref", "ref_src", "referrer", "campaign", "source", "spm", "si",
    "share", "shared", "cmpid", "trk", "tracking", "searchid", "search_id", "s_id",
];
pub const TRACKING_PREFIXES: &[&str] = &["utm_", "pk_", "mtm_"];

// Query parameters that carry a listing id
pub const ID_PARAMS: &[&str] = &[
    "id", "adid", "ad_id", "itemid", "item_id", "item", "listingid", "listing_id",
    "pid", "productid", "product_id",
];
