// src/listing.rs
//! Record normalizer: one scraped record in, one canonical listing (or a
//! structural rejection) out. Knows nothing about relevance.

use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

use crate::core::{
    link::canonicalize,
    price::{parse_price, whole_units},
    sanitize::{fold, present, tokens},
};

/// Raw fields as the scraper extracted them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub title: String,
    pub price_text: Option<String>,
    pub url: String,
    pub source_id: Option<String>,
    pub location: Option<String>,
}

impl RawRecord {
    pub fn new(title: &str, price_text: &str, url: &str) -> Self {
        Self {
            title: s!(title),
            price_text: Some(s!(price_text)),
            url: s!(url),
            source_id: None,
            location: None,
        }
    }

    pub fn with_source_id(mut self, id: &str) -> Self {
        self.source_id = Some(s!(id));
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(s!(location));
        self
    }
}

/// Why a record never made it to classification.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rejection {
    #[error("invalid price")]
    InvalidPrice,
    #[error("invalid title")]
    InvalidTitle,
}

impl Rejection {
    pub const ALL: [Rejection; 2] = [Rejection::InvalidPrice, Rejection::InvalidTitle];

    pub fn label(&self) -> &'static str {
        match self {
            Rejection::InvalidPrice => "InvalidPrice",
            Rejection::InvalidTitle => "InvalidTitle",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NormalizeOptions {
    /// Site root that relative listing links resolve against
    pub base_url: Option<Url>,
}

impl NormalizeOptions {
    pub fn with_base_url(base: &str) -> Result<Self, url::ParseError> {
        Ok(Self { base_url: Some(Url::parse(base)?) })
    }
}

/// Canonical, immutable listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedListing {
    title: String,
    title_folded: String,
    title_tokens: Vec<String>,
    price: Decimal,
    url: String,
    source_id: Option<String>,
    location: Option<String>,
    identity_key: String,
    position: usize,
}

impl NormalizedListing {
    /// Display title: trimmed, whitespace collapsed, case kept.
    pub fn title(&self) -> &str { &self.title }
    /// Case-folded title used for matching.
    pub fn title_folded(&self) -> &str { &self.title_folded }
    pub fn title_tokens(&self) -> &[String] { &self.title_tokens }
    pub fn price(&self) -> Decimal { self.price }
    /// Canonical URL (empty when the scraper had none).
    pub fn url(&self) -> &str { &self.url }
    pub fn source_id(&self) -> Option<&str> { self.source_id.as_deref() }
    pub fn location(&self) -> Option<&str> { self.location.as_deref() }
    pub fn identity_key(&self) -> &str { &self.identity_key }
    /// Index of the originating raw record in its input batch.
    pub fn position(&self) -> usize { self.position }

    pub fn at_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }
}

/// Normalize one raw record.
///
/// Price is validated before title, so a record broken in both ways is
/// `InvalidPrice`. The search term is threaded through for call-site
/// symmetry with classification; normalization itself does not read it.
pub fn normalize(
    raw: &RawRecord,
    _search_term: &str,
    opts: &NormalizeOptions,
) -> Result<NormalizedListing, Rejection> {
    let price = raw
        .price_text
        .as_deref()
        .and_then(parse_price)
        .ok_or(Rejection::InvalidPrice)?;

    let title = present(Some(raw.title.as_str())).ok_or(Rejection::InvalidTitle)?;

    let link = canonicalize(&raw.url, opts.base_url.as_ref());
    let source_id = present(raw.source_id.as_deref());
    let location = present(raw.location.as_deref());

    let title_folded = fold(&title);
    let identity_key = identity_key(
        link.path_id.as_deref(),
        source_id.as_deref(),
        link.page.as_deref(),
        &title_folded,
        price,
    );

    Ok(NormalizedListing {
        title_tokens: tokens(&title),
        title,
        title_folded,
        price,
        url: link.text,
        source_id,
        location,
        identity_key,
        position: 0,
    })
}

/// "id:<listing id>|<units>" when the URL (or scraper) gave an id,
/// "url:<host/path>|<units>" when there is a link without one,
/// "title:<folded title>|<units>" otherwise.
pub fn identity_key(
    path_id: Option<&str>,
    source_id: Option<&str>,
    page: Option<&str>,
    title_folded: &str,
    price: Decimal,
) -> String {
    let (kind, part) = match (path_id.or(source_id), page) {
        (Some(id), _) => ("id", id),
        (None, Some(page)) => ("url", page),
        (None, None) => ("title", title_folded),
    };
    fold(&format!("{kind}:{part}|{}", whole_units(price)))
}

/* ---------------- Rejection tally ---------------- */

/// A record dropped by the normalizer, kept for the audit table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Index in the raw input batch
    pub position: usize,
    pub reason: Rejection,
    pub title: String,
    pub price_text: String,
    pub url: String,
}

/// Structural rejections, separate from the classification discard report.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RejectionTally {
    entries: Vec<RejectedRecord>,
}

impl RejectionTally {
    pub fn record(&mut self, position: usize, raw: &RawRecord, reason: Rejection) {
        self.entries.push(RejectedRecord {
            position,
            reason,
            title: s!(raw.title.trim()),
            price_text: raw.price_text.clone().unwrap_or_default(),
            url: s!(raw.url.trim()),
        });
    }

    pub fn count(&self, reason: Rejection) -> usize {
        self.entries.iter().filter(|e| e.reason == reason).count()
    }

    pub fn total(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn entries(&self) -> &[RejectedRecord] { &self.entries }
}
