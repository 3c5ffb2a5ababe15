// src/core/link.rs
//
// Listing URL canonicalization: fragment and tracking parameters go,
// path and id-bearing parameters stay. Also digs out the listing id
// and the bare page address that identity keys prefer over titles.

use url::Url;

use crate::config::consts::{ID_PARAMS, TRACKING_PARAMS, TRACKING_PREFIXES};
use super::sanitize::is_placeholder;

/// Shortest digit run that still looks like an ad number rather than a model/storage size.
const MIN_ID_DIGITS: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CanonicalUrl {
    /// Canonical URL text; raw (trimmed) text when unparsable; empty when absent
    pub text: String,
    /// Listing id from an id parameter or the path, lowercased
    pub path_id: Option<String>,
    /// "host/path" without query, for links that carry no id
    pub page: Option<String>,
}

pub fn is_tracking_param(key: &str) -> bool {
    let k = key.to_ascii_lowercase();
    TRACKING_PARAMS.contains(&k.as_str()) || TRACKING_PREFIXES.iter().any(|p| k.starts_with(p))
}

fn is_id_param(key: &str) -> bool {
    ID_PARAMS.contains(&key.to_ascii_lowercase().as_str())
}

/// Canonicalize one scraped link. Relative links resolve against `base` when given.
pub fn canonicalize(raw: &str, base: Option<&Url>) -> CanonicalUrl {
    let raw = raw.trim();
    if is_placeholder(raw) {
        return CanonicalUrl::default();
    }

    let parsed = match (Url::parse(raw), base) {
        (Ok(u), _) => Some(u),
        (Err(url::ParseError::RelativeUrlWithoutBase), Some(b)) => b.join(raw).ok(),
        _ => None,
    };
    let Some(mut url) = parsed else {
        return CanonicalUrl { text: s!(raw), path_id: None, page: None };
    };

    url.set_fragment(None);

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !is_tracking_param(k))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept.iter().map(|(k, v)| (&**k, &**v)));
    }

    let path_id = kept
        .iter()
        .find(|(k, v)| is_id_param(k) && !v.trim().is_empty())
        .map(|(_, v)| v.trim().to_lowercase())
        .or_else(|| id_from_path(&url));

    CanonicalUrl { text: url.to_string(), path_id, page: page_of(&url) }
}

/// "www.donedeal.ie/phones/iphone-12/abc" for any link with a host and a non-root path.
fn page_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let path = url.path().trim_end_matches('/');
    if path.is_empty() {
        return None;
    }
    Some(join!(host, path))
}

/// Last path segment carrying an ad-number-like digit run:
/// "/phones/iphone-12-64gb/36012345" → "36012345", "/d/slug/7612345678.html" → "7612345678".
fn id_from_path(url: &Url) -> Option<String> {
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();

    segments.into_iter().rev().find_map(|seg| {
        let seg = seg.rsplit_once('.').map(|(head, _)| head).unwrap_or(seg);
        seg.split(['-', '_'])
            .find(|piece| piece.len() >= MIN_ID_DIGITS && piece.chars().all(|c| c.is_ascii_digit()))
            .map(|piece| s!(piece))
    })
}
