// src/core/sanitize.rs

use crate::config::consts::PLACEHOLDERS;

/// Trim and collapse every whitespace run to a single ' '.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Case-folded, whitespace-normalized form used for matching and keys.
pub fn fold(s: &str) -> String {
    normalize_ws(&s.to_lowercase())
}

/// True for empty cells and the scraper's "N/A"-style fillers.
pub fn is_placeholder(s: &str) -> bool {
    let t = s.trim();
    t.is_empty() || PLACEHOLDERS.iter().any(|p| t.eq_ignore_ascii_case(p))
}

/// `Some(trimmed)` unless the cell is a placeholder.
pub fn present(s: Option<&str>) -> Option<String> {
    s.filter(|v| !is_placeholder(v)).map(normalize_ws)
}

/// Lowercase alphanumeric tokens.
/// Splits on anything non-alphanumeric and on letter/digit boundaries,
/// so "iPhone12", "iphone 12" and "i-phone-12" all agree on "12".
pub fn tokens(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut cur_digit = false;

    for ch in s.chars().flat_map(char::to_lowercase) {
        if !ch.is_alphanumeric() {
            if !cur.is_empty() { out.push(std::mem::take(&mut cur)); }
            continue;
        }
        let is_digit = ch.is_ascii_digit();
        if !cur.is_empty() && is_digit != cur_digit {
            out.push(std::mem::take(&mut cur));
        }
        cur_digit = is_digit;
        cur.push(ch);
    }
    if !cur.is_empty() { out.push(cur); }
    out
}

/// Start index of the first contiguous occurrence of `needle` in `hay`.
pub fn find_phrase(hay: &[String], needle: &[String]) -> Option<usize> {
    if needle.is_empty() || needle.len() > hay.len() { return None; }
    hay.windows(needle.len()).position(|w| w == needle)
}

/// File-name-safe stem: ASCII alphanumerics, '-' and '_' kept, whitespace → '_'.
pub fn sanitize_file_stem(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch=='-' || ch=='_' { if !(last_us && ch=='_') { out.push(ch); } last_us = ch=='_'; }
    }
    out.trim_matches('_').to_string()
}
