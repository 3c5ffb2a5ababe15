// src/core/price.rs
//
// Advertised price text → Decimal.
// '.' is the only decimal point; ',' and spaces/apostrophes between digit
// groups are grouping. The first numeric run wins ("€250 ono", "€200 - €300").
// A minus in front of that run, past any currency marks, makes it negative.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::consts::CURRENCY_SYMBOL;

/// Parse a positive amount, or None when the text holds no usable price.
pub fn parse_price(text: &str) -> Option<Decimal> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let (prefix, rest) = text.split_at(start);

    // "-€50", "€-50", "EUR -50"
    if signed_negative(prefix) {
        return None;
    }

    let run = numeric_run(rest);
    let run = run.trim_end_matches(['.', ',']);

    // "€.99": the point sits in front of the first digit
    let mut points = 0usize;
    let mut digits = String::with_capacity(run.len() + 2);
    if leading_point(prefix) {
        points = 1;
        digits.push_str("0.");
    }
    for ch in run.chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            '.' => { points += 1; digits.push('.'); }
            _ => {} // grouping
        }
    }
    if points > 1 {
        return None;
    }

    let value = Decimal::from_str(&digits).ok()?;
    if value <= Decimal::ZERO { None } else { Some(value) }
}

fn is_currency_symbol(c: char) -> bool {
    matches!(c, '€' | '$' | '£' | '¥')
}

/// Symbols plus the letters of codes like "EUR".
fn is_currency_mark(c: char) -> bool {
    is_currency_symbol(c) || c.is_alphabetic()
}

/// Minus sign before the number, with only currency marks or spaces in between.
fn signed_negative(prefix: &str) -> bool {
    prefix
        .trim_end_matches(|c: char| c.is_whitespace() || is_currency_mark(c))
        .ends_with('-')
}

/// A '.' right before the digits that starts the number, not one closing "Rs.".
fn leading_point(prefix: &str) -> bool {
    let Some(head) = prefix.strip_suffix('.') else { return false };
    head.chars().next_back().is_none_or(|c| c.is_whitespace() || is_currency_symbol(c))
}

/// Digits plus the separators that may sit inside a number.
fn numeric_run(s: &str) -> &str {
    let mut end = 0usize;
    let mut prev_digit = false;
    let mut it = s.char_indices().peekable();

    while let Some((i, ch)) = it.next() {
        let next_digit = it.peek().map(|(_, c)| c.is_ascii_digit()).unwrap_or(false);
        let keep = match ch {
            '0'..='9' => true,
            ',' | '.' => prev_digit,
            ' ' | '\u{a0}' | '\u{202f}' | '\'' => prev_digit && next_digit,
            _ => false,
        };
        if !keep { break; }
        prev_digit = ch.is_ascii_digit();
        end = i + ch.len_utf8();
    }
    &s[..end]
}

/// Whole currency units, half away from zero (249.50 → 250).
pub fn whole_units(price: Decimal) -> Decimal {
    price
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Mean rounded to cents; None for no prices. Totals past `Decimal::MAX`
/// fall back to dividing each price first.
pub fn mean_price(prices: &[Decimal]) -> Option<Decimal> {
    if prices.is_empty() {
        return None;
    }
    let count = Decimal::from(prices.len());
    let mean = match prices.iter().try_fold(Decimal::ZERO, |acc, p| acc.checked_add(*p)) {
        Some(sum) => sum / count,
        None => prices.iter().map(|p| *p / count).fold(Decimal::ZERO, |acc, p| acc.saturating_add(p)),
    };
    Some(mean.round_dp(2))
}

/// Plain two-decimal amount for machine-readable columns ("1250.00").
pub fn amount_string(price: Decimal) -> String {
    format!("{:.2}", price.round_dp(2))
}

/// Display form with grouping: "€1,250.00".
pub fn format_price(price: Decimal) -> String {
    let plain = amount_string(price);
    let (int_part, frac) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    join!(CURRENCY_SYMBOL, &grouped, ".", frac)
}
