// src/table.rs
//! TableData: string-cell view of every pipeline output.
//!
//! The GUI table, Copy, and file export all consume the same `TableData`,
//! so what you see is what gets written.

use crate::core::price::{amount_string, format_price};
use crate::listing::RejectionTally;
use crate::models::ModelGroup;
use crate::sift::{DiscardReport, ResultSet};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ncols(&self) -> usize {
        if self.headers.is_empty() {
            self.rows.first().map(|r| r.len()).unwrap_or(0)
        } else {
            self.headers.len()
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }
}

pub fn results_headers() -> Vec<String> {
    strings!["Title", "Price", "Amount", "Location", "URL"]
}

pub fn discards_headers() -> Vec<String> {
    strings!["Reason", "Term", "Title", "Price", "URL"]
}

pub fn rejections_headers() -> Vec<String> {
    strings!["Reason", "Row", "Title", "Price text", "URL"]
}

pub fn models_headers() -> Vec<String> {
    strings!["Model", "Count", "Min", "Max", "Mean", "Example"]
}

impl TableData {
    pub fn from_results(results: &ResultSet) -> Self {
        let rows = results
            .iter()
            .map(|l| vec![
                s!(l.title()),
                format_price(l.price()),
                amount_string(l.price()),
                s!(l.location().unwrap_or_default()),
                s!(l.url()),
            ])
            .collect();
        Self::with(results_headers(), rows)
    }

    /// Grouped by reason (report order), input order within a reason.
    pub fn from_discards(report: &DiscardReport) -> Self {
        let mut entries: Vec<_> = report.entries().iter().collect();
        entries.sort_by_key(|e| (e.reason, e.position));
        let rows = entries
            .into_iter()
            .map(|e| vec![
                s!(e.reason.label()),
                e.term.clone().unwrap_or_default(),
                e.title.clone(),
                format_price(e.price),
                e.url.clone(),
            ])
            .collect();
        Self::with(discards_headers(), rows)
    }

    pub fn from_rejections(tally: &RejectionTally) -> Self {
        let rows = tally
            .entries()
            .iter()
            .map(|r| vec![
                s!(r.reason.label()),
                (r.position + 1).to_string(),
                r.title.clone(),
                r.price_text.clone(),
                r.url.clone(),
            ])
            .collect();
        Self::with(rejections_headers(), rows)
    }

    pub fn from_models(groups: &[ModelGroup]) -> Self {
        let rows = groups
            .iter()
            .map(|g| vec![
                g.model.clone(),
                g.count.to_string(),
                format_price(g.min),
                format_price(g.max),
                format_price(g.mean),
                g.representative_title.clone(),
            ])
            .collect();
        Self::with(models_headers(), rows)
    }
}
