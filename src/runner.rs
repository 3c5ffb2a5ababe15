// src/runner.rs
//! Pipeline driver: raw records → normalize → sift, plus the file-level
//! wrapper the CLI and GUI call (load sheet, load vocabulary, run, export).

use std::path::PathBuf;

use thiserror::Error;

use crate::{
    config::options::{AppOptions, SiftOptions},
    file::{export_discards, export_results},
    listing::{NormalizeOptions, RawRecord, RejectionTally, normalize},
    progress::Progress,
    sift::{DiscardReport, ResultSet, sift},
    store::{LoadError, load_records},
    table::TableData,
    vocab::{VocabError, Vocabulary},
};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid base URL '{url}': {source}")]
    BaseUrl { url: String, source: url::ParseError },
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Vocab(#[from] VocabError),
    #[error("export failed: {0}")]
    Export(String),
}

/// Everything one pass produced.
#[derive(Clone, Debug, Default)]
pub struct SiftOutcome {
    pub results: ResultSet,
    pub discards: DiscardReport,
    pub rejections: RejectionTally,
}

impl SiftOutcome {
    pub fn input_count(&self) -> usize {
        self.results.len() + self.discards.total() + self.rejections.total()
    }

    /// "Kept 12 of 40 (discarded 25, rejected 3)"
    pub fn summary_line(&self) -> String {
        format!(
            "Kept {} of {} (discarded {}, rejected {})",
            self.results.len(),
            self.input_count(),
            self.discards.total(),
            self.rejections.total(),
        )
    }
}

/// Summary of what was produced on disk.
pub struct RunSummary {
    pub outcome: SiftOutcome,
    pub files_written: Vec<PathBuf>,
    /// Vocabulary the run classified with
    pub vocab: Vocabulary,
}

pub fn normalize_options(opts: &SiftOptions) -> Result<NormalizeOptions, RunError> {
    match opts.base_url.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(NormalizeOptions::default()),
        Some(url) => NormalizeOptions::with_base_url(url)
            .map_err(|source| RunError::BaseUrl { url: s!(url), source }),
    }
}

/// Vocabulary file when configured, built-in table otherwise.
pub fn load_vocab(opts: &SiftOptions) -> Result<Vocabulary, VocabError> {
    match &opts.vocab_path {
        Some(path) => {
            let vocab = Vocabulary::from_json_file(path)?;
            logf!("Vocab: {} families from {}", vocab.family_count(), path.display());
            Ok(vocab)
        }
        None => Ok(Vocabulary::builtin()),
    }
}

/// Normalize every record in order, then sift the survivors.
pub fn run(
    records: &[RawRecord],
    opts: &SiftOptions,
    vocab: &Vocabulary,
    mut progress: Option<&mut dyn Progress>,
) -> Result<SiftOutcome, RunError> {
    let norm = normalize_options(opts)?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(records.len());
    }

    let mut rejections = RejectionTally::default();
    let mut listings = Vec::with_capacity(records.len());

    for (i, raw) in records.iter().enumerate() {
        match normalize(raw, &opts.search_term, &norm) {
            Ok(listing) => listings.push(listing.at_position(i)),
            Err(reason) => {
                logd!("Rejected row {}: {} ({:?})", i + 1, reason, raw.title);
                rejections.record(i, raw, reason);
            }
        }
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(i);
        }
    }

    let (results, discards) = sift(listings, &opts.search_term, vocab, opts.dedup);
    let outcome = SiftOutcome { results, discards, rejections };

    logf!("Sift '{}' ({} dedup): {}", opts.search_term, opts.dedup.label(), outcome.summary_line());
    for (reason, n) in outcome.discards.counts() {
        logd!("  {}: {}", reason.label(), n);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.log(&outcome.summary_line());
        p.finish();
    }
    Ok(outcome)
}

/// Load the configured sheet and vocabulary, run, and export.
pub fn run_file(
    opts: &AppOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, RunError> {
    logf!("Run: input {}", opts.sift.input.display());
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Loading {}", opts.sift.input.display()));
    }

    let records = load_records(&opts.sift.input)?;
    let vocab = load_vocab(&opts.sift)?;
    let outcome = run(&records, &opts.sift, &vocab, progress)?;

    let mut files_written = Vec::new();
    let results = TableData::from_results(&outcome.results);
    files_written.push(
        export_results(&opts.export, &results).map_err(|e| RunError::Export(e.to_string()))?,
    );

    if opts.export.write_discards {
        let discards = TableData::from_discards(&outcome.discards);
        files_written.push(
            export_discards(&opts.export, &discards).map_err(|e| RunError::Export(e.to_string()))?,
        );
    }

    Ok(RunSummary { outcome, files_written, vocab })
}
