// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::consts::*;
use crate::core::sanitize::sanitize_file_stem;
use crate::sift::DedupPolicy;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub sift: SiftOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiftOptions {
    /// What the listings were scraped for, e.g. "iphone 16"
    pub search_term: String,
    /// Raw listings file (CSV or TSV, header row required)
    pub input: PathBuf,
    /// Vocabulary JSON; None → built-in table
    pub vocab_path: Option<PathBuf>,
    pub dedup: DedupPolicy,
    /// Site root for resolving relative listing links
    pub base_url: Option<String>,
}

impl Default for SiftOptions {
    fn default() -> Self {
        Self {
            search_term: s!(DEFAULT_SEARCH_TERM),
            input: PathBuf::from(DEFAULT_INPUT),
            vocab_path: None,
            dedup: DedupPolicy::default(),
            base_url: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
    /// Guess from a file extension; anything unknown reads as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => ExportFormat::Tsv,
            _ => ExportFormat::Csv,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    out_path: OutputPath,
    pub include_headers: bool,
    /// Also write the discard report next to the results
    pub write_discards: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_path: OutputPath::default(),
            include_headers: true,
            write_discards: false,
        }
    }
}

impl ExportOptions {
    /// Results file: "<dir>/<stem>.<ext>", or the user's own extension if they typed one.
    pub fn out_path(&self) -> PathBuf {
        let ext = self.out_path.ext.clone()
            .unwrap_or_else(|| OsString::from(self.format.ext()));
        let mut name = self.out_path.file_stem.clone();
        name.push(".");
        name.push(ext);
        self.out_path.dir.join(name)
    }

    /// Discard report: "<dir>/<stem>_discarded.<ext>"
    pub fn discards_path(&self) -> PathBuf {
        let ext = self.out_path.ext.clone()
            .unwrap_or_else(|| OsString::from(self.format.ext()));
        let mut name = self.out_path.file_stem.clone();
        name.push(DISCARDS_SUFFIX);
        name.push(".");
        name.push(ext);
        self.out_path.dir.join(name)
    }

    pub fn current_dir(&self) -> &Path {
        &self.out_path.dir
    }

    /// Parse GUI/CLI text into dir + stem (+ explicit extension if given).
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if s.is_empty() { return; }
        self.out_path.typed = true;

        let p = Path::new(s);
        if s.ends_with('/') || s.ends_with('\\') || p.is_dir() {
            self.out_path.dir = p.to_path_buf();
            return;
        }
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
        self.out_path.ext = p.extension().map(|e| e.to_os_string());
    }

    /// Default stem derived from the search term ("iPhone 16" → "cleaned_listings_iPhone_16").
    /// No-op once the user has typed a path.
    pub fn set_stem_from_term(&mut self, term: &str) {
        if self.out_path.typed { return; }
        let stem = sanitize_file_stem(term);
        self.out_path.file_stem = if stem.is_empty() {
            OsString::from(DEFAULT_FILE)
        } else {
            OsString::from(join!(DEFAULT_FILE, "_", &stem))
        };
    }

    pub fn delim(&self) -> char {
        self.format.delim()
    }

    /// True until a path is typed; the stem may still follow the search term.
    pub fn is_default_path(&self) -> bool {
        !self.out_path.typed
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString,
    /// Extension the user typed; None → follows the format
    ext: Option<OsString>,
    typed: bool,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
            ext: None,
            typed: false,
        }
    }
}
