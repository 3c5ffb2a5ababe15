// src/store.rs
//! Raw listings on disk: a CSV/TSV sheet with a header row, as the scraper
//! writes it. Columns are found by name, in any order.

use std::{fs, io, path::{Path, PathBuf}};

use thiserror::Error;

use crate::config::options::ExportFormat;
use crate::csv::parse_rows;
use crate::listing::RawRecord;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("{0} has no header row")]
    MissingHeader(PathBuf),
    #[error("{path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: &'static str },
}

/// Accepted header names per field, lowercase.
const TITLE_COLS: &[&str] = &["title", "name"];
const PRICE_COLS: &[&str] = &["price", "price_text"];
const URL_COLS: &[&str] = &["url", "link", "href"];
const LOCATION_COLS: &[&str] = &["location"];
const ID_COLS: &[&str] = &["id", "source_id", "ad_id"];

/// Read a sheet; the separator follows the extension (.tsv → tab, else comma).
pub fn load_dataset(path: &Path) -> Result<DataSet, LoadError> {
    let text = fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    let sep = ExportFormat::from_path(path).delim();

    let mut rows = parse_rows(&text, sep);
    if rows.is_empty() {
        return Err(LoadError::MissingHeader(path.to_path_buf()));
    }
    let headers = rows.remove(0).into_iter().map(|h| s!(h.trim())).collect();
    Ok(DataSet { headers, rows })
}

fn column(headers: &[String], names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
}

/// Map sheet rows onto raw records. Title and price columns are required;
/// url, location and id are optional. Short rows read missing cells as absent.
pub fn records_from_dataset(ds: &DataSet, path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let required = |names: &[&str], column_name: &'static str| {
        column(&ds.headers, names)
            .ok_or_else(|| LoadError::MissingColumn { path: path.to_path_buf(), column: column_name })
    };
    let title_col = required(TITLE_COLS, "title")?;
    let price_col = required(PRICE_COLS, "price")?;
    let url_col = column(&ds.headers, URL_COLS);
    let location_col = column(&ds.headers, LOCATION_COLS);
    let id_col = column(&ds.headers, ID_COLS);

    let cell = |row: &[String], col: Option<usize>| col.and_then(|c| row.get(c)).cloned();

    Ok(ds
        .rows
        .iter()
        .map(|row| {
            let row = row.as_slice();
            RawRecord {
                title: cell(row, Some(title_col)).unwrap_or_default(),
                price_text: cell(row, Some(price_col)),
                url: cell(row, url_col).unwrap_or_default(),
                source_id: cell(row, id_col),
                location: cell(row, location_col),
            }
        })
        .collect())
}

pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let ds = load_dataset(path)?;
    records_from_dataset(&ds, path)
}
