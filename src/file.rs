// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::csv::to_export_string;
use crate::table::TableData;

/// Write one table to `path` with the export's header and delimiter settings.
pub fn write_table(
    path: &Path,
    export: &ExportOptions,
    table: &TableData,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let contents = to_export_string(&table.headers, &table.rows, export.include_headers, export.delim());
    fs::write(path, contents)?;
    logf!("Export: wrote {} rows → {}", table.nrows(), path.display());
    Ok(path.to_path_buf())
}

/// Results table → `export.out_path()`.
pub fn export_results(export: &ExportOptions, table: &TableData) -> Result<PathBuf, Box<dyn std::error::Error>> {
    write_table(&export.out_path(), export, table)
}

/// Discard report → `export.discards_path()`.
pub fn export_discards(export: &ExportOptions, table: &TableData) -> Result<PathBuf, Box<dyn std::error::Error>> {
    write_table(&export.discards_path(), export, table)
}

pub fn resolve_single_out_path(user_o: &str, default_filename: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if user_o.is_empty() { return Ok(PathBuf::from(default_filename)); }
    let p = PathBuf::from(normalize_separators(user_o));
    if looks_like_dir_hint(&p) || p.is_dir() {
        ensure_directory(&p)?; Ok(p.join(default_filename))
    } else {
        Ok(p)
    }
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}
