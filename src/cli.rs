// src/cli.rs
use std::{env, path::PathBuf};

use crate::config::consts::{DEFAULT_FILE, DISCARDS_SUFFIX};
use crate::config::options::{AppOptions, ExportFormat};
use crate::core::price::format_price;
use crate::file::{resolve_single_out_path, write_table};
use crate::models::group_by_model;
use crate::runner::{self, load_vocab};
use crate::sift::DedupPolicy;
use crate::table::TableData;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliArgs {
    pub options: AppOptions,
    /// `--discards` target as typed (file or directory hint)
    pub discards_out: Option<String>,
    pub show_models: bool,
    pub list_families: bool,
    pub help: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        let mut options = AppOptions::default();
        // CLI output is headerless unless asked
        options.export.include_headers = false;
        Self { options, discards_out: None, show_models: false, list_families: false, help: false }
    }
}

/// Parse arguments (without the program name).
pub fn parse_args<I>(args: I) -> Result<CliArgs, Box<dyn std::error::Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut cli = CliArgs::default();
    let mut out_text: Option<String> = None;
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        match a.as_str()
        {
            "--in" | "-i" => cli.options.sift.input = PathBuf::from(args.next().ok_or("Missing input path")?),
            "--term" | "-t" => {
                let v = args.next().ok_or("Missing value for --term")?;
                if v.trim().is_empty() { return Err("Search term is empty".into()); }
                cli.options.sift.search_term = v;}
            "--vocab" => cli.options.sift.vocab_path = Some(PathBuf::from(args.next().ok_or("Missing vocabulary path")?)),
            "--base-url" => cli.options.sift.base_url = Some(args.next().ok_or("Missing value for --base-url")?),
            "-o" | "--out" => out_text = Some(args.next().ok_or("Missing output path")?),
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                cli.options.export.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    other => return Err(format!("Unknown format: {}", other).into()),
                };}
            "--include-headers" => cli.options.export.include_headers = true,
            "--discards" => cli.discards_out = Some(args.next().ok_or("Missing value for --discards")?),
            "--dedup" => {
                let v = args.next().ok_or("Missing value for --dedup")?;
                cli.options.sift.dedup = DedupPolicy::from_label(&v)
                    .ok_or_else(|| format!("Unknown dedup policy: {}", v))?;}
            "--models" => cli.show_models = true,
            "--families" => cli.list_families = true,
            "-h" | "--help" => cli.help = true,
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    let term = cli.options.sift.search_term.clone();
    cli.options.export.set_stem_from_term(&term);
    if let Some(o) = out_text {
        cli.options.export.set_path(&o);
    }
    Ok(cli)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args(env::args().skip(1))?;
    execute(cli)
}

pub fn execute(cli: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if cli.help {
        eprintln!(include_str!("cli_help.txt"));
        return Ok(());
    }

    let opts = &cli.options;
    if cli.list_families {
        let vocab = load_vocab(&opts.sift)?;
        for (key, fam) in vocab.families() {
            let synonyms: Vec<&str> = fam.synonyms.iter().map(|t| t.text()).collect();
            println!("{},{}", key, synonyms.join("|"));
        }
        return Ok(());
    }

    let summary = runner::run_file(opts, None)?;
    let outcome = &summary.outcome;
    for path in &summary.files_written {
        println!("Wrote {}", path.display());
    }

    if let Some(target) = &cli.discards_out {
        let default_name = format!("{}{}.{}", DEFAULT_FILE, DISCARDS_SUFFIX, opts.export.format.ext());
        let path = resolve_single_out_path(target, &default_name)?;
        let written = write_table(&path, &opts.export, &TableData::from_discards(&outcome.discards))?;
        println!("Wrote {}", written.display());
    }

    println!("{}", outcome.summary_line());
    if let Some(ps) = outcome.results.price_summary() {
        println!(
            "Prices: {} to {}, mean {}",
            format_price(ps.min),
            format_price(ps.max),
            format_price(ps.mean),
        );
    }

    if cli.show_models {
        for g in group_by_model(&outcome.results, &opts.sift.search_term, &summary.vocab) {
            println!(
                "{} x{}: {} to {} (mean {})",
                g.model,
                g.count,
                format_price(g.min),
                format_price(g.max),
                format_price(g.mean),
            );
        }
    }
    Ok(())
}
