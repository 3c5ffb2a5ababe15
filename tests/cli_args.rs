// tests/cli_args.rs
use std::path::{Path, PathBuf};

use listing_sift::cli::parse_args;
use listing_sift::config::options::ExportFormat;
use listing_sift::sift::DedupPolicy;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn norm(p: &Path) -> PathBuf { p.components().collect() }

#[test]
fn defaults_without_flags() {
    let cli = parse_args(Vec::<String>::new()).unwrap();
    assert_eq!(cli.options.sift.search_term, "iphone");
    assert_eq!(cli.options.sift.dedup, DedupPolicy::FirstSeen);
    assert!(!cli.options.export.include_headers);
    assert!(cli.options.export.out_path().to_string_lossy().ends_with("cleaned_listings_iphone.csv"));
    assert!(!cli.help && !cli.show_models && !cli.list_families);
}

#[test]
fn full_flag_set() {
    let cli = parse_args(args(&[
        "--in", "raw/pixel.tsv",
        "--term", "pixel 8",
        "--vocab", "vocab.json",
        "--base-url", "https://www.donedeal.ie",
        "-o", "out/pixels.tsv",
        "--format", "TSV",
        "--include-headers",
        "--discards", "out/",
        "--dedup", "lowest",
        "--models",
    ]))
    .unwrap();

    let o = &cli.options;
    assert_eq!(o.sift.input, PathBuf::from("raw/pixel.tsv"));
    assert_eq!(o.sift.search_term, "pixel 8");
    assert_eq!(o.sift.vocab_path, Some(PathBuf::from("vocab.json")));
    assert_eq!(o.sift.base_url.as_deref(), Some("https://www.donedeal.ie"));
    assert_eq!(o.sift.dedup, DedupPolicy::LowestPrice);
    assert_eq!(o.export.format, ExportFormat::Tsv);
    assert!(o.export.include_headers);
    assert_eq!(norm(&o.export.out_path()), norm(Path::new("out/pixels.tsv")));
    assert_eq!(cli.discards_out.as_deref(), Some("out/"));
    assert!(cli.show_models);
}

#[test]
fn rejects_unknown_and_incomplete_args() {
    assert!(parse_args(args(&["--bogus"])).is_err());
    assert!(parse_args(args(&["--term"])).is_err());
    assert!(parse_args(args(&["--term", "  "])).is_err());
    assert!(parse_args(args(&["--format", "xlsx"])).is_err());
    assert!(parse_args(args(&["--dedup", "random"])).is_err());
}

#[test]
fn help_and_families_flags() {
    assert!(parse_args(args(&["-h"])).unwrap().help);
    assert!(parse_args(args(&["--families"])).unwrap().list_families);
}
