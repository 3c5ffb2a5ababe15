// tests/export_e2e.rs
use std::fs;
use std::path::PathBuf;

use listing_sift::config::options::{AppOptions, ExportFormat};
use listing_sift::runner::run_file;
use listing_sift::store::{LoadError, load_records};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("listing_sift_e2e_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

const SHEET: &str = "\
title,price,url,location
iPhone 12 64GB Good Condition,€250,https://www.donedeal.ie/phones/iphone-12/36012345?utm_source=fb,Dublin
Case for iPhone 12,€10,https://www.donedeal.ie/phones/case/36012346,Cork
\"iPhone 11, 128GB\",\"€1,050\",https://www.donedeal.ie/phones/iphone-11/36012347,Galway
Toyota Corolla 2015,€8000,https://www.donedeal.ie/cars/toyota/36012348,Kerry
iPhone 12 64gb excellent,€250,https://www.donedeal.ie/phones/iphone-12/36012345,Dublin
Broken,Contact seller,,
";

fn options_for(dir: &PathBuf, input: &str) -> AppOptions {
    let mut opts = AppOptions::default();
    opts.sift.input = dir.join(input);
    opts.sift.search_term = "iphone".into();
    opts.export.set_path(dir.join("out.csv").to_str().unwrap());
    opts
}

#[test]
fn run_file_writes_cleaned_results() {
    let dir = tmp_dir("results");
    fs::write(dir.join("listings.csv"), SHEET).unwrap();
    let opts = options_for(&dir, "listings.csv");

    let summary = run_file(&opts, None).unwrap();
    assert_eq!(summary.files_written, vec![dir.join("out.csv")]);
    assert_eq!(summary.outcome.results.len(), 2);
    assert_eq!(summary.outcome.discards.total(), 3);
    assert_eq!(summary.outcome.rejections.total(), 1);
    assert_eq!(summary.outcome.input_count(), 6);
    // the run hands back the vocabulary it classified with
    assert!(summary.vocab.family("iphone").is_some());

    let text = fs::read_to_string(dir.join("out.csv")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, [
        "Title,Price,Amount,Location,URL",
        "iPhone 12 64GB Good Condition,€250.00,250.00,Dublin,https://www.donedeal.ie/phones/iphone-12/36012345",
        "\"iPhone 11, 128GB\",\"€1,050.00\",1050.00,Galway,https://www.donedeal.ie/phones/iphone-11/36012347",
    ]);
}

#[test]
fn discards_file_lists_reasons_in_order() {
    let dir = tmp_dir("discards");
    fs::write(dir.join("listings.csv"), SHEET).unwrap();
    let mut opts = options_for(&dir, "listings.csv");
    opts.export.write_discards = true;
    opts.export.include_headers = false;

    let summary = run_file(&opts, None).unwrap();
    assert_eq!(summary.files_written.len(), 2);
    assert_eq!(summary.files_written[1], dir.join("out_discarded.csv"));

    let text = fs::read_to_string(dir.join("out_discarded.csv")).unwrap();
    let reasons: Vec<&str> = text.lines().map(|l| l.split(',').next().unwrap()).collect();
    assert_eq!(reasons, ["WrongCategory", "Accessory", "Duplicate"]);
    assert!(text.lines().next().unwrap().starts_with("WrongCategory,toyota,Toyota Corolla 2015,"));
}

#[test]
fn tsv_input_and_output() {
    let dir = tmp_dir("tsv");
    let sheet = "Price\tTitle\tLink\n€300\tiPhone X\thttps://example.com/ad/55512345\n€20\tiPhone X cover\t\n";
    fs::write(dir.join("listings.tsv"), sheet).unwrap();

    let mut opts = options_for(&dir, "listings.tsv");
    opts.export.format = ExportFormat::Tsv;
    opts.export.set_path(dir.join("out").to_str().unwrap());

    let summary = run_file(&opts, None).unwrap();
    assert_eq!(summary.files_written, vec![dir.join("out.tsv")]);
    let text = fs::read_to_string(dir.join("out.tsv")).unwrap();
    assert_eq!(text.lines().nth(1), Some("iPhone X\t€300.00\t300.00\t\thttps://example.com/ad/55512345"));
}

#[test]
fn missing_price_column_is_reported() {
    let dir = tmp_dir("missing_col");
    let path = dir.join("bad.csv");
    fs::write(&path, "title,url\niPhone,https://example.com\n").unwrap();
    assert!(matches!(load_records(&path), Err(LoadError::MissingColumn { column: "price", .. })));
}

#[test]
fn empty_sheet_has_no_header() {
    let dir = tmp_dir("empty");
    let path = dir.join("empty.csv");
    fs::write(&path, "\n\n").unwrap();
    assert!(matches!(load_records(&path), Err(LoadError::MissingHeader(_))));
}

#[test]
fn short_rows_read_missing_cells_as_absent() {
    let dir = tmp_dir("short");
    let path = dir.join("short.csv");
    fs::write(&path, "title,price,url,location,id\niPhone 8,€90\n").unwrap();
    let recs = load_records(&path).unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].url, "");
    assert_eq!(recs[0].location, None);
    assert_eq!(recs[0].source_id, None);
}
