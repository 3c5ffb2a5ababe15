// src/bin/cli.rs
use color_eyre::eyre::{Result, eyre};
use listing_sift::cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    cli::run().map_err(|e| {
        listing_sift::loge!("CLI failed: {}", e);
        eyre!("{e}")
    })
}
