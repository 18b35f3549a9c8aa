use std::path::PathBuf;

use catalog_harvester::cli::{init_tracing, print_json};
use catalog_harvester::extract::Extractor;
use clap::Parser;

/// Convert harvested catalog pages to a tree of YAML files.
#[derive(Parser)]
#[command(name = "catalog-to-yaml", version)]
struct Cli {
    /// Path of source directory containing harvested HTML pages
    pages_dir: PathBuf,

    /// Path of target directory for YAML files
    yaml_dir: PathBuf,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let stats = Extractor::new(cli.pages_dir, cli.yaml_dir).execute()?;

    if cli.json {
        print_json(&stats)?;
    } else {
        for category in stats.categories.iter().filter(|c| !c.skipped) {
            println!("{} {} converted.", category.written, category.category);
        }
    }
    Ok(())
}
