use std::path::PathBuf;

use catalog_harvester::cli::{init_tracing, print_json};
use catalog_harvester::harvest::{Harvester, HttpSource, DEFAULT_BASE_URL};
use clap::Parser;

/// Harvest HTML pages from the ParticipateDB catalog.
#[derive(Parser)]
#[command(name = "harvest-html", version)]
struct Cli {
    /// Path of target directory for harvested HTML pages
    pages_dir: PathBuf,

    /// Catalog root URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let harvester = Harvester::new(HttpSource::new()?).with_base_url(cli.base_url);
    let stats = harvester.execute(&cli.pages_dir).await?;

    if cli.json {
        print_json(&stats)?;
    } else {
        for category in &stats.categories {
            println!("{} {} harvested.", category.written, category.category);
        }
    }
    Ok(())
}
