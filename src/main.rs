use anyhow::{Context, Result};
use clap::Parser;

mod build;
mod config;
mod logging;
mod watch;

use build::Aggregator;
use config::Config;

#[derive(Parser)]
#[command(name = "void-css")]
#[command(version = "0.1.0")]
#[command(about = "Concatenate and minify the Void UI stylesheets")]
struct Cli {
    /// Rebuild whenever a stylesheet in the source directory changes
    #[arg(short, long)]
    watch: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::default();

    logging::init_logging(&config.logging)?;
    config::validate_or_bail(&config.build)?;

    let root = std::env::current_dir().context("Failed to determine working directory")?;
    let aggregator = Aggregator::new(config.build.with_root(&root));

    if cli.watch {
        return watch::watch(&aggregator);
    }

    let report = aggregator.build().context("Stylesheet build failed")?;
    for line in report.summary_lines(aggregator.config()) {
        println!("{}", line);
    }

    Ok(())
}
