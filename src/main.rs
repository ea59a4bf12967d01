use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

mod build;
mod commands;
mod config;

/// Generate a travel journal site from pages, posts and templates.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The site root, holding `site.config`
    site: PathBuf,

    /// Log every file as it is processed
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Treat SITE as a directory of sites and build each one
    #[arg(long, default_value = "false")]
    sites: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    init_logging(args.verbose);

    commands::build::run(&args)
}
