use anyhow::Result;
use clap::Parser;
use sentiment_pipeline::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::run(&cli)
}
