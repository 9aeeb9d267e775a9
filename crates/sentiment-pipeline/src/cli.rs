use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::{
    config::DEFAULT_PARAMS_PATH,
    ingestion::{DEFAULT_SOURCE_URL, DataSource},
    persist::OverwritePolicy,
    pipeline::{
        self, DEFAULT_DATA_DIR, DataLayout, FeatureOptions, IngestionOptions,
    },
};

#[derive(Parser)]
#[command(name = "sentiment-pipeline")]
#[command(about = "Prepare tweet sentiment data and TF-IDF features", long_about = None)]
pub struct Cli {
    /// Params file
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_PARAMS_PATH, global = true)]
    pub params: PathBuf,

    /// Root of the data directory (raw/, processed/, features/)
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_DATA_DIR, global = true)]
    pub data_dir: PathBuf,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, conflicts_with = "quiet", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read raw tweets, keep two classes, split and write raw/{train,test}.csv
    Ingest {
        /// CSV file path or http(s) URL of the raw dataset
        #[arg(short, long, value_name = "PATH|URL", default_value = DEFAULT_SOURCE_URL)]
        source: DataSource,
    },
    /// Fit TF-IDF on processed train text and write features/{train,test}_tfidf.csv
    Features {
        /// Replace existing feature files instead of failing
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "warn",
            (_, true) => "debug",
            _ => "info",
        }
    }
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(cli: &Cli) -> Result<()> {
    init_logging(cli.log_level());
    let layout = DataLayout::new(&cli.data_dir);

    match &cli.command {
        Command::Ingest { source } => {
            let options = IngestionOptions {
                params_path: cli.params.clone(),
                source: source.clone(),
                layout,
            };
            let summary = pipeline::run_data_ingestion(&options).with_context(|| {
                format!("data ingestion stage failed (source: {source})")
            })?;
            println!(
                "Wrote {} train and {} test rows to {}",
                summary.train_rows,
                summary.test_rows,
                options.layout.raw_dir().display()
            );
        }
        Command::Features { force } => {
            let options = FeatureOptions {
                params_path: cli.params.clone(),
                layout,
                overwrite: if *force {
                    OverwritePolicy::Replace
                } else {
                    OverwritePolicy::Reject
                },
            };
            let summary = pipeline::run_feature_engineering(&options)
                .context("feature engineering stage failed")?;
            println!(
                "Wrote {} train and {} test rows with {} features to {}",
                summary.train_rows,
                summary.test_rows,
                summary.num_features,
                options.layout.features_dir().display()
            );
        }
    }
    Ok(())
}
