//! # sentiment-pipeline
//!
//! Offline data preparation for a binary tweet-sentiment classifier, in two
//! stages that only communicate through files:
//!
//! 1. **Data ingestion** ([`pipeline::run_data_ingestion`]): read the raw
//!    tweets, keep the two target classes, encode them as `1`/`0` and split
//!    them into `raw/train.csv` and `raw/test.csv`.
//! 2. **Feature engineering** ([`pipeline::run_feature_engineering`]): fit a
//!    TF-IDF vectorizer on the processed training text, apply it unchanged to
//!    the test text and write `features/train_tfidf.csv` and
//!    `features/test_tfidf.csv` with a trailing `label` column.
//!
//! ```no_run
//! use sentiment_pipeline::{
//!     ingestion::DataSource,
//!     pipeline::{DataLayout, IngestionOptions, run_data_ingestion},
//! };
//!
//! let summary = run_data_ingestion(&IngestionOptions {
//!     params_path: "params.yaml".into(),
//!     source: DataSource::Path("tweet_emotions.csv".into()),
//!     layout: DataLayout::default(),
//! })?;
//! println!("{} train rows", summary.train_rows);
//! # Ok::<(), sentiment_pipeline::error::PipelineError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod ingestion;
pub mod persist;
pub mod pipeline;
pub mod table;
