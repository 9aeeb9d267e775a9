//! Stage entry points.
//!
//! Each stage starts from files on disk and ends by writing files on disk.
//! The two stages share nothing but the data directory layout.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::{
    config,
    error::PipelineError,
    features,
    ingestion::{self, DataSource},
    persist::{self, OverwritePolicy},
};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const TRAIN_PROCESSED_FILE: &str = "train_processed.csv";
pub const TEST_PROCESSED_FILE: &str = "test_processed.csv";
pub const TRAIN_FEATURES_FILE: &str = "train_tfidf.csv";
pub const TEST_FEATURES_FILE: &str = "test_tfidf.csv";

/// Directory layout under the data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Output of data ingestion
    #[must_use]
    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("raw")
    }

    /// Output of the external cleaning step
    #[must_use]
    pub fn processed_dir(&self) -> PathBuf {
        self.root.join("processed")
    }

    /// Output of feature engineering
    #[must_use]
    pub fn features_dir(&self) -> PathBuf {
        self.root.join("features")
    }
}

impl Default for DataLayout {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

#[derive(Debug, Clone)]
pub struct IngestionOptions {
    pub params_path: PathBuf,
    pub source: DataSource,
    pub layout: DataLayout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionSummary {
    pub raw_rows: usize,
    pub kept_rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub train_path: PathBuf,
    pub test_path: PathBuf,
}

/// Stage 1: params → raw data → filter/relabel → split → `raw/{train,test}.csv`.
pub fn run_data_ingestion(options: &IngestionOptions) -> Result<IngestionSummary, PipelineError> {
    let params = config::load_params(&options.params_path)?.data_ingestion;
    let raw = ingestion::read_data(&options.source)?;
    let labeled = ingestion::relabel(&raw, &params.classes)
        .map_err(|err| PipelineError::schema(options.source.to_string(), err))?;
    let (train, test) = ingestion::split_table(&labeled, params.test_size, params.random_state)?;
    let (train_path, test_path) = persist::save_split(&options.layout.raw_dir(), &train, &test)?;

    let summary = IngestionSummary {
        raw_rows: raw.len(),
        kept_rows: labeled.len(),
        train_rows: train.len(),
        test_rows: test.len(),
        train_path,
        test_path,
    };
    info!(?summary, "Data ingestion complete");
    Ok(summary)
}

#[derive(Debug, Clone)]
pub struct FeatureOptions {
    pub params_path: PathBuf,
    pub layout: DataLayout,
    pub overwrite: OverwritePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSummary {
    pub train_rows: usize,
    pub test_rows: usize,
    pub num_features: usize,
    pub train_path: PathBuf,
    pub test_path: PathBuf,
}

/// Stage 2: `processed/*_processed.csv` → TF-IDF → `features/*_tfidf.csv`.
///
/// Only the `feature_engineering` section of the params file is read.
pub fn run_feature_engineering(options: &FeatureOptions) -> Result<FeatureSummary, PipelineError> {
    let params = config::load_feature_params(&options.params_path)?;
    let processed_dir = options.layout.processed_dir();
    let train = features::read_processed(&processed_dir.join(TRAIN_PROCESSED_FILE))?;
    let test = features::read_processed(&processed_dir.join(TEST_PROCESSED_FILE))?;

    let tables = features::build_feature_tables(&train, &test, &params.vectorizer)?;

    let features_dir = options.layout.features_dir();
    let train_path = features_dir.join(TRAIN_FEATURES_FILE);
    let test_path = features_dir.join(TEST_FEATURES_FILE);
    // both files are checked and fully written before either is published
    options.overwrite.check(&train_path)?;
    options.overwrite.check(&test_path)?;
    let staged = [
        tables.train.stage(&train_path)?,
        tables.test.stage(&test_path)?,
    ];
    for file in staged {
        file.publish(options.overwrite)?;
    }

    let summary = FeatureSummary {
        train_rows: tables.train.num_rows(),
        test_rows: tables.test.num_rows(),
        num_features: tables.vocabulary.len(),
        train_path,
        test_path,
    };
    info!(?summary, "Feature engineering complete");
    Ok(summary)
}
