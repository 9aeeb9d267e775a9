use std::{io, path::PathBuf};

use sentiment_pre_processing::pre_processor::VectorizerError;
use thiserror::Error;

/// Failure to obtain run parameters from the params file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("params file '{}' was not found", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read params file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse params file '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("params file '{}' is missing required key '{key}'", path.display())]
    KeyMissing { path: PathBuf, key: &'static str },
    #[error("invalid feature engineering parameters in '{}'", path.display())]
    InvalidVectorizer {
        path: PathBuf,
        #[source]
        source: VectorizerError,
    },
}

#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("data source '{source_name}' was not found: {reason}")]
    NotFound { source_name: String, reason: String },
    #[error("data source '{source_name}' contains no rows")]
    Empty { source_name: String },
    #[error("data source '{source_name}' could not be parsed: {reason}")]
    Malformed { source_name: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("expected column '{column}' is absent")]
    MissingColumn { column: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum SplitError {
    #[error("test fraction must lie strictly between 0 and 1, got {0}")]
    InvalidFraction(f64),
    #[error(
        "splitting {total} rows with test fraction {test_size} leaves an empty partition \
         ({train} train / {test} test)"
    )]
    EmptyPartition {
        total: usize,
        test_size: f64,
        train: usize,
        test: usize,
    },
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("refusing to overwrite existing file '{}'", path.display())]
    Exists { path: PathBuf },
    #[error("failed to write '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode CSV for '{}'", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum FeatureError {
    #[error("feature matrix has {rows} rows but {labels} labels were supplied")]
    RowMismatch { rows: usize, labels: usize },
    #[error("failed to fit the TF-IDF vectorizer on the training text")]
    Fit(#[from] VectorizerError),
}

/// Any failure of a pipeline stage. The first failure aborts the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
    #[error("schema error in '{source_name}': {error}")]
    Schema {
        source_name: String,
        error: SchemaError,
    },
    #[error(transparent)]
    Split(#[from] SplitError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error(transparent)]
    Feature(#[from] FeatureError),
}

impl PipelineError {
    pub(crate) fn schema(source_name: impl Into<String>, error: SchemaError) -> Self {
        Self::Schema {
            source_name: source_name.into(),
            error,
        }
    }
}
