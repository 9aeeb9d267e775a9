//! Run parameters loaded from `params.yaml`.
//!
//! Only `data_ingestion.test_size` is required, and only by the ingestion
//! stage. Every other key falls back to the value the pipeline has always
//! used, and each fallback is logged.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use sentiment_pre_processing::pre_processor::{
    DEFAULT_MAX_NGRAM, DEFAULT_MIN_NGRAM, VectorizerParams,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ConfigError;

pub const DEFAULT_PARAMS_PATH: &str = "params.yaml";
pub const DEFAULT_RANDOM_STATE: u64 = 42;
pub const DEFAULT_MAX_FEATURES: usize = 50;
pub const DEFAULT_POSITIVE_CLASS: &str = "neutral";
pub const DEFAULT_NEGATIVE_CLASS: &str = "sadness";

const TEST_SIZE_KEY: &str = "data_ingestion.test_size";

#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    pub data_ingestion: DataIngestionParams,
    pub feature_engineering: FeatureEngineeringParams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataIngestionParams {
    /// Fraction of rows assigned to the test split
    pub test_size: f64,
    /// Seed of the shuffling RNG used by the splitter
    pub random_state: u64,
    pub classes: LabelClasses,
}

/// The two sentiment classes kept by ingestion. `positive` becomes label 1,
/// `negative` becomes label 0.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LabelClasses {
    pub positive: String,
    pub negative: String,
}

impl Default for LabelClasses {
    fn default() -> Self {
        Self {
            positive: DEFAULT_POSITIVE_CLASS.to_owned(),
            negative: DEFAULT_NEGATIVE_CLASS.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEngineeringParams {
    pub vectorizer: VectorizerParams,
}

#[derive(Debug, Deserialize)]
struct RawParams {
    data_ingestion: RawDataIngestion,
    #[serde(default)]
    feature_engineering: Option<RawFeatureEngineering>,
}

#[derive(Debug, Deserialize)]
struct RawDataIngestion {
    test_size: f64,
    random_state: Option<u64>,
    classes: Option<LabelClasses>,
}

/// The part of the params file feature engineering reads. Other sections
/// are ignored.
#[derive(Debug, Default, Deserialize)]
struct RawFeatureSection {
    #[serde(default)]
    feature_engineering: Option<RawFeatureEngineering>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFeatureEngineering {
    max_features: Option<usize>,
    ngram_range: Option<(usize, usize)>,
    min_df: Option<f64>,
    max_df: Option<f64>,
    #[serde(default)]
    sublinear_tf: bool,
}

fn read_yaml(path: &Path) -> Result<serde_yaml::Value, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate the params file at `path`.
pub fn load_params(path: impl AsRef<Path>) -> Result<Params, ConfigError> {
    let path = path.as_ref();
    let value = read_yaml(path)?;
    if value
        .get("data_ingestion")
        .and_then(|section| section.get("test_size"))
        .is_none()
    {
        return Err(ConfigError::KeyMissing {
            path: path.to_path_buf(),
            key: TEST_SIZE_KEY,
        });
    }

    let raw: RawParams = serde_yaml::from_value(value).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let params = Params::resolve(path.to_path_buf(), raw)?;
    debug!(?params, "Loaded params");
    Ok(params)
}

/// Load only the `feature_engineering` section of the params file at `path`.
///
/// The `data_ingestion` section may be absent; it is not validated here.
pub fn load_feature_params(
    path: impl AsRef<Path>,
) -> Result<FeatureEngineeringParams, ConfigError> {
    let path = path.as_ref();
    let value = read_yaml(path)?;
    let raw: RawFeatureSection = if value.is_null() {
        RawFeatureSection::default()
    } else {
        serde_yaml::from_value(value).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?
    };
    let params = FeatureEngineeringParams::resolve(path.to_path_buf(), raw.feature_engineering)?;
    debug!(?params, "Loaded feature engineering params");
    Ok(params)
}

/// Read only the test split fraction from the params file.
pub fn load_test_size(path: impl AsRef<Path>) -> Result<f64, ConfigError> {
    load_params(path).map(|params| params.data_ingestion.test_size)
}

impl Params {
    fn resolve(path: PathBuf, raw: RawParams) -> Result<Self, ConfigError> {
        let data_ingestion = DataIngestionParams {
            test_size: raw.data_ingestion.test_size,
            random_state: raw.data_ingestion.random_state.unwrap_or_else(|| {
                warn!(
                    random_state = DEFAULT_RANDOM_STATE,
                    "data_ingestion.random_state not set, using default"
                );
                DEFAULT_RANDOM_STATE
            }),
            classes: raw.data_ingestion.classes.unwrap_or_else(|| {
                let classes = LabelClasses::default();
                warn!(
                    positive = %classes.positive,
                    negative = %classes.negative,
                    "data_ingestion.classes not set, using default"
                );
                classes
            }),
        };

        let feature_engineering = FeatureEngineeringParams::resolve(path, raw.feature_engineering)?;
        Ok(Self {
            data_ingestion,
            feature_engineering,
        })
    }
}

impl FeatureEngineeringParams {
    fn resolve(path: PathBuf, raw: Option<RawFeatureEngineering>) -> Result<Self, ConfigError> {
        let features = raw.unwrap_or_default();
        let max_features = features.max_features.unwrap_or_else(|| {
            warn!(
                max_features = DEFAULT_MAX_FEATURES,
                "feature_engineering.max_features not set, using default"
            );
            DEFAULT_MAX_FEATURES
        });
        let (min_n, max_n) = features
            .ngram_range
            .unwrap_or((DEFAULT_MIN_NGRAM, DEFAULT_MAX_NGRAM));
        let defaults = VectorizerParams::default();
        let vectorizer = VectorizerParams::new(
            min_n..=max_n,
            features.min_df.unwrap_or(defaults.min_df()),
            features.max_df.unwrap_or(defaults.max_df()),
            Some(max_features),
            features.sublinear_tf,
        )
        .map_err(|source| ConfigError::InvalidVectorizer { path, source })?;

        Ok(Self { vectorizer })
    }
}
