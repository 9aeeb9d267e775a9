use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum VectorizerError {
    #[error("ngram_range must satisfy 1 <= min <= max, got ({min}, {max})")]
    InvalidNgramRange { min: usize, max: usize },
    #[error("{name} must be positive, got {value}")]
    NonPositiveDocumentFrequency { name: &'static str, value: f64 },
    #[error("max_features must be at least 1 when set")]
    ZeroMaxFeatures,
    #[error(
        "max_df corresponds to fewer documents than min_df \
         ({max_count} < {min_count} of {num_documents} documents)"
    )]
    EmptyDocumentFrequencyWindow {
        min_count: f64,
        max_count: f64,
        num_documents: usize,
    },
    #[error("all {candidates} terms were pruned by min_df/max_df; lower min_df or raise max_df")]
    AllTermsPruned { candidates: usize },
}
