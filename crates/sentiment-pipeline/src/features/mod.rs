//! Stage 2 building blocks: TF-IDF features fitted on the training split.

mod assemble;
mod processed;

pub use assemble::{FEATURE_LABEL_COLUMN, FeatureTable};
pub use processed::{ProcessedRecord, read_processed};
use sentiment_pre_processing::pre_processor::{TfidfVectorizer, VectorizerParams, Vocabulary};
use tracing::info;

use crate::error::FeatureError;

/// Train and test feature tables sharing one fitted vocabulary.
#[derive(Debug, Clone)]
pub struct FeatureTables {
    pub train: FeatureTable,
    pub test: FeatureTable,
    pub vocabulary: Vocabulary,
}

fn split_records(records: &[ProcessedRecord]) -> (Vec<&str>, Vec<u8>) {
    records
        .iter()
        .map(|record| (record.content.as_str(), record.sentiment))
        .unzip()
}

/// Fit the vectorizer on `train` only and featurize both splits with it.
///
/// Nothing about `test` reaches the vocabulary or the idf weights. Fails if
/// the document frequency bounds prune every training term.
pub fn build_feature_tables(
    train: &[ProcessedRecord],
    test: &[ProcessedRecord],
    params: &VectorizerParams,
) -> Result<FeatureTables, FeatureError> {
    let (train_texts, train_labels) = split_records(train);
    let (test_texts, test_labels) = split_records(test);

    let (vectorizer, train_matrix) = TfidfVectorizer::fit_transform(&train_texts, params.clone())?;
    let test_matrix = vectorizer.transform(&test_texts);
    info!(
        train_docs = train.len(),
        test_docs = test.len(),
        vocab_size = vectorizer.num_features(),
        "Fitted TF-IDF vectorizer on training text"
    );

    Ok(FeatureTables {
        train: FeatureTable::from_sparse(&train_matrix, train_labels)?,
        test: FeatureTable::from_sparse(&test_matrix, test_labels)?,
        vocabulary: vectorizer.vocabulary().clone(),
    })
}
