use std::ops::RangeInclusive;

use super::error::VectorizerError;

pub const DEFAULT_MIN_NGRAM: usize = 1;
pub const DEFAULT_MAX_NGRAM: usize = 1;

#[derive(Clone, Debug, PartialEq)]
pub struct VectorizerParams {
    ngram_range: Vec<usize>,
    /// Minimum document frequency for filtering vocabulary.
    /// - If `min_df` is in (0.0, 1.0), it's a proportion of documents
    /// - If `min_df` >= 1.0, it's an absolute document count
    min_df: f64,
    /// Maximum document frequency for filtering vocabulary.
    /// - If `max_df` is in (0.0, 1.0], it's a proportion of documents
    /// - If `max_df` > 1.0, it's an absolute document count
    max_df: f64,
    /// Upper bound on the vocabulary size. Terms are ranked by their total
    /// count across the training corpus; `None` keeps every surviving term.
    max_features: Option<usize>,
    /// Apply sublinear tf scaling: replace term frequency `tf` with `1 + log(tf)`.
    /// This reduces the impact of terms that occur many times in a document.
    sublinear_tf: bool,
}

impl VectorizerParams {
    pub fn new(
        ngram_range: impl Into<RangeInclusive<usize>>,
        min_df: f64,
        max_df: f64,
        max_features: Option<usize>,
        sublinear_tf: bool,
    ) -> Result<Self, VectorizerError> {
        let range = ngram_range.into();
        let (min, max) = (*range.start(), *range.end());
        if min == 0 || min > max {
            return Err(VectorizerError::InvalidNgramRange { min, max });
        }
        // `!(x > 0.0)` also rejects NaN
        if !(min_df > 0.0) {
            return Err(VectorizerError::NonPositiveDocumentFrequency {
                name: "min_df",
                value: min_df,
            });
        }
        if !(max_df > 0.0) {
            return Err(VectorizerError::NonPositiveDocumentFrequency {
                name: "max_df",
                value: max_df,
            });
        }
        if max_features == Some(0) {
            return Err(VectorizerError::ZeroMaxFeatures);
        }
        Ok(Self {
            ngram_range: range.collect(),
            min_df,
            max_df,
            max_features,
            sublinear_tf,
        })
    }

    /// Default parameters capped at `max_features` terms.
    pub fn with_max_features(max_features: usize) -> Result<Self, VectorizerError> {
        let defaults = Self::default();
        Self::new(
            DEFAULT_MIN_NGRAM..=DEFAULT_MAX_NGRAM,
            defaults.min_df,
            defaults.max_df,
            Some(max_features),
            defaults.sublinear_tf,
        )
    }

    #[must_use]
    pub fn ngram_counts(&self) -> &[usize] {
        &self.ngram_range
    }

    #[must_use]
    pub fn ngram_range(&self) -> (usize, usize) {
        // `new` guarantees a non-empty range
        let first = self.ngram_range.first().copied().unwrap_or(DEFAULT_MIN_NGRAM);
        let last = self.ngram_range.last().copied().unwrap_or(first);
        (first, last)
    }

    #[must_use]
    pub fn min_df(&self) -> f64 {
        self.min_df
    }

    #[must_use]
    pub fn max_df(&self) -> f64 {
        self.max_df
    }

    #[must_use]
    pub fn max_features(&self) -> Option<usize> {
        self.max_features
    }

    #[must_use]
    pub fn sublinear_tf(&self) -> bool {
        self.sublinear_tf
    }

    /// Smallest document frequency a term may have, resolved against the corpus size.
    pub(crate) fn min_document_count(&self, num_documents: usize) -> f64 {
        if self.min_df < 1.0 {
            self.min_df * num_documents as f64
        } else {
            self.min_df
        }
    }

    /// Largest document frequency a term may have, resolved against the corpus size.
    pub(crate) fn max_document_count(&self, num_documents: usize) -> f64 {
        if self.max_df <= 1.0 {
            self.max_df * num_documents as f64
        } else {
            self.max_df
        }
    }
}

impl Default for VectorizerParams {
    fn default() -> Self {
        Self {
            ngram_range: vec![DEFAULT_MIN_NGRAM],
            min_df: 1.0,
            max_df: 1.0,
            max_features: None,
            sublinear_tf: false,
        }
    }
}
