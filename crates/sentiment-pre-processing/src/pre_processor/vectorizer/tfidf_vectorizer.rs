use sprs::CsMat;
use tracing::debug;

use super::{
    count_vectorizer::CountVectorizer, error::VectorizerError, params::VectorizerParams,
    vocabulary::Vocabulary,
};

/// TF-IDF vectorizer fitted on a training corpus.
///
/// A value of this type only exists once [`TfidfVectorizer::fit`] has run, so
/// the vocabulary and idf weights are always available to [`transform`].
/// Transforming never alters either of them.
///
/// [`transform`]: TfidfVectorizer::transform
#[derive(Clone, Debug)]
pub struct TfidfVectorizer {
    count_vectorizer: CountVectorizer,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn the vocabulary and idf weights from `texts`.
    ///
    /// Fails when the document frequency bounds reject every term of a
    /// non-empty corpus.
    pub fn fit<T: AsRef<str>>(
        texts: &[T],
        count_vectorizer_params: VectorizerParams,
    ) -> Result<Self, VectorizerError> {
        Self::fit_transform(texts, count_vectorizer_params).map(|(vectorizer, _)| vectorizer)
    }

    /// Document frequencies are read off the training count matrix, then
    /// `idf(t) = ln((1 + n_docs) / (1 + df(t))) + 1`.
    fn fit_idf(count_vectorizer: CountVectorizer, tf_matrix: &CsMat<f64>) -> Self {
        debug!("Calculating IDF values");
        let n_docs = tf_matrix.rows() as f64;
        let mut df = vec![0usize; count_vectorizer.num_features()];

        for row_vec in tf_matrix.outer_iterator() {
            for (col_idx, _val) in row_vec.iter() {
                df[col_idx] += 1;
            }
        }
        let idf = df
            .iter()
            .map(|&doc_freq| ((n_docs + 1.0) / (doc_freq as f64 + 1.0)).ln() + 1.0)
            .collect();
        debug!("IDF calculation complete");

        Self {
            count_vectorizer,
            idf,
        }
    }

    pub fn transform<T: AsRef<str>>(&self, texts: &[T]) -> CsMat<f64> {
        debug!(
            num_texts = texts.len(),
            "Transforming texts using TfidfVectorizer"
        );
        self.apply_weighting(self.count_vectorizer.transform(texts))
    }

    /// Scale raw counts by idf and L2-normalize every row. Rows without any
    /// vocabulary term stay all-zero.
    fn apply_weighting(&self, mut tf_matrix: CsMat<f64>) -> CsMat<f64> {
        let sublinear_tf = self.count_vectorizer.params().sublinear_tf();

        for mut row_vec in tf_matrix.outer_iterator_mut() {
            for (col_idx, val) in row_vec.iter_mut() {
                if sublinear_tf {
                    *val = 1.0 + val.ln();
                }
                *val *= self.idf[col_idx];
            }
            let norm = row_vec.iter().map(|(_, &v)| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, val) in row_vec.iter_mut() {
                    *val /= norm;
                }
            }
        }
        tf_matrix
    }

    /// Fit on `texts` and return their TF-IDF matrix, tokenizing only once.
    pub fn fit_transform<T: AsRef<str>>(
        texts: &[T],
        count_vectorizer_params: VectorizerParams,
    ) -> Result<(Self, CsMat<f64>), VectorizerError> {
        debug!(num_texts = texts.len(), "Fitting TfidfVectorizer");
        let (count_vectorizer, tf_matrix) =
            CountVectorizer::fit_transform(texts, count_vectorizer_params)?;
        let vectorizer = Self::fit_idf(count_vectorizer, &tf_matrix);
        let transformed = vectorizer.apply_weighting(tf_matrix);
        Ok((vectorizer, transformed))
    }

    #[must_use]
    pub fn num_features(&self) -> usize {
        self.count_vectorizer.num_features()
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        self.count_vectorizer.vocabulary()
    }

    /// Inverse document frequency per feature column.
    #[must_use]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    #[must_use]
    pub fn params(&self) -> &VectorizerParams {
        self.count_vectorizer.params()
    }
}
