use ahash::AHashMap as HashMap;
use sprs::CsMat;
use tracing::debug;

use super::{
    error::VectorizerError,
    ngrams::{self, TermStatistics},
    params::VectorizerParams,
    tokenizer,
    vocabulary::Vocabulary,
};

#[derive(Clone, Debug)]
pub struct CountVectorizer {
    params: VectorizerParams,
    vocab: Vocabulary,
}

impl CountVectorizer {
    fn count_documents<T: AsRef<str>>(
        texts: &[T],
        params: &VectorizerParams,
    ) -> Vec<HashMap<String, usize>> {
        tokenizer::tokenize(texts)
            .iter()
            .map(|tokens| ngrams::count_ngrams(tokens, params.ngram_counts()))
            .collect()
    }

    /// Select the vocabulary from per-document n-gram counts.
    ///
    /// Terms outside the `[min_df, max_df]` document frequency window are
    /// dropped, the rest are ranked by total corpus count (descending, ties
    /// broken by lexicographic order) and the top `max_features` are kept.
    ///
    /// On a non-empty corpus the window must admit at least one document
    /// count and at least one term must survive it.
    fn fit_from_ngrams(
        ngram_maps: &[HashMap<String, usize>],
        params: VectorizerParams,
    ) -> Result<Self, VectorizerError> {
        debug!("Building vocabulary from n-gram counts");
        let num_documents = ngram_maps.len();
        let statistics = ngrams::corpus_statistics(ngram_maps);
        let vocab_size = statistics.len();

        let min_count = params.min_document_count(num_documents);
        let max_count = params.max_document_count(num_documents);
        debug!(min_count, max_count, "Applying document frequency filtering");
        if num_documents > 0 && min_count > max_count {
            return Err(VectorizerError::EmptyDocumentFrequencyWindow {
                min_count,
                max_count,
                num_documents,
            });
        }

        let mut ranked = statistics
            .into_iter()
            .filter(|(_, stats)| {
                let df = stats.document_frequency as f64;
                df >= min_count && df <= max_count
            })
            .collect::<Vec<(String, TermStatistics)>>();
        debug!(
            original_size = vocab_size,
            filtered_size = ranked.len(),
            "Vocabulary filtered by document frequency"
        );
        if ranked.is_empty() && vocab_size > 0 {
            return Err(VectorizerError::AllTermsPruned {
                candidates: vocab_size,
            });
        }

        ranked.sort_unstable_by(|(a_term, a_stats), (b_term, b_stats)| {
            b_stats
                .corpus_frequency
                .cmp(&a_stats.corpus_frequency)
                .then_with(|| a_term.cmp(b_term))
        });
        if let Some(max_features) = params.max_features() {
            ranked.truncate(max_features);
        }

        let vocab = Vocabulary::from_ranked(ranked.into_iter().map(|(term, _)| term).collect());
        debug!(vocab_size = vocab.len(), "CountVectorizer fitting complete");

        Ok(Self { params, vocab })
    }

    pub fn transform<T: AsRef<str>>(&self, texts: &[T]) -> CsMat<f64> {
        debug!(
            num_texts = texts.len(),
            "Transforming texts using CountVectorizer"
        );
        let ngram_maps = Self::count_documents(texts, &self.params);
        self.transform_from_ngrams(&ngram_maps)
    }

    /// Build the CSR count matrix. N-grams outside the vocabulary are ignored.
    fn transform_from_ngrams(&self, ngram_maps: &[HashMap<String, usize>]) -> CsMat<f64> {
        let mut indptr = Vec::with_capacity(ngram_maps.len() + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();

        indptr.push(0);

        for ngrams in ngram_maps {
            let mut row_entries = ngrams
                .iter()
                .filter_map(|(ngram, &count)| {
                    self.vocab.get(ngram).map(|col_idx| (col_idx, count as f64))
                })
                .collect::<Vec<_>>();

            row_entries.sort_by_key(|(col_idx, _)| *col_idx);
            for (col_idx, count) in row_entries {
                indices.push(col_idx);
                data.push(count);
            }
            indptr.push(indices.len());
        }

        debug!(
            non_zero_entries = data.len(),
            "Text transformation complete"
        );
        CsMat::new(
            (ngram_maps.len(), self.num_features()),
            indptr,
            indices,
            data,
        )
    }

    /// Fit and transform from a single tokenization pass over `texts`.
    pub fn fit_transform<T: AsRef<str>>(
        texts: &[T],
        params: VectorizerParams,
    ) -> Result<(Self, CsMat<f64>), VectorizerError> {
        debug!(
            num_texts = texts.len(),
            "fit_transform: tokenizing and counting n-grams once"
        );
        let ngram_maps = Self::count_documents(texts, &params);
        let vectorizer = Self::fit_from_ngrams(&ngram_maps, params)?;
        let transformed = vectorizer.transform_from_ngrams(&ngram_maps);
        Ok((vectorizer, transformed))
    }

    pub fn num_features(&self) -> usize {
        self.vocab.len()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn params(&self) -> &VectorizerParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(texts: &[&str], params: VectorizerParams) -> CountVectorizer {
        CountVectorizer::fit_transform(texts, params).expect("fit succeeds").0
    }

    fn terms(vectorizer: &CountVectorizer) -> Vec<&str> {
        vectorizer
            .vocabulary()
            .terms()
            .iter()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn test_ranks_by_frequency_then_lexicographically() {
        let params = VectorizerParams::with_max_features(3).expect("valid params");
        let vectorizer = fit(&["good great good", "bad awful"], params);
        assert_eq!(terms(&vectorizer), vec!["good", "awful", "bad"]);
    }

    #[test]
    fn test_uncapped_keeps_every_term() {
        let vectorizer = fit(&["b a_ c_ b", "zz yy"], VectorizerParams::default());
        assert_eq!(terms(&vectorizer), vec!["a_", "c_", "yy", "zz"]);
    }

    #[test]
    fn test_min_df_drops_rare_terms() {
        let params = VectorizerParams::new(1..=1, 2.0, 1.0, None, false).expect("valid params");
        let vectorizer = fit(&["apple banana", "apple cherry", "apple banana"], params);
        assert_eq!(terms(&vectorizer), vec!["apple", "banana"]);
    }

    #[test]
    fn test_max_df_drops_ubiquitous_terms() {
        let params = VectorizerParams::new(1..=1, 1.0, 0.5, None, false).expect("valid params");
        let vectorizer = fit(&["the cat", "the dog", "the bird"], params);
        assert_eq!(terms(&vectorizer), vec!["bird", "cat", "dog"]);
    }

    #[test]
    fn test_inverted_document_frequency_window_is_rejected() {
        let params = VectorizerParams::new(1..=1, 5.0, 0.5, Some(50), false).expect("valid params");
        let err = CountVectorizer::fit_transform(&["good day", "bad day"], params)
            .expect_err("empty window");
        assert_eq!(
            err,
            VectorizerError::EmptyDocumentFrequencyWindow {
                min_count: 5.0,
                max_count: 1.0,
                num_documents: 2,
            }
        );
    }

    #[test]
    fn test_pruning_every_term_is_rejected() {
        let params = VectorizerParams::new(1..=1, 2.0, 2.0, None, false).expect("valid params");
        let err = CountVectorizer::fit_transform(&["good day", "bad night"], params)
            .expect_err("nothing survives");
        assert_eq!(err, VectorizerError::AllTermsPruned { candidates: 4 });
    }

    #[test]
    fn test_tokenless_corpus_is_not_pruned() {
        let (vectorizer, matrix) =
            CountVectorizer::fit_transform(&["", "a ! b"], VectorizerParams::default())
                .expect("fit succeeds");
        assert_eq!(vectorizer.num_features(), 0);
        assert_eq!(matrix.shape(), (2, 0));
    }

    #[test]
    fn test_transform_counts_known_terms_only() {
        let vectorizer = fit(&["good bad"], VectorizerParams::default());
        let matrix = vectorizer.transform(&["good good unknown bad"]);
        assert_eq!(matrix.shape(), (1, 2));
        let dense = matrix.to_dense();
        let bad = vectorizer.vocabulary().get("bad").expect("bad in vocabulary");
        let good = vectorizer.vocabulary().get("good").expect("good in vocabulary");
        assert!((dense[[0, good]] - 2.0).abs() < f64::EPSILON);
        assert!((dense[[0, bad]] - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_transform_matches_fit_then_transform() {
        let texts = ["one two two", "three two one", "four"];
        let (fitted, matrix) = CountVectorizer::fit_transform(&texts, VectorizerParams::default())
            .expect("fit succeeds");
        let counted = CountVectorizer::count_documents(&texts, fitted.params());
        let refitted = CountVectorizer::fit_from_ngrams(&counted, VectorizerParams::default())
            .expect("fit succeeds");
        assert_eq!(fitted.vocabulary(), refitted.vocabulary());
        assert_eq!(matrix.to_dense(), refitted.transform(&texts).to_dense());
    }

    #[test]
    fn test_empty_corpus_has_zero_columns() {
        let texts: [&str; 0] = [];
        let (vectorizer, matrix) =
            CountVectorizer::fit_transform(&texts, VectorizerParams::default())
                .expect("fit succeeds");
        assert_eq!(vectorizer.num_features(), 0);
        assert_eq!(matrix.shape(), (0, 0));
        assert_eq!(vectorizer.transform(&["anything here"]).shape(), (1, 0));
    }
}
