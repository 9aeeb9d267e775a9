use ahash::AHashMap as HashMap;

/// Per-term counts accumulated over a corpus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TermStatistics {
    /// Number of documents containing the term at least once
    pub document_frequency: usize,
    /// Total occurrences of the term across all documents
    pub corpus_frequency: usize,
}

/// Count the word n-grams of one document. An n-gram is its tokens joined by a single space.
pub fn count_ngrams(tokens: &[String], ngram_range: &[usize]) -> HashMap<String, usize> {
    let mut ngram_counter = HashMap::new();

    for &n in ngram_range {
        for window in tokens.windows(n) {
            *ngram_counter.entry(window.join(" ")).or_insert(0) += 1;
        }
    }
    ngram_counter
}

pub fn corpus_statistics(ngram_maps: &[HashMap<String, usize>]) -> HashMap<String, TermStatistics> {
    let mut statistics: HashMap<String, TermStatistics> = HashMap::new();

    for ngrams in ngram_maps {
        for (ngram, &count) in ngrams {
            let entry = statistics.entry(ngram.clone()).or_default();
            entry.document_frequency += 1;
            entry.corpus_frequency += count;
        }
    }
    statistics
}
