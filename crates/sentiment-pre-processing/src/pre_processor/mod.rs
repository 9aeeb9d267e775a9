//! Text vectorization using TF-IDF over word n-grams.

mod vectorizer;

pub use vectorizer::{
    DEFAULT_MAX_NGRAM, DEFAULT_MIN_NGRAM, TfidfVectorizer, VectorizerError, VectorizerParams,
    Vocabulary, tokenize_document,
};
