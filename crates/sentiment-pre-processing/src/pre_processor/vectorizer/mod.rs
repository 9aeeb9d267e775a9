mod count_vectorizer;
mod error;
mod ngrams;
mod params;
mod tfidf_vectorizer;
mod tokenizer;
mod vocabulary;

pub use error::VectorizerError;
pub use params::{DEFAULT_MAX_NGRAM, DEFAULT_MIN_NGRAM, VectorizerParams};
pub use tfidf_vectorizer::TfidfVectorizer;
pub use tokenizer::tokenize_document;
pub use vocabulary::Vocabulary;
