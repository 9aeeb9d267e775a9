//! Text pre-processing for the sentiment pipeline.
//!
//! Provides a word-level TF-IDF vectorizer whose vocabulary and idf weights
//! are learned from a training corpus and then applied unchanged to any other
//! document set.

pub mod pre_processor;
