use std::{borrow::Cow, sync::LazyLock};

use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use regex::Regex;
use tracing::debug;

/// Minimum number of texts before a progress bar is shown
const MIN_TEXTS_FOR_PROGRESS: usize = 1_000;

/// Runs of two or more word characters. Punctuation and whitespace delimit
/// tokens and single-character tokens are dropped.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

fn progress_bar_setup(len: usize, message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("progress template is valid")
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    pb
}

/// Split a single document into lowercase word tokens.
///
/// The text is lowercased first, then every match of `\b\w\w+\b` (Unicode
/// aware) becomes a token, in order of appearance.
#[must_use]
pub fn tokenize_document(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_owned())
        .collect()
}

pub fn tokenize<T: AsRef<str>>(texts: &[T]) -> Vec<Vec<String>> {
    debug!(num_texts = texts.len(), "Tokenizing texts");
    if texts.len() < MIN_TEXTS_FOR_PROGRESS {
        return texts
            .iter()
            .map(|text| tokenize_document(text.as_ref()))
            .collect();
    }

    let pb = progress_bar_setup(texts.len(), "Tokenizing texts");
    let result = texts
        .iter()
        .progress_with(pb.clone())
        .map(|text| tokenize_document(text.as_ref()))
        .collect();
    pb.finish_with_message("Tokenization complete");
    result
}
