use ahash::AHashMap as HashMap;

/// Ordered set of terms selected during fitting.
///
/// The position of a term is its feature column. A vocabulary is built once
/// from training text and never modified afterwards.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from terms already in rank order.
    pub(crate) fn from_ranked(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        Self { terms, index }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in column order.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Column index of `term`, if it is part of the vocabulary.
    #[must_use]
    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    #[must_use]
    pub fn term(&self, column: usize) -> Option<&str> {
        self.terms.get(column).map(String::as_str)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
    }
}

impl Eq for Vocabulary {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_follows_rank_order() {
        let vocab = Vocabulary::from_ranked(vec!["good".into(), "awful".into(), "bad".into()]);
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.get("good"), Some(0));
        assert_eq!(vocab.get("bad"), Some(2));
        assert_eq!(vocab.get("great"), None);
        assert_eq!(vocab.term(1), Some("awful"));
        assert!(vocab.contains("awful"));
    }

    #[test]
    fn test_empty_vocabulary() {
        let vocab = Vocabulary::default();
        assert!(vocab.is_empty());
        assert_eq!(vocab.term(0), None);
    }
}
