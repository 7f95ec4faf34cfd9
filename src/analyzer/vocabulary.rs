use std::collections::{BTreeSet, HashSet};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::{
    analyzer::{corpus::{Corpus, Document}, frequency::FrequencyTable},
    error::{AnalysisError, Result},
};

/// Distinct tokens of one document.
/// Borrowed from the document; never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularySet<'a> {
    tokens: HashSet<&'a str>,
}

impl<'a> VocabularySet<'a> {
    pub fn of(doc: &'a Document) -> Self {
        Self {
            tokens: doc.tokens.iter().map(|t| t.as_str()).collect(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.tokens.iter().copied()
    }

    /// Tokens in lexical order
    pub fn sorted(&self) -> Vec<&'a str> {
        let mut tokens: Vec<&str> = self.tokens.iter().copied().collect();
        tokens.sort_unstable();
        tokens
    }
}

/// Union of every document's top-k words.
///
/// This is the shared dimension of the TF-IDF table: words keep the order in
/// which they are first met while walking the tables in corpus order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonWordSet {
    words: IndexSet<String>,
}

impl CommonWordSet {
    /// Reduce per-document top-k tables into one word set.
    pub fn from_tables<'a, I>(tables: I) -> Self
    where
        I: IntoIterator<Item = &'a FrequencyTable>,
    {
        let words = tables
            .into_iter()
            .flat_map(|table| table.words())
            .map(str::to_string)
            .collect();
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Position of a word in the set
    pub fn index_of(&self, word: &str) -> Result<usize> {
        self.words
            .get_index_of(word)
            .ok_or_else(|| AnalysisError::missing(format!("common word {word:?}")))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.as_str())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for CommonWordSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Per-document vocabularies, keyed by title in corpus order.
pub fn vocabularies(corpus: &Corpus) -> IndexMap<&str, VocabularySet<'_>> {
    corpus
        .documents()
        .map(|doc| (doc.title.as_str(), VocabularySet::of(doc)))
        .collect()
}

/// Every distinct token of the corpus, sorted.
pub fn corpus_vocabulary(corpus: &Corpus) -> Vec<String> {
    corpus
        .documents()
        .flat_map(|doc| doc.tokens.iter().map(|t| t.as_str()))
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Tokens present in every document, sorted. Empty for an empty corpus.
pub fn shared_tokens(corpus: &Corpus) -> Vec<String> {
    let vocabs = vocabularies(corpus);
    let mut iter = vocabs.values();
    let Some(first) = iter.next() else {
        return Vec::new();
    };
    let rest: Vec<&VocabularySet<'_>> = iter.collect();
    let mut shared: Vec<String> = first
        .iter()
        .filter(|tok| rest.iter().all(|v| v.contains(tok)))
        .map(str::to_string)
        .collect();
    shared.sort_unstable();
    shared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::frequency::most_common;

    fn corpus() -> Corpus {
        Corpus::from_documents(vec![
            Document::new("A", &["the", "dog", "ran", "the"]),
            Document::new("B", &["the", "cat", "sat"]),
        ])
    }

    #[test]
    fn vocabulary_is_distinct_tokens() {
        let corpus = corpus();
        let doc = corpus.get("A").unwrap();
        let vocab = VocabularySet::of(doc);
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.sorted(), vec!["dog", "ran", "the"]);
    }

    #[test]
    fn union_and_intersection() {
        let corpus = corpus();
        assert_eq!(corpus_vocabulary(&corpus), vec!["cat", "dog", "ran", "sat", "the"]);
        assert_eq!(shared_tokens(&corpus), vec!["the"]);
        assert!(shared_tokens(&Corpus::new()).is_empty());
    }

    #[test]
    fn common_words_keep_first_seen_order() {
        let a = most_common(&["x", "y", "x"], 2);
        let b = most_common(&["z", "y", "z"], 2);
        let common = CommonWordSet::from_tables([&a, &b]);
        assert_eq!(common.iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);
        assert_eq!(common.index_of("z"), Ok(2));
        assert!(matches!(common.index_of("w"), Err(AnalysisError::MissingKey(_))));
    }
}
