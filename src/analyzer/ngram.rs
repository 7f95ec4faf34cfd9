use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    analyzer::corpus::Corpus,
    error::{AnalysisError, Result},
    utils::sort,
};

/// Contiguous `n`-token windows, sliding by one.
/// Yields `max(0, len - n + 1)` windows; `n = 0` is `InvalidArgument`.
pub fn ngrams<T>(tokens: &[T], n: usize) -> Result<Vec<&[T]>> {
    if n == 0 {
        return Err(AnalysisError::invalid("n-gram length must be >= 1"));
    }
    Ok(tokens.windows(n).collect())
}

/// One distinct n-gram and how often it occurs
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NgramEntry {
    pub gram: Vec<String>,
    pub count: u64,
}

impl NgramEntry {
    /// Tokens joined by single spaces
    pub fn joined(&self) -> String {
        self.gram.join(" ")
    }
}

/// Distinct n-gram counts of one document, in first-occurrence order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct NgramTable {
    n: usize,
    entries: Vec<NgramEntry>,
}

impl NgramTable {
    /// Count the `n`-grams of a token sequence
    pub fn count<T>(tokens: &[T], n: usize) -> Result<Self>
    where
        T: AsRef<str>,
    {
        let mut counts: IndexMap<Vec<&str>, u64> = IndexMap::new();
        for gram in ngrams(tokens, n)? {
            let key: Vec<&str> = gram.iter().map(|t| t.as_ref()).collect();
            *counts.entry(key).or_insert(0) += 1;
        }
        let entries = counts
            .into_iter()
            .map(|(gram, count)| NgramEntry {
                gram: gram.into_iter().map(str::to_string).collect(),
                count,
            })
            .collect();
        Ok(Self { n, entries })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn entries(&self) -> &[NgramEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count of one n-gram, 0 if it never occurs
    pub fn count_of<T>(&self, gram: &[T]) -> u64
    where
        T: AsRef<str>,
    {
        self.entries
            .iter()
            .find(|e| {
                e.gram.len() == gram.len() && e.gram.iter().zip(gram).all(|(a, b)| a == b.as_ref())
            })
            .map_or(0, |e| e.count)
    }

    /// The `k` most frequent n-grams, ties by first occurrence
    pub fn top(&self, k: usize) -> Vec<NgramEntry> {
        sort::top_k_by_count(self.entries.clone(), k, |e| e.count)
    }
}

/// [`NgramTable::count`] for every document, keyed by title in corpus order.
pub fn analyze_ngrams(corpus: &Corpus, n: usize) -> Result<IndexMap<String, NgramTable>> {
    debug!(doc_num = corpus.doc_num(), n, "Counting n-grams");
    corpus
        .documents()
        .map(|doc| -> Result<(String, NgramTable)> {
            Ok((doc.title.clone(), NgramTable::count(&doc.tokens, n)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::corpus::Document;

    #[test]
    fn unigrams_reproduce_the_sequence() {
        let tokens = ["a", "b", "a"];
        let grams = ngrams(&tokens, 1).unwrap();
        assert!(grams.iter().all(|g| g.len() == 1));
        let flat: Vec<&str> = grams.iter().map(|g| g[0]).collect();
        assert_eq!(flat, tokens);
    }

    #[test]
    fn window_count_and_bounds() {
        let tokens = ["a", "b", "c", "d"];
        assert_eq!(ngrams(&tokens, 2).unwrap().len(), 3);
        assert_eq!(ngrams(&tokens, 4).unwrap(), vec![&tokens[..]]);
        assert!(ngrams(&tokens, 5).unwrap().is_empty());
        assert!(matches!(ngrams(&tokens, 0), Err(AnalysisError::InvalidArgument(_))));
    }

    #[test]
    fn counts_and_ranks_bigrams() {
        let tokens = ["of", "the", "dog", "of", "the", "cat", "the", "dog"];
        let table = NgramTable::count(&tokens, 2).unwrap();
        assert_eq!(table.count_of(&["of", "the"]), 2);
        assert_eq!(table.count_of(&["the", "dog"]), 2);
        assert_eq!(table.count_of(&["dog", "cat"]), 0);

        let top: Vec<String> = table.top(3).iter().map(NgramEntry::joined).collect();
        // ties resolved by first occurrence
        assert_eq!(top, vec!["of the", "the dog", "dog of"]);
    }

    #[test]
    fn per_document_tables() {
        let corpus = Corpus::from_documents(vec![
            Document::new("A", &["a", "b", "a", "b"]),
            Document::new("B", &["x"]),
        ]);
        let tables = analyze_ngrams(&corpus, 2).unwrap();
        assert_eq!(tables["A"].count_of(&["a", "b"]), 2);
        assert!(tables["B"].is_empty());
        assert!(analyze_ngrams(&corpus, 0).is_err());
    }
}
