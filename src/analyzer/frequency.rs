use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    analyzer::corpus::Corpus,
    error::{AnalysisError, Result},
    utils::{math, sort},
};

/// One (token, count) pair of a [`FrequencyTable`]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub token: String,
    pub count: u64,
}

impl FrequencyEntry {
    pub fn new(token: impl Into<String>, count: u64) -> Self {
        Self {
            token: token.into(),
            count,
        }
    }
}

/// Ranked token counts of one document.
/// Sorted by count descending; equal counts keep first-occurrence order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    /// Wrap entries that are already in rank order
    pub(crate) fn from_ranked(entries: Vec<FrequencyEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrequencyEntry> {
        self.entries.iter()
    }

    /// Tokens in rank order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.token.as_str())
    }

    /// Count of a token, if the token is ranked in this table
    pub fn count(&self, token: &str) -> Option<u64> {
        self.entries.iter().find(|e| e.token == token).map(|e| e.count)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.iter().any(|e| e.token == token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Each ranked token's share of `total_tokens` (count / total).
    ///
    /// # Arguments
    /// * `total_tokens` - token count of the document the table was built from
    pub fn relative(&self, total_tokens: u64) -> Result<Vec<(String, f64)>> {
        if total_tokens == 0 {
            return Err(AnalysisError::invalid(
                "relative frequency needs a document with at least one token",
            ));
        }
        Ok(self
            .entries
            .iter()
            .map(|e| (e.token.clone(), math::ratio(e.count, total_tokens)))
            .collect())
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a FrequencyEntry;
    type IntoIter = std::slice::Iter<'a, FrequencyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Count every token, keyed in first-occurrence order.
#[inline]
pub fn count_tokens<T>(tokens: &[T]) -> IndexMap<&str, u64>
where
    T: AsRef<str>,
{
    let mut counts: IndexMap<&str, u64> = IndexMap::new();
    for token in tokens {
        *counts.entry(token.as_ref()).or_insert(0) += 1;
    }
    counts
}

/// The `k` most frequent tokens, ties broken by first appearance.
/// `k = 0` gives an empty table; fewer than `k` distinct tokens gives all of them.
pub fn most_common<T>(tokens: &[T], k: usize) -> FrequencyTable
where
    T: AsRef<str>,
{
    if k == 0 {
        return FrequencyTable::default();
    }
    let counted: Vec<FrequencyEntry> = count_tokens(tokens)
        .into_iter()
        .map(|(token, count)| FrequencyEntry::new(token, count))
        .collect();
    FrequencyTable::from_ranked(sort::top_k_by_count(counted, k, |e| e.count))
}

/// [`most_common`] for every document, keyed by title in corpus order.
pub fn most_common_by_document(corpus: &Corpus, k: usize) -> IndexMap<String, FrequencyTable> {
    debug!(doc_num = corpus.doc_num(), k, "Ranking most common tokens per document");
    corpus
        .documents()
        .map(|doc| (doc.title.clone(), most_common(&doc.tokens, k)))
        .collect()
}

/// Mean character length of each document's top-`k` tokens, rounded to 2 places.
///
/// Fails with `InvalidArgument` when `k = 0` or a document has no tokens,
/// since the mean of an empty set is undefined.
pub fn mean_common_word_length(corpus: &Corpus, k: usize) -> Result<IndexMap<String, f64>> {
    if k == 0 {
        return Err(AnalysisError::invalid("mean word length needs k >= 1"));
    }
    corpus
        .documents()
        .map(|doc| -> Result<(String, f64)> {
            let table = most_common(&doc.tokens, k);
            let mean = math::mean::<f64, _>(table.words().map(|w| w.chars().count()))
                .ok_or_else(|| {
                    AnalysisError::invalid(format!(
                        "document {:?} has no tokens to average",
                        doc.title
                    ))
                })?;
            Ok((doc.title.clone(), math::round_to(mean, 2)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::corpus::Document;

    fn pairs(table: &FrequencyTable) -> Vec<(&str, u64)> {
        table.iter().map(|e| (e.token.as_str(), e.count)).collect()
    }

    #[test]
    fn ties_follow_first_occurrence() {
        let table = most_common(&["the", "dog", "ran"], 2);
        assert_eq!(pairs(&table), vec![("the", 1), ("dog", 1)]);
    }

    #[test]
    fn ranks_by_count_then_first_seen() {
        let tokens = ["b", "a", "c", "a", "c", "d", "c"];
        let table = most_common(&tokens, 10);
        assert_eq!(pairs(&table), vec![("c", 3), ("a", 2), ("b", 1), ("d", 1)]);
        assert_eq!(table.count("a"), Some(2));
        assert_eq!(table.count("zzz"), None);
    }

    #[test]
    fn zero_k_and_short_documents() {
        assert!(most_common(&["a", "b"], 0).is_empty());
        assert_eq!(most_common(&["a", "b", "a"], 5).len(), 2);
        assert!(most_common::<&str>(&[], 3).is_empty());
    }

    #[test]
    fn mean_length_is_rounded() {
        let corpus = Corpus::from_documents(vec![
            Document::new("A", &["ab", "abc", "ab", "abcd"]),
            Document::new("B", &["x"]),
        ]);
        let means = mean_common_word_length(&corpus, 3).unwrap();
        // (2 + 3 + 4) / 3
        assert_eq!(means["A"], 3.0);
        assert_eq!(means["B"], 1.0);

        let means = mean_common_word_length(&corpus, 2).unwrap();
        assert_eq!(means["A"], 2.5);
    }

    #[test]
    fn mean_length_counts_chars_not_bytes() {
        let corpus = Corpus::from_documents(vec![Document::new("A", &["café", "ab", "abc"])]);
        let means = mean_common_word_length(&corpus, 3).unwrap();
        assert_eq!(means["A"], 3.0);
    }

    #[test]
    fn mean_length_rejects_empty_sets() {
        let corpus = Corpus::from_documents(vec![Document::new("A", &[] as &[&str])]);
        assert!(matches!(
            mean_common_word_length(&corpus, 3),
            Err(AnalysisError::InvalidArgument(_))
        ));
        let corpus = Corpus::from_documents(vec![Document::new("A", &["a"])]);
        assert!(matches!(
            mean_common_word_length(&corpus, 0),
            Err(AnalysisError::InvalidArgument(_))
        ));
    }

    #[test]
    fn relative_frequency_divides_by_total() {
        let table = most_common(&["a", "a", "b", "c"], 2);
        let rel = table.relative(4).unwrap();
        assert_eq!(rel, vec![("a".to_string(), 0.5), ("b".to_string(), 0.25)]);
        assert!(table.relative(0).is_err());
    }
}
