use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    analyzer::{backfill::Backfill, corpus::Corpus},
    error::{AnalysisError, Result},
    utils::{math, sort},
};

/// TF / IDF formulas.
///
/// Implement this to plug a different weighting into [`TfidfTable::score_with`].
/// [`PlainEngine`] and [`SmoothedEngine`] are provided.
pub trait TfidfEngine {
    /// Term frequency of a word in one document
    /// # Arguments
    /// * `count` - occurrences of the word in the document
    /// * `token_sum` - total tokens in the document
    fn tf(count: u64, token_sum: u64) -> f64 {
        math::ratio(count, token_sum)
    }

    /// Inverse document frequency of a word
    /// # Arguments
    /// * `word` - the word, for error reporting
    /// * `doc_num` - number of documents in the corpus
    /// * `doc_freq` - number of documents where the word's count is > 0
    fn idf(word: &str, doc_num: usize, doc_freq: usize) -> Result<f64>;
}

/// `ln(N / df)`. Fails with `DivisionByZero` when `df = 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainEngine;

impl TfidfEngine for PlainEngine {
    fn idf(word: &str, doc_num: usize, doc_freq: usize) -> Result<f64> {
        if doc_freq == 0 {
            return Err(AnalysisError::DivisionByZero {
                word: word.to_string(),
            });
        }
        Ok((doc_num as f64 / doc_freq as f64).ln())
    }
}

/// `ln(1 + N / (df + 1))`. Always defined.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmoothedEngine;

impl TfidfEngine for SmoothedEngine {
    fn idf(_word: &str, doc_num: usize, doc_freq: usize) -> Result<f64> {
        Ok((1.0 + doc_num as f64 / (doc_freq as f64 + 1.0)).ln())
    }
}

/// One (document, word) row. TF, IDF and their product always travel together.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TfidfRow {
    pub document: String,
    pub word: String,
    pub frequency: u64,
    pub tf: f64,
    pub idf: f64,
    pub tfidf: f64,
}

/// Rows for every document × common word, grouped by document in corpus
/// order, words in common-word order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TfidfTable {
    rows: Vec<TfidfRow>,
    idf: IndexMap<String, f64>,
}

impl TfidfTable {
    /// Score backfilled tables, choosing the IDF formula per call.
    ///
    /// # Arguments
    /// * `backfill` - output of [`backfill`](crate::analyzer::backfill::backfill)
    /// * `corpus` - the corpus the tables were built from (for token totals)
    /// * `smooth_idf` - use `ln(1 + N/(df+1))` instead of `ln(N/df)`
    pub fn score(backfill: &Backfill, corpus: &Corpus, smooth_idf: bool) -> Result<Self> {
        if smooth_idf {
            Self::score_with::<SmoothedEngine>(backfill, corpus)
        } else {
            Self::score_with::<PlainEngine>(backfill, corpus)
        }
    }

    /// Score backfilled tables with an explicit engine.
    ///
    /// The tables must cover exactly the documents of `corpus`; a document
    /// on either side without a counterpart is `MissingKey`.
    pub fn score_with<E>(backfill: &Backfill, corpus: &Corpus) -> Result<Self>
    where
        E: TfidfEngine,
    {
        if let Some(title) = corpus.titles().find(|t| !backfill.tables.contains_key(*t)) {
            return Err(AnalysisError::missing(format!(
                "backfilled table for document {title:?}"
            )));
        }
        if let Some(title) = backfill.tables.keys().find(|t| !corpus.contains_doc(t)) {
            return Err(AnalysisError::missing(format!("document {title:?}")));
        }
        let doc_num = corpus.doc_num();

        // corpus-wide: one IDF per word
        let idf = backfill
            .common_words
            .iter()
            .map(|word| -> Result<(String, f64)> {
                let doc_freq = backfill
                    .tables
                    .values()
                    .filter(|table| table.count(word).unwrap_or(0) > 0)
                    .count();
                Ok((word.to_string(), E::idf(word, doc_num, doc_freq)?))
            })
            .collect::<Result<IndexMap<_, _>>>()?;

        let mut rows = Vec::with_capacity(doc_num * idf.len());
        for (title, table) in &backfill.tables {
            let token_sum = corpus.get(title)?.token_sum();
            for (word, &word_idf) in &idf {
                let frequency = table.count(word).ok_or_else(|| {
                    AnalysisError::missing(format!(
                        "common word {word:?} in backfilled table of {title:?}"
                    ))
                })?;
                let tf = E::tf(frequency, token_sum);
                rows.push(TfidfRow {
                    document: title.clone(),
                    word: word.clone(),
                    frequency,
                    tf,
                    idf: word_idf,
                    tfidf: tf * word_idf,
                });
            }
        }
        debug!(doc_num, words = idf.len(), rows = rows.len(), "Scored TF-IDF table");
        Ok(Self { rows, idf })
    }

    pub fn rows(&self) -> &[TfidfRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// IDF of a common word
    pub fn idf(&self, word: &str) -> Result<f64> {
        self.idf
            .get(word)
            .copied()
            .ok_or_else(|| AnalysisError::missing(format!("common word {word:?}")))
    }

    /// Rows of one document
    pub fn rows_for<'a>(&'a self, document: &'a str) -> impl Iterator<Item = &'a TfidfRow> + 'a {
        self.rows.iter().filter(move |r| r.document == document)
    }

    /// One row by (document, word)
    pub fn row(&self, document: &str, word: &str) -> Result<&TfidfRow> {
        self.rows
            .iter()
            .find(|r| r.document == document && r.word == word)
            .ok_or_else(|| AnalysisError::missing(format!("row ({document:?}, {word:?})")))
    }

    /// Each document's `k` highest TF-IDF rows, ties in common-word order.
    pub fn top_by_document(&self, k: usize) -> IndexMap<String, Vec<TfidfRow>> {
        let mut grouped: IndexMap<String, Vec<TfidfRow>> = IndexMap::new();
        for row in &self.rows {
            grouped.entry(row.document.clone()).or_default().push(row.clone());
        }
        for rows in grouped.values_mut() {
            sort::sort_by_score_desc(rows, |r| r.tfidf);
            rows.truncate(k);
        }
        grouped
    }
}
