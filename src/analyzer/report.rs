use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    analyzer::{
        backfill::{backfill, Backfill},
        cooccurrence::{cooccurrence_matrix, CooccurrenceMatrix},
        corpus::{Corpus, Document},
        frequency::{mean_common_word_length, most_common, FrequencyTable},
        ngram::{NgramEntry, NgramTable},
        tfidf::TfidfTable,
        uniqueness::unique_tokens,
        vocabulary::shared_tokens,
    },
    error::{AnalysisError, Result},
};

/// Title given to the whole-corpus pseudo document
pub const COMBINED_TITLE: &str = "Combined Corpus";

/// Knobs for a batch [`CorpusReport`]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnalysisParams {
    /// Top-k size of each document's frequency table
    pub top_k: usize,
    /// Top-k size used for mean word length
    pub mean_length_k: usize,
    /// Co-occurrence window half-width
    pub window: usize,
    /// n-gram length
    pub ngram_n: usize,
    /// How many n-grams to keep per document
    pub ngram_top_k: usize,
    /// Use `ln(1 + N/(df+1))` IDF
    pub smooth_idf: bool,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            top_k: 10,
            mean_length_k: 30,
            window: 5,
            ngram_n: 2,
            ngram_top_k: 10,
            smooth_idf: false,
        }
    }
}

impl AnalysisParams {
    /// Reject sizes that must be positive
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(AnalysisError::invalid("top_k must be >= 1"));
        }
        if self.mean_length_k == 0 {
            return Err(AnalysisError::invalid("mean_length_k must be >= 1"));
        }
        if self.ngram_n == 0 {
            return Err(AnalysisError::invalid("ngram_n must be >= 1"));
        }
        Ok(())
    }
}

/// Everything the presentation layer needs, computed in one pass.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CorpusReport {
    pub params: AnalysisParams,
    pub most_common: IndexMap<String, FrequencyTable>,
    pub combined_most_common: FrequencyTable,
    pub mean_word_length: IndexMap<String, f64>,
    pub unique_tokens: IndexMap<String, Vec<String>>,
    pub shared_tokens: Vec<String>,
    pub backfill: Backfill,
    pub tfidf: TfidfTable,
    pub cooccurrence: IndexMap<String, CooccurrenceMatrix>,
    pub top_ngrams: IndexMap<String, Vec<NgramEntry>>,
}

/// Per-document results computed on the worker pool
struct DocumentStats {
    title: String,
    most_common: FrequencyTable,
    cooccurrence: CooccurrenceMatrix,
    top_ngrams: Vec<NgramEntry>,
}

impl DocumentStats {
    fn compute(doc: &Document, params: &AnalysisParams) -> Result<Self> {
        let most_common = most_common(&doc.tokens, params.top_k);
        let words: Vec<&str> = most_common.words().collect();
        let cooccurrence = cooccurrence_matrix(&doc.tokens, &words, params.window);
        let top_ngrams = NgramTable::count(&doc.tokens, params.ngram_n)?.top(params.ngram_top_k);
        Ok(Self {
            title: doc.title.clone(),
            most_common,
            cooccurrence,
            top_ngrams,
        })
    }
}

impl CorpusReport {
    /// Run every analysis over a fixed corpus.
    ///
    /// Per-document stages run in parallel; all maps come back in corpus
    /// order regardless of scheduling. Fails atomically: no partial report.
    pub fn build(corpus: &Corpus, params: AnalysisParams) -> Result<Self> {
        params.validate()?;
        info!(doc_num = corpus.doc_num(), tokens = corpus.token_sum(), "Building corpus report");
        for doc in corpus.documents().filter(|d| d.is_empty()) {
            warn!(title = %doc.title, "Document has no tokens");
        }

        let docs: Vec<&Document> = corpus.documents().collect();
        let stats = docs
            .par_iter()
            .map(|doc| DocumentStats::compute(doc, &params))
            .collect::<Result<Vec<_>>>()?;
        debug!(doc_num = stats.len(), "Per-document stages complete");

        let mut most_common_by_doc = IndexMap::with_capacity(stats.len());
        let mut cooccurrence = IndexMap::with_capacity(stats.len());
        let mut top_ngrams = IndexMap::with_capacity(stats.len());
        for s in stats {
            most_common_by_doc.insert(s.title.clone(), s.most_common);
            cooccurrence.insert(s.title.clone(), s.cooccurrence);
            top_ngrams.insert(s.title, s.top_ngrams);
        }

        // cross-document stages need every table first
        let filled = backfill(&most_common_by_doc, corpus)?;
        let tfidf = TfidfTable::score(&filled, corpus, params.smooth_idf)?;
        let combined = corpus.combined(COMBINED_TITLE);

        let report = Self {
            combined_most_common: most_common(&combined.tokens, params.top_k),
            mean_word_length: mean_common_word_length(corpus, params.mean_length_k)?,
            unique_tokens: unique_tokens(corpus),
            shared_tokens: shared_tokens(corpus),
            most_common: most_common_by_doc,
            backfill: filled,
            tfidf,
            cooccurrence,
            top_ngrams,
            params,
        };
        info!(
            common_words = report.backfill.common_words.len(),
            tfidf_rows = report.tfidf.len(),
            "Corpus report complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Corpus {
        Corpus::from_documents(vec![
            Document::new("A", &["the", "dog", "ran", "the", "dog", "barked"]),
            Document::new("B", &["the", "cat", "sat", "the", "cat", "slept"]),
            Document::new("C", &["the", "bird", "sang", "a", "bird", "flew"]),
        ])
    }

    fn params() -> AnalysisParams {
        AnalysisParams {
            top_k: 2,
            mean_length_k: 2,
            window: 1,
            ngram_n: 2,
            ngram_top_k: 1,
            smooth_idf: true,
        }
    }

    #[test]
    fn report_keeps_corpus_order() {
        let report = CorpusReport::build(&corpus(), params()).unwrap();
        let titles: Vec<&str> = report.most_common.keys().map(String::as_str).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(
            report.cooccurrence.keys().collect::<Vec<_>>(),
            report.most_common.keys().collect::<Vec<_>>()
        );
        assert_eq!(report.top_ngrams["A"][0].joined(), "the dog");
    }

    #[test]
    fn report_shares_one_common_word_set() {
        let report = CorpusReport::build(&corpus(), params()).unwrap();
        let common: Vec<&str> = report.backfill.common_words.iter().collect();
        assert_eq!(common, vec!["the", "dog", "cat", "bird"]);
        assert_eq!(report.tfidf.len(), 3 * common.len());
        assert_eq!(report.shared_tokens, vec!["the"]);
        assert_eq!(report.combined_most_common.words().next(), Some("the"));
        assert_eq!(report.mean_word_length["A"], 3.0);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let mut p = params();
        p.ngram_n = 0;
        assert!(matches!(
            CorpusReport::build(&corpus(), p),
            Err(AnalysisError::InvalidArgument(_))
        ));
    }

    #[test]
    fn params_fill_defaults_from_partial_json() {
        let p: AnalysisParams =
            serde_json::from_str(r#"{"top_k": 3, "smooth_idf": true}"#).unwrap();
        assert_eq!(p.top_k, 3);
        assert!(p.smooth_idf);
        assert_eq!(p.window, AnalysisParams::default().window);
    }
}
