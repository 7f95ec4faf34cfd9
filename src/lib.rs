/// This crate computes corpus-level lexical statistics over a fixed set of
/// tokenized documents.
pub mod analyzer;
pub mod error;
pub mod utils;

/// Document and Corpus
/// A `Document` is a title plus an already tokenized, already normalized token
/// sequence. A `Corpus` maps unique titles to documents.
///
/// The engine performs no cleaning, case folding or stopword removal; tokens
/// are compared by exact string equality.
pub use analyzer::corpus::{Corpus, Document};

/// Error type and Result alias
/// - `InvalidArgument`: a size that must be positive was 0, or a request
///   cannot be satisfied (mean length of zero words)
/// - `DivisionByZero`: unsmoothed IDF for a word no document contains
/// - `MissingKey`: lookup of a document or word that was never registered
pub use error::{AnalysisError, Result};

/// Frequency Analyzer
/// Ranked (token, count) tables: count descending, ties in first-occurrence
/// order. Also the mean character length of each document's top-k tokens.
pub use analyzer::frequency::{
    count_tokens, mean_common_word_length, most_common, most_common_by_document, FrequencyEntry,
    FrequencyTable,
};

/// Vocabulary Index
/// Per-document vocabularies, the union of every document's top-k words
/// (`CommonWordSet`), and corpus-wide union / intersection helpers.
pub use analyzer::vocabulary::{
    corpus_vocabulary, shared_tokens, vocabularies, CommonWordSet, VocabularySet,
};

/// Cross-Document Uniqueness
/// Tokens that occur in exactly one document.
pub use analyzer::uniqueness::unique_tokens;

/// Frequency Backfill
/// Extends every top-k table so that all documents report a count (possibly
/// zero) for every common word. Required before TF-IDF scoring.
pub use analyzer::backfill::{backfill, Backfill, BackfilledTable};

/// TF-IDF Scorer
/// TF = count / document tokens. IDF is corpus-wide, either plain
/// `ln(N / df)` or smoothed `ln(1 + N / (df + 1))`, chosen per call.
///
/// `TfidfEngine` is the seam for other weightings; `PlainEngine` and
/// `SmoothedEngine` are provided.
pub use analyzer::tfidf::{PlainEngine, SmoothedEngine, TfidfEngine, TfidfRow, TfidfTable};

/// Co-occurrence Builder
/// Symmetric windowed co-occurrence counts over a document's common words.
/// Positions consumed by one window are never counted again by a later one.
pub use analyzer::cooccurrence::{
    cooccurrence_by_document, cooccurrence_matrix, CooccurrenceMatrix, MatrixCell,
};

/// N-gram Analyzer
/// Sliding n-token windows and their per-document counts.
pub use analyzer::ngram::{analyze_ngrams, ngrams, NgramEntry, NgramTable};

/// Batch report
/// Runs every analysis over a corpus with one set of `AnalysisParams`.
/// Per-document stages run on the rayon pool; output order is corpus order.
pub use analyzer::report::{AnalysisParams, CorpusReport, COMBINED_TITLE};
