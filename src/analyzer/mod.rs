pub mod backfill;
pub mod cooccurrence;
pub mod corpus;
pub mod frequency;
pub mod ngram;
pub mod report;
pub mod tfidf;
pub mod uniqueness;
pub mod vocabulary;
