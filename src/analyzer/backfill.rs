use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    analyzer::{
        corpus::Corpus,
        frequency::{count_tokens, FrequencyEntry, FrequencyTable},
        vocabulary::CommonWordSet,
    },
    error::Result,
};

/// A document's top-k table extended to cover the whole [`CommonWordSet`].
///
/// `ranked` is the original table, untouched. `backfilled` holds, in
/// common-word order, every common word the ranked table lacked, with its
/// true count in this document (possibly zero).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BackfilledTable {
    pub ranked: FrequencyTable,
    pub backfilled: Vec<FrequencyEntry>,
}

impl BackfilledTable {
    /// Ranked entries first, then backfilled ones
    pub fn iter(&self) -> impl Iterator<Item = &FrequencyEntry> {
        self.ranked.iter().chain(self.backfilled.iter())
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|e| e.token.as_str())
    }

    pub fn count(&self, word: &str) -> Option<u64> {
        self.iter().find(|e| e.token == word).map(|e| e.count)
    }

    pub fn len(&self) -> usize {
        self.ranked.len() + self.backfilled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Backfill result: the shared word set and every document's extended table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Backfill {
    pub common_words: CommonWordSet,
    pub tables: IndexMap<String, BackfilledTable>,
}

/// Extend every document's top-k table to cover all common words.
///
/// The common-word set is reduced from all tables before any table is
/// touched. Fails with `MissingKey` if a table names a document the corpus
/// does not hold.
pub fn backfill(
    common_words_by_doc: &IndexMap<String, FrequencyTable>,
    corpus: &Corpus,
) -> Result<Backfill> {
    let common_words = CommonWordSet::from_tables(common_words_by_doc.values());
    debug!(
        doc_num = common_words_by_doc.len(),
        common_words = common_words.len(),
        "Backfilling frequency tables"
    );

    let tables = common_words_by_doc
        .iter()
        .map(|(title, ranked)| -> Result<(String, BackfilledTable)> {
            let doc = corpus.get(title)?;
            let counts = count_tokens(&doc.tokens);
            let backfilled = common_words
                .iter()
                .filter(|word| !ranked.contains(word))
                .map(|word| {
                    FrequencyEntry::new(word, counts.get(word).copied().unwrap_or(0))
                })
                .collect();
            Ok((
                title.clone(),
                BackfilledTable {
                    ranked: ranked.clone(),
                    backfilled,
                },
            ))
        })
        .collect::<Result<IndexMap<_, _>>>()?;

    Ok(Backfill {
        common_words,
        tables,
    })
}
