use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    analyzer::{corpus::Corpus, frequency::FrequencyTable},
    error::{AnalysisError, Result},
};

/// One cell of a [`CooccurrenceMatrix`]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MatrixCell {
    pub row: String,
    pub col: String,
    pub count: u64,
}

/// Square, symmetric co-occurrence counts over a document's common words.
///
/// Rows and columns follow the common-word list exactly as supplied, so a
/// word listed twice owns two identical rows and columns.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CooccurrenceMatrix {
    words: Vec<String>,
    /// row-major, `words.len()²` cells
    counts: Vec<u64>,
}

impl CooccurrenceMatrix {
    fn zeroed(words: Vec<String>) -> Self {
        let dim = words.len();
        Self {
            words,
            counts: vec![0; dim * dim],
        }
    }

    /// Add one co-occurrence of the words at matrix indices `a` and `b`,
    /// then the mirrored one.
    #[inline]
    fn bump(&mut self, a: &[usize], b: &[usize]) {
        let dim = self.dim();
        for &i in a {
            for &j in b {
                self.counts[i * dim + j] += 1;
            }
        }
        for &j in b {
            for &i in a {
                self.counts[j * dim + i] += 1;
            }
        }
    }

    /// Number of rows (= columns)
    pub fn dim(&self) -> usize {
        self.words.len()
    }

    /// Row/column labels
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Count at row `i`, column `j`
    pub fn at(&self, i: usize, j: usize) -> Option<u64> {
        let dim = self.dim();
        if i >= dim || j >= dim {
            return None;
        }
        Some(self.counts[i * dim + j])
    }

    /// Count for a word pair. Duplicate labels resolve to their first row/column.
    pub fn get(&self, row_word: &str, col_word: &str) -> Result<u64> {
        let i = self.index_of(row_word)?;
        let j = self.index_of(col_word)?;
        Ok(self.counts[i * self.dim() + j])
    }

    fn index_of(&self, word: &str) -> Result<usize> {
        self.words
            .iter()
            .position(|w| w == word)
            .ok_or_else(|| AnalysisError::missing(format!("matrix word {word:?}")))
    }

    /// Rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[u64]> {
        // chunks() rejects 0
        self.counts.chunks(self.dim().max(1))
    }

    /// Every cell, row-major
    pub fn cells(&self) -> impl Iterator<Item = MatrixCell> + '_ {
        let dim = self.dim();
        self.counts.iter().enumerate().map(move |(idx, &count)| MatrixCell {
            row: self.words[idx / dim].clone(),
            col: self.words[idx % dim].clone(),
            count,
        })
    }

    pub fn is_symmetric(&self) -> bool {
        let dim = self.dim();
        (0..dim).all(|i| (i + 1..dim).all(|j| self.counts[i * dim + j] == self.counts[j * dim + i]))
    }

    /// Sum of all cells
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Windowed co-occurrence of `common_words` in one token sequence.
///
/// Positions are scanned left to right. Each common-word position not yet
/// claimed anchors a window `[pos - window, pos + window]` clipped to the
/// document. Every unordered pair of unclaimed common-word positions in that
/// window (anchor included) bumps its cell and the mirrored cell, and all of
/// those positions become claimed. A claimed position never anchors a window
/// and never joins a later one.
///
/// # Arguments
/// * `tokens` - the document's full token sequence
/// * `common_words` - matrix labels, in order; duplicates are kept
/// * `window` - half-width of the window in token positions
pub fn cooccurrence_matrix<T, S>(
    tokens: &[T],
    common_words: &[S],
    window: usize,
) -> CooccurrenceMatrix
where
    T: AsRef<str>,
    S: AsRef<str>,
{
    let mut matrix = CooccurrenceMatrix::zeroed(
        common_words.iter().map(|w| w.as_ref().to_string()).collect(),
    );

    // word -> every matrix index carrying that label
    let mut label_index: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (idx, word) in common_words.iter().enumerate() {
        label_index.entry(word.as_ref()).or_default().push(idx);
    }

    // per position: matrix indices of the token, None if not a common word
    let slots: Vec<Option<&[usize]>> = tokens
        .iter()
        .map(|t| label_index.get(t.as_ref()).map(Vec::as_slice))
        .collect();
    let Some(last) = slots.len().checked_sub(1) else {
        return matrix;
    };

    let mut claimed = vec![false; slots.len()];
    let mut candidates: Vec<&[usize]> = Vec::new();
    for anchor in 0..slots.len() {
        if claimed[anchor] || slots[anchor].is_none() {
            continue;
        }
        let lo = anchor.saturating_sub(window);
        let hi = anchor.saturating_add(window).min(last);

        candidates.clear();
        for pos in lo..=hi {
            if claimed[pos] {
                continue;
            }
            if let Some(indices) = slots[pos] {
                candidates.push(indices);
                claimed[pos] = true;
            }
        }

        for (i, a) in candidates.iter().enumerate() {
            for b in &candidates[i + 1..] {
                matrix.bump(a, b);
            }
        }
    }
    matrix
}

/// One matrix per document over that document's own top-k words.
///
/// Fails with `MissingKey` if a table names a document the corpus lacks.
pub fn cooccurrence_by_document(
    corpus: &Corpus,
    common_words_by_doc: &IndexMap<String, FrequencyTable>,
    window: usize,
) -> Result<IndexMap<String, CooccurrenceMatrix>> {
    debug!(doc_num = common_words_by_doc.len(), window, "Building co-occurrence matrices");
    common_words_by_doc
        .iter()
        .map(|(title, table)| -> Result<(String, CooccurrenceMatrix)> {
            let doc = corpus.get(title)?;
            let words: Vec<&str> = table.words().collect();
            Ok((title.clone(), cooccurrence_matrix(&doc.tokens, &words, window)))
        })
        .collect()
}
