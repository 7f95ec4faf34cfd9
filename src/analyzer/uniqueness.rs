use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::analyzer::{corpus::Corpus, vocabulary::vocabularies};

/// Tokens found in exactly one document, keyed by title.
///
/// Each document's vocabulary minus the union of every other document's
/// vocabulary, sorted. Token comparison is exact string equality.
pub fn unique_tokens(corpus: &Corpus) -> IndexMap<String, Vec<String>> {
    let vocabs = vocabularies(corpus);

    // number of documents whose vocabulary holds each token
    let mut doc_freq: HashMap<&str, usize> = HashMap::new();
    for vocab in vocabs.values() {
        for tok in vocab.iter() {
            *doc_freq.entry(tok).or_insert(0) += 1;
        }
    }

    let result: IndexMap<String, Vec<String>> = vocabs
        .iter()
        .map(|(title, vocab)| {
            let mut unique: Vec<String> = vocab
                .iter()
                .filter(|tok| doc_freq.get(tok).copied() == Some(1))
                .map(str::to_string)
                .collect();
            unique.sort_unstable();
            (title.to_string(), unique)
        })
        .collect();

    debug!(
        doc_num = result.len(),
        unique_total = result.values().map(Vec::len).sum::<usize>(),
        "Computed document-unique tokens"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::corpus::Document;

    #[test]
    fn unique_per_document_sorted() {
        let corpus = Corpus::from_documents(vec![
            Document::new("A", &["the", "dog", "ran"]),
            Document::new("B", &["the", "cat", "sat"]),
        ]);
        let unique = unique_tokens(&corpus);
        assert_eq!(unique["A"], vec!["dog", "ran"]);
        assert_eq!(unique["B"], vec!["cat", "sat"]);
    }

    #[test]
    fn identical_vocabularies_have_nothing_unique() {
        let corpus = Corpus::from_documents(vec![
            Document::new("A", &["a", "b", "a"]),
            Document::new("B", &["b", "a"]),
            Document::new("C", &["c"]),
        ]);
        let unique = unique_tokens(&corpus);
        assert!(unique["A"].is_empty());
        assert!(unique["B"].is_empty());
        assert_eq!(unique["C"], vec!["c"]);
    }

    #[test]
    fn single_document_owns_everything() {
        let corpus = Corpus::from_documents(vec![Document::new("A", &["z", "y", "z"])]);
        assert_eq!(unique_tokens(&corpus)["A"], vec!["y", "z"]);
    }

    #[test]
    fn case_is_not_folded() {
        let corpus = Corpus::from_documents(vec![
            Document::new("A", &["Holmes"]),
            Document::new("B", &["holmes"]),
        ]);
        let unique = unique_tokens(&corpus);
        assert_eq!(unique["A"], vec!["Holmes"]);
        assert_eq!(unique["B"], vec!["holmes"]);
    }
}
