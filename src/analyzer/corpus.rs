use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// A titled, already tokenized document.
/// Tokens are used as-is: no case folding or cleaning happens here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    #[serde(alias = "text")]
    pub tokens: Vec<String>,
}

impl Document {
    /// Create a new Document
    pub fn new<T>(title: impl Into<String>, tokens: &[T]) -> Self
    where
        T: AsRef<str>,
    {
        Document {
            title: title.into(),
            tokens: tokens.iter().map(|t| t.as_ref().to_string()).collect(),
        }
    }

    /// Number of tokens in the document
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.tokens.len() as u64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// A fixed collection of documents keyed by title.
///
/// Iteration follows insertion order so every per-document result comes back
/// in a stable order, but no operation depends on that order for its values.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    documents: IndexMap<String, Document>,
}

impl Corpus {
    /// Create an empty corpus
    pub fn new() -> Self {
        Self {
            documents: IndexMap::new(),
        }
    }

    /// Build a corpus from documents.
    /// A later document replaces an earlier one with the same title.
    pub fn from_documents<I>(docs: I) -> Self
    where
        I: IntoIterator<Item = Document>,
    {
        let mut corpus = Self::new();
        for doc in docs {
            corpus.add_doc(doc);
        }
        corpus
    }

    /// Add a document.
    /// Replaces (and returns) an existing document with the same title.
    pub fn add_doc(&mut self, doc: Document) -> Option<Document> {
        self.documents.insert(doc.title.clone(), doc)
    }

    /// Get a document by title
    pub fn get(&self, title: &str) -> Result<&Document> {
        self.documents
            .get(title)
            .ok_or_else(|| AnalysisError::missing(format!("document {title:?}")))
    }

    pub fn contains_doc(&self, title: &str) -> bool {
        self.documents.contains_key(title)
    }

    pub fn doc_num(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(|k| k.as_str())
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    /// Total token count across all documents
    pub fn token_sum(&self) -> u64 {
        self.documents.values().map(Document::token_sum).sum()
    }

    /// Concatenate every document's tokens, in corpus order, into one document.
    /// Used for corpus-wide rankings.
    pub fn combined(&self, title: impl Into<String>) -> Document {
        let mut tokens = Vec::with_capacity(self.token_sum() as usize);
        for doc in self.documents.values() {
            tokens.extend(doc.tokens.iter().cloned());
        }
        Document {
            title: title.into(),
            tokens,
        }
    }
}

impl FromIterator<Document> for Corpus {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self::from_documents(iter)
    }
}
