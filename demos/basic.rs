use corpus_analyzer::{
    backfill, cooccurrence_matrix, most_common, most_common_by_document, unique_tokens, Corpus,
    Document, NgramTable, TfidfTable,
};

fn main() -> corpus_analyzer::Result<()> {
    // build corpus
    let corpus = Corpus::from_documents(vec![
        Document::new("A", &["the", "dog", "ran", "the", "dog", "barked"]),
        Document::new("B", &["the", "cat", "sat", "on", "the", "mat"]),
        Document::new("C", &["a", "bird", "sang", "the", "bird", "flew"]),
    ]);

    // top-k per document, then the shared common-word set
    let top = most_common_by_document(&corpus, 2);
    let filled = backfill(&top, &corpus)?;
    println!("common words: {:?}", filled.common_words.iter().collect::<Vec<_>>());

    // tf-idf over the backfilled tables
    let tfidf = TfidfTable::score(&filled, &corpus, true)?;
    for (doc, rows) in tfidf.top_by_document(2) {
        let words: Vec<String> = rows
            .iter()
            .map(|r| format!("{}={:.3}", r.word, r.tfidf))
            .collect();
        println!("{doc}: {}", words.join(", "));
    }

    // uniqueness
    for (doc, tokens) in unique_tokens(&corpus) {
        println!("unique in {doc}: {tokens:?}");
    }

    // co-occurrence and bigrams of one document
    let a = corpus.get("A")?;
    let top_a = most_common(&a.tokens, 3);
    let words: Vec<&str> = top_a.words().collect();
    let matrix = cooccurrence_matrix(&a.tokens, &words, 1);
    for (word, row) in matrix.words().iter().zip(matrix.rows()) {
        println!("{word:>8} {row:?}");
    }
    let bigrams = NgramTable::count(&a.tokens, 2)?;
    for entry in bigrams.top(2) {
        println!("{} x{}", entry.joined(), entry.count);
    }
    Ok(())
}
