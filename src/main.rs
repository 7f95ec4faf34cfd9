use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use corpus_analyzer::{AnalysisParams, Corpus, CorpusReport, Document};
use rayon::prelude::*;
use tracing::{info, warn};

/// Corpus analyzer: frequency, TF-IDF, co-occurrence and n-gram statistics
/// over a small fixed set of already cleaned documents.
#[derive(Parser)]
#[command(name = "corpus-analyzer", version, about)]
struct Cli {
    /// JSON file (`[{"title": .., "text": [tokens..]}, ..]`) or a directory
    /// of whitespace-tokenized text files
    input: PathBuf,

    /// JSON file with analysis parameters; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Size of each document's most-common table
    #[arg(long)]
    top_k: Option<usize>,

    /// How many top words feed the mean word length
    #[arg(long)]
    mean_length_k: Option<usize>,

    /// Co-occurrence window half-width
    #[arg(long)]
    window: Option<usize>,

    /// n-gram length
    #[arg(long)]
    ngram: Option<usize>,

    /// n-grams kept per document
    #[arg(long)]
    ngram_top_k: Option<usize>,

    /// Use smoothed IDF: ln(1 + N/(df+1))
    #[arg(long)]
    smooth_idf: bool,

    /// Output encoding
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Write the report here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Cbor,
}

impl Cli {
    fn params(&self) -> Result<AnalysisParams> {
        let mut params = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => AnalysisParams::default(),
        };
        if let Some(v) = self.top_k {
            params.top_k = v;
        }
        if let Some(v) = self.mean_length_k {
            params.mean_length_k = v;
        }
        if let Some(v) = self.window {
            params.window = v;
        }
        if let Some(v) = self.ngram {
            params.ngram_n = v;
        }
        if let Some(v) = self.ngram_top_k {
            params.ngram_top_k = v;
        }
        if self.smooth_idf {
            params.smooth_idf = true;
        }
        Ok(params)
    }
}

fn load_json_corpus(path: &Path) -> Result<Corpus> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let docs: Vec<Document> =
        serde_json::from_str(&raw).with_context(|| format!("parsing corpus {}", path.display()))?;
    Ok(Corpus::from_documents(docs))
}

// one document per file, titled by file name
fn load_dir_corpus(dir: &Path) -> Result<Corpus> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("listing {}", dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    let docs = files
        .par_iter()
        .map(|path| -> Result<Document> {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();
            let tokens: Vec<&str> = content.split_whitespace().collect();
            Ok(Document::new(title, &tokens))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Corpus::from_documents(docs))
}

fn write_report(report: &CorpusReport, format: Format, output: Option<&Path>) -> Result<()> {
    let bytes = match format {
        Format::Json => serde_json::to_vec_pretty(report).context("encoding report as JSON")?,
        Format::Cbor => serde_cbor::to_vec(report).context("encoding report as CBOR")?,
    };
    match output {
        Some(path) => {
            fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("corpus_analyzer=info")),
        )
        .init();

    let cli = Cli::parse();
    let params = cli.params()?;

    let load_start = Instant::now();
    let corpus = if cli.input.is_dir() {
        load_dir_corpus(&cli.input)?
    } else {
        load_json_corpus(&cli.input)?
    };
    if corpus.is_empty() {
        warn!(input = %cli.input.display(), "No documents loaded");
    }
    info!(
        doc_num = corpus.doc_num(),
        elapsed_ms = load_start.elapsed().as_secs_f64() * 1000.0,
        "Corpus loaded"
    );

    let analyze_start = Instant::now();
    let report = CorpusReport::build(&corpus, params)?;
    info!(elapsed_ms = analyze_start.elapsed().as_secs_f64() * 1000.0, "Analysis done");

    write_report(&report, cli.format, cli.output.as_deref())
}
