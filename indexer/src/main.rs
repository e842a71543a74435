use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use termdex::corpus::read_documents;
use termdex::persist::{save_corpus_index, DumpFormat, SinkPaths};
use termdex::{build, BuildOptions, Normalizer, NormalizerConfig, StopwordSet};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Text,
    Bin,
    All,
}

impl Format {
    fn dump_formats(self) -> Vec<DumpFormat> {
        match self {
            Format::Json => vec![DumpFormat::Json],
            Format::Text => vec![DumpFormat::Text],
            Format::Bin => vec![DumpFormat::Bin],
            Format::All => DumpFormat::ALL.to_vec(),
        }
    }
}

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build positional, incidence, rotation and k-gram indexes over a text corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every index from a .txt file or a directory of .txt files
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output directory for the dumps
        #[arg(long)]
        output: String,
        /// Stopword file; the built-in English list is used when omitted
        #[arg(long)]
        stopwords: Option<String>,
        /// Index sliding windows of this many terms
        #[arg(long, default_value_t = 1)]
        ngram: usize,
        /// Character k-gram length
        #[arg(long, default_value_t = 3)]
        kgram: usize,
        /// Rotation sentinel; must not occur in any term
        #[arg(long, default_value_t = '$')]
        sentinel: char,
        /// Abort when any document cannot be read
        #[arg(long, default_value_t = false)]
        strict: bool,
        /// Skip stemming
        #[arg(long, default_value_t = false)]
        no_stem: bool,
        /// Snowball stemming language
        #[arg(long, default_value = "english")]
        language: String,
        /// Apply NFKC folding before lowercasing
        #[arg(long, default_value_t = false)]
        nfkc: bool,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Run every stage on the calling thread
        #[arg(long, default_value_t = false)]
        sequential: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, stopwords, ngram, kgram, sentinel, strict, no_stem, language, nfkc, format, sequential } => {
            let options = BuildOptions { ngram, kgram, sentinel, strict, parallel: !sequential };
            let config = NormalizerConfig { language, stem: !no_stem, nfkc };
            build_index(&input, &output, stopwords.as_deref(), &config, &options, &format.dump_formats())
        }
    }
}

fn collect_files(input_path: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("txt") {
                files.push(p.to_path_buf());
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    }
    files
}

fn build_index(
    input: &str,
    output: &str,
    stopwords: Option<&str>,
    config: &NormalizerConfig,
    options: &BuildOptions,
    formats: &[DumpFormat],
) -> Result<()> {
    let files = collect_files(Path::new(input));
    if files.is_empty() {
        tracing::warn!(input, "no .txt documents found");
    }

    let stopword_set = match stopwords {
        Some(path) => StopwordSet::from_file(path)?,
        None => StopwordSet::english(),
    };
    let normalizer = Normalizer::from_config(config, stopword_set)?;

    let sources = read_documents(&files);
    let corpus = build(sources, &normalizer, options)?;
    for skipped in &corpus.skipped {
        tracing::warn!(document = %skipped.id, reason = %skipped.reason, "document skipped");
    }
    if corpus.documents.is_empty() && !corpus.skipped.is_empty() {
        bail!("every document was skipped");
    }

    let reports = save_corpus_index(&SinkPaths::new(output), &corpus, options, formats)?;
    let total: u64 = reports.iter().map(|r| r.bytes).sum();
    tracing::info!(output, dumps = reports.len(), total_bytes = total, "index build complete");
    Ok(())
}
