use crate::config::BuildOptions;
use crate::error::Result;
use crate::pipeline::{CorpusIndex, SkippedDocument};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;

pub const META_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DumpFormat {
    Json,
    Text,
    Bin,
}

impl DumpFormat {
    pub const ALL: [DumpFormat; 3] = [DumpFormat::Json, DumpFormat::Text, DumpFormat::Bin];

    fn extension(self) -> &'static str {
        match self {
            DumpFormat::Json => "json",
            DumpFormat::Text => "txt",
            DumpFormat::Bin => "bin",
        }
    }
}

/// Where a dump landed and how large it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpReport {
    pub path: PathBuf,
    pub bytes: u64,
}

impl DumpReport {
    pub fn megabytes(&self) -> f64 {
        megabytes(self.bytes)
    }
}

pub fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: u32,
    pub skipped: Vec<SkippedDocument>,
    pub options: BuildOptions,
    pub created_at: String,
    pub version: u32,
}

pub struct SinkPaths {
    pub root: PathBuf,
}

impl SinkPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn dump(&self, name: &str, format: DumpFormat) -> PathBuf {
        self.root.join(format!("{name}.{}", format.extension()))
    }
    fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

fn write_dump(path: PathBuf, bytes: &[u8]) -> Result<DumpReport> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    let mut f = File::create(&path)?;
    f.write_all(bytes)?;
    let report = DumpReport { bytes: f.metadata()?.len(), path };
    tracing::info!(path = %report.path.display(), size_mb = report.megabytes(), "dump saved");
    Ok(report)
}

pub fn save_json<T: Serialize>(paths: &SinkPaths, name: &str, value: &T) -> Result<DumpReport> {
    let json = serde_json::to_vec_pretty(value)?;
    write_dump(paths.dump(name, DumpFormat::Json), &json)
}

/// Plain `Debug` rendering, meant for eyeballing rather than reloading.
pub fn save_text<T: Debug>(paths: &SinkPaths, name: &str, value: &T) -> Result<DumpReport> {
    write_dump(paths.dump(name, DumpFormat::Text), format!("{value:?}").as_bytes())
}

pub fn save_bin<T: Serialize>(paths: &SinkPaths, name: &str, value: &T) -> Result<DumpReport> {
    let bytes = bincode::serialize(value)?;
    write_dump(paths.dump(name, DumpFormat::Bin), &bytes)
}

pub fn load_bin<T: DeserializeOwned>(paths: &SinkPaths, name: &str) -> Result<T> {
    let mut f = File::open(paths.dump(name, DumpFormat::Bin))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    Ok(bincode::deserialize(&buf)?)
}

pub fn load_json<T: DeserializeOwned>(paths: &SinkPaths, name: &str) -> Result<T> {
    let f = File::open(paths.dump(name, DumpFormat::Json))?;
    Ok(serde_json::from_reader(std::io::BufReader::new(f))?)
}

pub fn save<T: Serialize + Debug>(paths: &SinkPaths, name: &str, value: &T, format: DumpFormat) -> Result<DumpReport> {
    match format {
        DumpFormat::Json => save_json(paths, name, value),
        DumpFormat::Text => save_text(paths, name, value),
        DumpFormat::Bin => save_bin(paths, name, value),
    }
}

pub fn save_meta(paths: &SinkPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &SinkPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

/// Dump every structure of a build in each requested format, then write `meta.json`.
pub fn save_corpus_index(
    paths: &SinkPaths,
    corpus: &CorpusIndex,
    options: &BuildOptions,
    formats: &[DumpFormat],
) -> Result<Vec<DumpReport>> {
    let mut reports = Vec::new();
    for &format in formats {
        reports.push(save(paths, "vocabulary", &corpus.vocabulary, format)?);
        reports.push(save(paths, "inverted_index", &corpus.index, format)?);
        reports.push(save(paths, "tf", &corpus.tf, format)?);
        reports.push(save(paths, "df", &corpus.df, format)?);
        reports.push(save(paths, "incidence", &corpus.incidence, format)?);
        reports.push(save(paths, "permutations", &corpus.permutations, format)?);
        reports.push(save(paths, "kgrams", &corpus.kgrams, format)?);
    }
    let meta = MetaFile {
        num_docs: corpus.documents.len() as u32,
        num_terms: corpus.vocabulary.len() as u32,
        skipped: corpus.skipped.clone(),
        options: options.clone(),
        created_at: time::OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
        version: META_VERSION,
    };
    save_meta(paths, &meta)?;
    Ok(reports)
}
