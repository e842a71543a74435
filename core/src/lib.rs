//! Search-support structures over a closed corpus: positional inverted index
//! with tf/df tables, boolean incidence matrix, rotation index for wildcard
//! lookups and character k-gram index for fuzzy matching.

pub mod config;
pub mod corpus;
pub mod error;
pub mod incidence;
pub mod index;
pub mod kgram;
pub mod permutation;
pub mod persist;
pub mod pipeline;
pub mod positional;
pub mod tokenizer;
pub mod vocabulary;

/// External document key: the source path or logical name.
pub type DocId = String;
/// A normalized, stemmed word.
pub type Term = String;
/// Zero-based offset into a document's term sequence.
pub type Position = u32;

pub use config::{BuildOptions, NormalizerConfig};
pub use error::{IndexError, Result};
pub use index::{Assembled, DocumentFrequency, InvertedIndex, PositionalPostings, TermFrequency};
pub use pipeline::{build, CorpusIndex, SkippedDocument};
pub use tokenizer::{Normalizer, StopwordSet};
pub use vocabulary::Vocabulary;
