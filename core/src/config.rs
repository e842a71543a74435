use serde::{Deserialize, Serialize};

/// Marker appended to every term before its rotations are generated.
pub const DEFAULT_SENTINEL: char = '$';
/// Character k-gram length used for fuzzy matching.
pub const DEFAULT_KGRAM: usize = 3;

/// Options for a corpus build.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Width of the sliding term window the positional index is built over.
    /// With `ngram > 1` the space-joined windows are the vocabulary, so the
    /// incidence, rotation and k-gram indexes cover the same keys as the inverted index.
    pub ngram: usize,
    pub kgram: usize,
    pub sentinel: char,
    /// Abort on the first unavailable document instead of skipping it.
    pub strict: bool,
    pub parallel: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            ngram: 1,
            kgram: DEFAULT_KGRAM,
            sentinel: DEFAULT_SENTINEL,
            strict: false,
            parallel: true,
        }
    }
}

/// Normalizer configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Snowball algorithm name, e.g. "english" or "german".
    pub language: String,
    pub stem: bool,
    /// Apply NFKC compatibility folding before lowercasing.
    pub nfkc: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            language: "english".to_string(),
            stem: true,
            nfkc: false,
        }
    }
}
