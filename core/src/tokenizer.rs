use crate::config::NormalizerConfig;
use crate::error::{IndexError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // Maximal runs of characters that are neither alphanumeric nor underscore.
    // Combining marks stay with the letter they modify.
    static ref SEPARATORS: Regex = Regex::new(r"[^\p{Alphabetic}\p{N}\p{M}_]+").expect("valid regex");
}

const ENGLISH_STOPWORDS: &[&str] = &[
    "a","about","above","after","again","against","all","am","an","and","any","are","as","at",
    "be","because","been","before","being","below","between","both","but","by",
    "can","cannot","could",
    "did","do","does","doing","down","during",
    "each","few","for","from","further",
    "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
    "i","if","in","into","is","it","its","itself",
    "me","more","most","my","myself",
    "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
    "same","she","should","so","some","such",
    "than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
    "under","until","up","very",
    "was","we","were","what","when","where","which","while","who","whom","why","with","would",
    "you","your","yours","yourself","yourselves"
];

/// Lowercase `text` and split it into tokens on runs of non-word characters.
fn split_tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    SEPARATORS
        .replace_all(&lowered, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Deterministic term -> stem strategy.
pub trait Stem: Send + Sync {
    fn stem(&self, token: &str) -> String;
}

impl Stem for Stemmer {
    fn stem(&self, token: &str) -> String {
        Stemmer::stem(self, token).into_owned()
    }
}

/// Leaves tokens untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl Stem for IdentityStemmer {
    fn stem(&self, token: &str) -> String {
        token.to_string()
    }
}

/// Resolve a Snowball algorithm by its lowercase language name.
pub fn algorithm_for(language: &str) -> Result<Algorithm> {
    let algorithm = match language.to_lowercase().as_str() {
        "arabic" => Algorithm::Arabic,
        "danish" => Algorithm::Danish,
        "dutch" => Algorithm::Dutch,
        "english" => Algorithm::English,
        "finnish" => Algorithm::Finnish,
        "french" => Algorithm::French,
        "german" => Algorithm::German,
        "greek" => Algorithm::Greek,
        "hungarian" => Algorithm::Hungarian,
        "italian" => Algorithm::Italian,
        "norwegian" => Algorithm::Norwegian,
        "portuguese" => Algorithm::Portuguese,
        "romanian" => Algorithm::Romanian,
        "russian" => Algorithm::Russian,
        "spanish" => Algorithm::Spanish,
        "swedish" => Algorithm::Swedish,
        "tamil" => Algorithm::Tamil,
        "turkish" => Algorithm::Turkish,
        other => return Err(IndexError::UnknownLanguage(other.to_string())),
    };
    Ok(algorithm)
}

/// Set of discrete stopword tokens, matched whole against normalized tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// The built-in English list.
    pub fn english() -> Self {
        Self::from_words(ENGLISH_STOPWORDS.iter())
    }

    /// Load a whitespace separated stopword file. Lines starting with `#` are ignored.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| IndexError::StopwordsUnavailable(format!("{}: {e}", path.display())))?;
        Ok(Self::from_words(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#'))
                .flat_map(str::split_whitespace),
        ))
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Turns raw document text into its ordered sequence of terms.
pub struct Normalizer {
    stopwords: StopwordSet,
    stemmer: Box<dyn Stem>,
    nfkc: bool,
}

impl Normalizer {
    pub fn new(stopwords: StopwordSet, stemmer: Box<dyn Stem>) -> Self {
        Self { stopwords, stemmer, nfkc: false }
    }

    /// English Snowball stemming with the built-in stopword list.
    pub fn english() -> Self {
        Self::new(StopwordSet::english(), Box::new(Stemmer::create(Algorithm::English)))
    }

    pub fn from_config(config: &NormalizerConfig, stopwords: StopwordSet) -> Result<Self> {
        let stemmer: Box<dyn Stem> = if config.stem {
            Box::new(Stemmer::create(algorithm_for(&config.language)?))
        } else {
            Box::new(IdentityStemmer)
        };
        Ok(Self::new(stopwords, stemmer).with_nfkc(config.nfkc))
    }

    pub fn with_nfkc(mut self, nfkc: bool) -> Self {
        self.nfkc = nfkc;
        self
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Lowercase, strip punctuation, drop stopwords and stem.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        if self.nfkc {
            normalize(&text.nfkc().collect::<String>(), &self.stopwords, self.stemmer.as_ref())
        } else {
            normalize(text, &self.stopwords, self.stemmer.as_ref())
        }
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("stopwords", &self.stopwords.len())
            .field("nfkc", &self.nfkc)
            .finish()
    }
}

/// Free-standing form of [`Normalizer::normalize`].
pub fn normalize(text: &str, stopwords: &StopwordSet, stemmer: &dyn Stem) -> Vec<String> {
    split_tokens(text)
        .into_iter()
        .filter(|token| !stopwords.contains(token))
        .map(|token| stemmer.stem(&token))
        .collect()
}
