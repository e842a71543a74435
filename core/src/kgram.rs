use crate::error::{IndexError, Result};
use crate::vocabulary::Vocabulary;
use crate::Term;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Term -> its character k-grams, left to right, duplicates kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KgramIndex {
    k: usize,
    grams: BTreeMap<Term, Vec<String>>,
}

impl KgramIndex {
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn get(&self, term: &str) -> Option<&[String]> {
        self.grams.get(term).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Term, &Vec<String>)> {
        self.grams.iter()
    }

    pub fn len(&self) -> usize {
        self.grams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grams.is_empty()
    }
}

/// Sliding window of `k` characters over `term`, no padding.
/// Terms shorter than `k` have no k-grams.
pub fn kgrams(term: &str, k: usize) -> Vec<String> {
    if k == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = term.chars().collect();
    chars.windows(k).map(|w| w.iter().collect()).collect()
}

pub fn build_kgrams(vocabulary: &Vocabulary, k: usize) -> Result<KgramIndex> {
    if k == 0 {
        return Err(IndexError::InvalidKgramSize(k));
    }
    let grams = vocabulary
        .iter()
        .map(|term| (term.clone(), kgrams(term, k)))
        .collect();
    Ok(KgramIndex { k, grams })
}
