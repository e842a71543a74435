use crate::Term;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sorted, duplicate-free list of every term in the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: Vec<Term>,
}

impl Vocabulary {
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.position(term).is_some()
    }

    /// Rank of `term` in lexical order.
    pub fn position(&self, term: &str) -> Option<usize> {
        self.terms.binary_search_by(|t| t.as_str().cmp(term)).ok()
    }
}

impl<'a> IntoIterator for &'a Vocabulary {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

/// Merge every document's terms into one lexically sorted vocabulary.
pub fn build_vocabulary<'a, I, D>(per_document_terms: I) -> Vocabulary
where
    I: IntoIterator<Item = D>,
    D: IntoIterator<Item = &'a Term>,
{
    let distinct: BTreeSet<&Term> = per_document_terms.into_iter().flatten().collect();
    Vocabulary { terms: distinct.into_iter().cloned().collect() }
}
