use crate::positional::PositionalMap;
use crate::{DocId, Position, Term};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Document -> ascending positions of one term. Documents without the term have no entry.
pub type PositionalPostings = BTreeMap<DocId, Vec<Position>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvertedIndex {
    postings: BTreeMap<Term, PositionalPostings>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Upsert one posting. Returns true when `doc` was not yet listed under `term`.
    ///
    /// Positions merged into an existing posting are kept sorted and distinct.
    pub fn insert(&mut self, term: Term, doc: DocId, positions: Vec<Position>) -> bool {
        match self.postings.entry(term).or_default().entry(doc) {
            Entry::Vacant(slot) => {
                slot.insert(positions);
                true
            }
            Entry::Occupied(mut slot) => {
                let list = slot.get_mut();
                list.extend(positions);
                list.sort_unstable();
                list.dedup();
                false
            }
        }
    }

    pub fn postings(&self, term: &str) -> Option<&PositionalPostings> {
        self.postings.get(term)
    }

    pub fn positions(&self, term: &str, doc: &str) -> Option<&[Position]> {
        self.postings.get(term)?.get(doc).map(Vec::as_slice)
    }

    pub fn contains(&self, term: &str, doc: &str) -> bool {
        self.positions(term, doc).is_some()
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.postings.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Term, &PositionalPostings)> {
        self.postings.iter()
    }

    pub fn len(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }
}

/// Occurrence count of each term, per document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermFrequency {
    counts: BTreeMap<DocId, BTreeMap<Term, u32>>,
}

impl TermFrequency {
    pub fn get(&self, doc: &str, term: &str) -> u32 {
        self.counts.get(doc).and_then(|terms| terms.get(term)).copied().unwrap_or(0)
    }

    pub fn document(&self, doc: &str) -> Option<&BTreeMap<Term, u32>> {
        self.counts.get(doc)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DocId, &BTreeMap<Term, u32>)> {
        self.counts.iter()
    }

    pub fn len(&self) -> usize { self.counts.len() }

    pub fn is_empty(&self) -> bool { self.counts.is_empty() }
}

/// Number of documents containing each term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFrequency {
    counts: BTreeMap<Term, u32>,
}

impl DocumentFrequency {
    pub fn get(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Term, &u32)> {
        self.counts.iter()
    }

    pub fn len(&self) -> usize { self.counts.len() }

    pub fn is_empty(&self) -> bool { self.counts.is_empty() }
}

/// Output of the assembler: the merged index plus its tf and df tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assembled {
    pub index: InvertedIndex,
    pub tf: TermFrequency,
    pub df: DocumentFrequency,
}

impl Assembled {
    /// Fold one document's positional map into the tables.
    pub fn add_document(&mut self, doc: DocId, map: PositionalMap) {
        self.tf.counts.entry(doc.clone()).or_default();
        for (term, positions) in map {
            self.add_posting(term, doc.clone(), positions);
        }
    }

    // df moves only when the document is new for the term; tf always mirrors the stored list.
    fn add_posting(&mut self, term: Term, doc: DocId, positions: Vec<Position>) {
        let newly_listed = self.index.insert(term.clone(), doc.clone(), positions);
        if newly_listed {
            *self.df.counts.entry(term.clone()).or_insert(0) += 1;
        }
        let count = self.index.positions(&term, &doc).map_or(0, <[Position]>::len) as u32;
        self.tf.counts.entry(doc).or_default().insert(term, count);
    }

    /// Combine two partial results. Associative, so it can serve as a parallel reduce.
    pub fn merge(mut self, other: Assembled) -> Assembled {
        for doc in other.tf.counts.keys() {
            self.tf.counts.entry(doc.clone()).or_default();
        }
        for (term, postings) in other.index.postings {
            for (doc, positions) in postings {
                self.add_posting(term.clone(), doc, positions);
            }
        }
        self
    }
}

/// Merge per-document positional maps into one inverted index with tf and df.
pub fn assemble<I>(documents: I) -> Assembled
where
    I: IntoIterator<Item = (DocId, PositionalMap)>,
{
    documents.into_iter().fold(Assembled::default(), |mut acc, (doc, map)| {
        acc.add_document(doc, map);
        acc
    })
}

/// [`assemble`] as a rayon fold over document chunks followed by a merge reduce.
pub fn assemble_parallel(documents: Vec<(DocId, PositionalMap)>) -> Assembled {
    documents
        .into_par_iter()
        .fold(Assembled::default, |mut acc, (doc, map)| {
            acc.add_document(doc, map);
            acc
        })
        .reduce(Assembled::default, Assembled::merge)
}
