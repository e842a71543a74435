use crate::vocabulary::Vocabulary;
use crate::{DocId, Term};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Boolean term x document membership, columns in a fixed document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidenceMatrix {
    documents: Vec<DocId>,
    rows: BTreeMap<Term, Vec<bool>>,
}

impl IncidenceMatrix {
    /// Column order.
    pub fn documents(&self) -> &[DocId] {
        &self.documents
    }

    pub fn row(&self, term: &str) -> Option<&[bool]> {
        self.rows.get(term).map(Vec::as_slice)
    }

    pub fn get(&self, term: &str, doc: &str) -> Option<bool> {
        let column = self.documents.iter().position(|d| d == doc)?;
        self.rows.get(term).map(|row| row[column])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Term, &Vec<bool>)> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One row per vocabulary term, one column per entry of `document_order`.
/// A document with no term set (e.g. skipped) gets an all-zero column.
pub fn build_incidence(
    vocabulary: &Vocabulary,
    per_document_terms: &HashMap<DocId, HashSet<Term>>,
    document_order: &[DocId],
) -> IncidenceMatrix {
    let columns: Vec<Option<&HashSet<Term>>> =
        document_order.iter().map(|doc| per_document_terms.get(doc)).collect();
    let rows = vocabulary
        .iter()
        .map(|term| {
            let row = columns
                .iter()
                .map(|set| set.is_some_and(|s| s.contains(term)))
                .collect();
            (term.clone(), row)
        })
        .collect();
    IncidenceMatrix { documents: document_order.to_vec(), rows }
}
