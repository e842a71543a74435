use crate::config::BuildOptions;
use crate::corpus::SourceDocument;
use crate::error::{IndexError, Result};
use crate::incidence::{build_incidence, IncidenceMatrix};
use crate::index::{assemble, assemble_parallel, DocumentFrequency, InvertedIndex, TermFrequency};
use crate::kgram::{build_kgrams, KgramIndex};
use crate::permutation::{build_permutations, PermutationIndex};
use crate::positional::{index_document, PositionalMap};
use crate::tokenizer::Normalizer;
use crate::vocabulary::{build_vocabulary, Vocabulary};
use crate::{DocId, Term};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// A document left out of the build, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub id: DocId,
    pub reason: String,
}

/// Every structure produced by one corpus build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusIndex {
    /// Indexed documents in input order; the incidence matrix columns follow it.
    pub documents: Vec<DocId>,
    pub document_terms: BTreeMap<DocId, Vec<Term>>,
    pub vocabulary: Vocabulary,
    pub index: InvertedIndex,
    pub tf: TermFrequency,
    pub df: DocumentFrequency,
    pub incidence: IncidenceMatrix,
    pub permutations: PermutationIndex,
    pub kgrams: KgramIndex,
    pub skipped: Vec<SkippedDocument>,
}

impl CorpusIndex {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

struct AnalyzedDocument {
    id: DocId,
    terms: Vec<Term>,
    positions: PositionalMap,
}

fn analyze(id: &DocId, text: &str, normalizer: &Normalizer, ngram: usize) -> Result<AnalyzedDocument> {
    let terms = normalizer.normalize(text);
    let positions = index_document(&terms, ngram)?;
    tracing::debug!(document = %id, terms = terms.len(), "normalized document");
    Ok(AnalyzedDocument { id: id.clone(), terms, positions })
}

/// Run the whole build over already loaded sources.
///
/// Unavailable or duplicate documents are skipped and reported unless
/// `options.strict` is set. Configuration violations always fail the build.
pub fn build(sources: Vec<SourceDocument>, normalizer: &Normalizer, options: &BuildOptions) -> Result<CorpusIndex> {
    if options.ngram == 0 {
        return Err(IndexError::InvalidNgramSize(options.ngram));
    }
    if options.kgram == 0 {
        return Err(IndexError::InvalidKgramSize(options.kgram));
    }

    let mut loaded: Vec<(DocId, String)> = Vec::with_capacity(sources.len());
    let mut skipped: Vec<SkippedDocument> = Vec::new();
    let mut seen: HashSet<DocId> = HashSet::new();
    for source in sources {
        let failure = match source.text {
            Ok(_) if seen.contains(&source.id) => IndexError::InputUnavailable {
                document: source.id.clone(),
                reason: "duplicate document id".into(),
            },
            Ok(text) => {
                seen.insert(source.id.clone());
                loaded.push((source.id, text));
                continue;
            }
            Err(e) => e,
        };
        if options.strict {
            return Err(failure);
        }
        tracing::warn!(document = %source.id, error = %failure, "skipping document");
        skipped.push(SkippedDocument { id: source.id, reason: failure.to_string() });
    }

    let analyzed: Vec<AnalyzedDocument> = if options.parallel {
        loaded
            .par_iter()
            .map(|(id, text)| analyze(id, text, normalizer, options.ngram))
            .collect::<Result<_>>()?
    } else {
        loaded
            .iter()
            .map(|(id, text)| analyze(id, text, normalizer, options.ngram))
            .collect::<Result<_>>()?
    };
    tracing::info!(num_docs = analyzed.len(), skipped = skipped.len(), "normalized documents");

    // Vocabulary is final only once every document is normalized. It is drawn
    // from the positional keys, so phrase windows are vocabulary entries too.
    let vocabulary = build_vocabulary(analyzed.iter().map(|doc| doc.positions.keys()));
    let documents: Vec<DocId> = analyzed.iter().map(|doc| doc.id.clone()).collect();
    let term_sets: HashMap<DocId, HashSet<Term>> = analyzed
        .iter()
        .map(|doc| (doc.id.clone(), doc.positions.keys().cloned().collect()))
        .collect();

    let mut document_terms = BTreeMap::new();
    let mut maps: Vec<(DocId, PositionalMap)> = Vec::with_capacity(analyzed.len());
    for doc in analyzed {
        document_terms.insert(doc.id.clone(), doc.terms);
        maps.push((doc.id, doc.positions));
    }

    let (assembled, (incidence, (permutations, kgrams))) = if options.parallel {
        rayon::join(
            || assemble_parallel(maps),
            || {
                rayon::join(
                    || build_incidence(&vocabulary, &term_sets, &documents),
                    || {
                        rayon::join(
                            || build_permutations(&vocabulary, options.sentinel),
                            || build_kgrams(&vocabulary, options.kgram),
                        )
                    },
                )
            },
        )
    } else {
        (
            assemble(maps),
            (
                build_incidence(&vocabulary, &term_sets, &documents),
                (build_permutations(&vocabulary, options.sentinel), build_kgrams(&vocabulary, options.kgram)),
            ),
        )
    };
    let permutations = permutations?;
    let kgrams = kgrams?;

    tracing::info!(
        num_docs = documents.len(),
        num_terms = vocabulary.len(),
        num_index_keys = assembled.index.len(),
        skipped = skipped.len(),
        "index build complete"
    );

    Ok(CorpusIndex {
        documents,
        document_terms,
        vocabulary,
        index: assembled.index,
        tf: assembled.tf,
        df: assembled.df,
        incidence,
        permutations,
        kgrams,
        skipped,
    })
}
