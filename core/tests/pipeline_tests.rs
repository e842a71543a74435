use termdex::corpus::SourceDocument;
use termdex::positional::index_document;
use termdex::tokenizer::{IdentityStemmer, StopwordSet};
use termdex::{build, BuildOptions, CorpusIndex, Normalizer};

fn identity_normalizer(stopwords: &[&str]) -> Normalizer {
    Normalizer::new(StopwordSet::from_words(stopwords.iter()), Box::new(IdentityStemmer))
}

fn sources(docs: &[(&str, &str)]) -> Vec<SourceDocument> {
    docs.iter().map(|(id, text)| SourceDocument::loaded(*id, *text)).collect()
}

const LIBRARY: &[(&str, &str)] = &[
    ("grammar.txt", "The noun names a thing; the verb tells what the thing does."),
    ("letters.txt", "Letters, letters and more letters: a thing of the past?"),
    ("engine.txt", "The engine weaves algebraic patterns as the loom weaves flowers."),
    ("empty.txt", "... !!! ..."),
];

fn build_library(parallel: bool) -> CorpusIndex {
    let options = BuildOptions { parallel, ..BuildOptions::default() };
    build(sources(LIBRARY), &identity_normalizer(&["the", "a", "and", "of", "as"]), &options).unwrap()
}

#[test]
fn cat_and_dog_scenario() {
    let corpus = build(
        sources(&[("a", "the cat sat"), ("b", "the dog sat")]),
        &identity_normalizer(&["the"]),
        &BuildOptions::default(),
    )
    .unwrap();

    assert_eq!(corpus.vocabulary.terms(), &["cat", "dog", "sat"]);
    let sat = corpus.index.postings("sat").unwrap();
    assert_eq!(sat.len(), 2);
    assert_eq!(sat["a"], vec![1]);
    assert_eq!(sat["b"], vec![1]);
    assert_eq!(corpus.df.get("sat"), 2);
    assert_eq!(corpus.df.get("cat"), 1);
    assert_eq!(corpus.permutations.get("cat").unwrap(), &["cat$", "at$c", "t$ca", "$cat"]);
    assert_eq!(corpus.kgrams.get("cat").unwrap(), &["cat"]);
    assert!(corpus.is_complete());
}

#[test]
fn tf_matches_posting_lengths() {
    let corpus = build_library(true);
    for (term, postings) in corpus.index.iter() {
        for (doc, positions) in postings {
            assert_eq!(positions.len() as u32, corpus.tf.get(doc, term));
        }
    }
    assert_eq!(corpus.tf.get("letters.txt", "letters"), 3);
}

#[test]
fn df_matches_posting_keys() {
    let corpus = build_library(true);
    for (term, postings) in corpus.index.iter() {
        assert_eq!(corpus.df.get(term), postings.len() as u32);
    }
    assert_eq!(corpus.df.get("thing"), 2);
}

#[test]
fn incidence_agrees_with_index() {
    let corpus = build_library(true);
    assert_eq!(corpus.incidence.documents(), &corpus.documents[..]);
    for term in corpus.vocabulary.iter() {
        let row = corpus.incidence.row(term).unwrap();
        for (col, doc) in corpus.documents.iter().enumerate() {
            assert_eq!(row[col], corpus.index.contains(term, doc), "{term} / {doc}");
        }
    }
}

#[test]
fn positions_round_trip_through_index() {
    let corpus = build_library(true);
    for doc in &corpus.documents {
        let direct = index_document(&corpus.document_terms[doc], 1).unwrap();
        for (term, positions) in direct {
            assert_eq!(corpus.index.positions(&term, doc), Some(&positions[..]));
        }
    }
}

#[test]
fn rotation_closure() {
    let corpus = build_library(true);
    for term in corpus.vocabulary.iter() {
        let rots = corpus.permutations.get(term).unwrap();
        let n = term.chars().count() + 1;
        assert_eq!(rots.len(), n);
        let distinct: std::collections::HashSet<&String> = rots.iter().collect();
        assert_eq!(distinct.len(), n);
        let first: Vec<char> = rots[0].chars().collect();
        for (r, rot) in rots.iter().enumerate() {
            let mut rotated = first.clone();
            rotated.rotate_left(r);
            assert_eq!(rotated.iter().collect::<String>(), *rot);
        }
        let mut full_turn = first.clone();
        full_turn.rotate_left(n - 1);
        full_turn.rotate_left(1);
        assert_eq!(full_turn, first);
    }
}

#[test]
fn kgram_counts() {
    let corpus = build_library(true);
    for term in corpus.vocabulary.iter() {
        let len = term.chars().count();
        let grams = corpus.kgrams.get(term).unwrap();
        if len >= 3 {
            assert_eq!(grams.len(), len - 2);
        } else {
            assert!(grams.is_empty());
        }
    }
}

#[test]
fn rebuilding_is_idempotent() {
    assert_eq!(build_library(true), build_library(true));
    assert_eq!(build_library(true), build_library(false));
}

#[test]
fn empty_document_is_indexed_without_terms() {
    let corpus = build_library(true);
    assert!(corpus.documents.contains(&"empty.txt".to_string()));
    assert!(corpus.document_terms["empty.txt"].is_empty());
    assert!(corpus.tf.document("empty.txt").unwrap().is_empty());
}

#[test]
fn empty_corpus_builds_empty_structures() {
    let corpus = build(Vec::new(), &identity_normalizer(&[]), &BuildOptions::default()).unwrap();
    assert!(corpus.vocabulary.is_empty());
    assert!(corpus.index.is_empty());
    assert!(corpus.df.is_empty());
    assert!(corpus.incidence.is_empty());
    assert!(corpus.permutations.is_empty());
    assert!(corpus.kgrams.is_empty());
}

#[test]
fn unavailable_document_is_skipped_and_reported() {
    let mut docs = sources(&[("a", "the cat sat")]);
    docs.push(SourceDocument::unavailable("b", "permission denied"));
    let corpus = build(docs, &identity_normalizer(&["the"]), &BuildOptions::default()).unwrap();
    assert_eq!(corpus.documents, vec!["a".to_string()]);
    assert_eq!(corpus.skipped.len(), 1);
    assert_eq!(corpus.skipped[0].id, "b");
    assert!(corpus.skipped[0].reason.contains("permission denied"));
    assert_eq!(corpus.df.get("cat"), 1);
}

#[test]
fn sentinel_in_term_fails_the_build() {
    let options = BuildOptions { sentinel: 'x', ..BuildOptions::default() };
    let err = build(sources(&[("a", "fox")]), &identity_normalizer(&[]), &options).unwrap_err();
    assert!(err.is_configuration_violation());
}

#[test]
fn phrase_windows_index_compound_terms() {
    let options = BuildOptions { ngram: 2, ..BuildOptions::default() };
    let corpus = build(
        sources(&[("a", "new york new york"), ("b", "york city")]),
        &identity_normalizer(&[]),
        &options,
    )
    .unwrap();
    assert_eq!(corpus.index.positions("new york", "a"), Some(&[0, 2][..]));
    assert_eq!(corpus.df.get("york city"), 1);
    assert_eq!(corpus.vocabulary.terms(), &["new york", "york city", "york new"]);
    for term in corpus.vocabulary.iter() {
        assert_eq!(corpus.df.get(term), corpus.index.postings(term).unwrap().len() as u32);
        for doc in &corpus.documents {
            assert_eq!(corpus.incidence.get(term, doc), Some(corpus.index.contains(term, doc)));
        }
    }
    assert_eq!(corpus.incidence.row("new york"), Some(&[true, false][..]));
    assert_eq!(corpus.permutations.get("new york").map(<[String]>::len), Some(9));
    assert_eq!(corpus.kgrams.get("york city").unwrap()[3], "k c");
}
