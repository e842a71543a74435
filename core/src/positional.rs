use crate::error::{IndexError, Result};
use crate::{Position, Term};
use std::collections::BTreeMap;

/// Term -> ascending occurrence offsets within one document.
pub type PositionalMap = BTreeMap<Term, Vec<Position>>;

/// Record where each term occurs in `terms`.
///
/// With `n > 1` the sequence is first turned into space-joined windows of `n`
/// consecutive terms, so position `i` belongs to the phrase starting at term `i`.
/// A sequence shorter than `n` yields an empty map.
pub fn index_document(terms: &[Term], n: usize) -> Result<PositionalMap> {
    if n == 0 {
        return Err(IndexError::InvalidNgramSize(n));
    }
    let mut map = PositionalMap::new();
    if n == 1 {
        for (pos, term) in terms.iter().enumerate() {
            push_position(&mut map, term.clone(), pos);
        }
    } else {
        for (pos, window) in terms.windows(n).enumerate() {
            push_position(&mut map, window.join(" "), pos);
        }
    }
    Ok(map)
}

fn push_position(map: &mut PositionalMap, term: Term, pos: usize) {
    map.entry(term).or_default().push(pos as Position);
}
