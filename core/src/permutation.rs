use crate::error::{IndexError, Result};
use crate::vocabulary::Vocabulary;
use crate::Term;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Term -> every cyclic rotation of `term + sentinel`, rotation offset 0 first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermutationIndex {
    sentinel: char,
    rotations: BTreeMap<Term, Vec<String>>,
}

impl PermutationIndex {
    pub fn sentinel(&self) -> char {
        self.sentinel
    }

    pub fn get(&self, term: &str) -> Option<&[String]> {
        self.rotations.get(term).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Term, &Vec<String>)> {
        self.rotations.iter()
    }

    pub fn len(&self) -> usize {
        self.rotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }

    /// Every `(rotation, term)` pair ordered by rotation, for prefix range scans.
    pub fn sorted_rotations(&self) -> Vec<(&str, &str)> {
        let mut table: Vec<(&str, &str)> = self
            .rotations
            .iter()
            .flat_map(|(term, rots)| rots.iter().map(move |r| (r.as_str(), term.as_str())))
            .collect();
        table.sort_unstable();
        table
    }
}

/// All rotations of `term + sentinel`, rotating by characters.
pub fn rotations(term: &str, sentinel: char) -> Vec<String> {
    let chars: Vec<char> = term.chars().chain(std::iter::once(sentinel)).collect();
    (0..chars.len())
        .map(|r| chars[r..].iter().chain(&chars[..r]).collect())
        .collect()
}

/// Build the rotation index. Fails if the sentinel appears inside any term.
pub fn build_permutations(vocabulary: &Vocabulary, sentinel: char) -> Result<PermutationIndex> {
    if let Some(term) = vocabulary.iter().find(|t| t.contains(sentinel)) {
        return Err(IndexError::SentinelCollision { sentinel, term: term.clone() });
    }
    let rotations = vocabulary
        .iter()
        .map(|term| (term.clone(), rotations(term, sentinel)))
        .collect();
    Ok(PermutationIndex { sentinel, rotations })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::build_vocabulary;

    fn vocab(words: &[&str]) -> Vocabulary {
        let terms: Vec<Term> = words.iter().map(|w| w.to_string()).collect();
        build_vocabulary([&terms])
    }

    #[test]
    fn rotates_with_sentinel() {
        assert_eq!(rotations("cat", '$'), vec!["cat$", "at$c", "t$ca", "$cat"]);
    }

    #[test]
    fn rotates_by_character_not_byte() {
        assert_eq!(rotations("né", '$'), vec!["né$", "é$n", "$né"]);
    }

    #[test]
    fn sentinel_collision_is_fatal() {
        let err = build_permutations(&vocab(&["ok", "us$d"]), '$').unwrap_err();
        assert!(matches!(err, IndexError::SentinelCollision { sentinel: '$', ref term } if term == "us$d"));
    }

    #[test]
    fn sorted_table_supports_prefix_scan() {
        let index = build_permutations(&vocab(&["cat", "cut"]), '$').unwrap();
        let table = index.sorted_rotations();
        assert_eq!(table.len(), 8);
        // c*t rotates to t$c*
        let hits: Vec<&str> = table
            .iter()
            .filter(|(rot, _)| rot.starts_with("t$c"))
            .map(|(_, term)| *term)
            .collect();
        assert_eq!(hits, vec!["cat", "cut"]);
    }
}
