use thiserror::Error;

/// Errors raised while building the term indexes.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("document {document} unavailable: {reason}")]
    InputUnavailable { document: String, reason: String },

    #[error("stopword list unavailable: {0}")]
    StopwordsUnavailable(String),

    #[error("sentinel {sentinel:?} occurs in term {term:?}")]
    SentinelCollision { sentinel: char, term: String },

    #[error("k-gram size must be at least 1, got {0}")]
    InvalidKgramSize(usize),

    #[error("n-gram window must be at least 1, got {0}")]
    InvalidNgramSize(usize),

    #[error("unknown stemming language: {0}")]
    UnknownLanguage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, IndexError>;

impl IndexError {
    /// Invariant violations in the build configuration. These always abort a build.
    pub fn is_configuration_violation(&self) -> bool {
        matches!(
            self,
            IndexError::SentinelCollision { .. }
                | IndexError::InvalidKgramSize(_)
                | IndexError::InvalidNgramSize(_)
                | IndexError::UnknownLanguage(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_configuration_errors() {
        assert!(IndexError::InvalidKgramSize(0).is_configuration_violation());
        assert!(IndexError::SentinelCollision { sentinel: '$', term: "a$b".into() }.is_configuration_violation());
        let unavailable = IndexError::InputUnavailable { document: "a.txt".into(), reason: "missing".into() };
        assert!(!unavailable.is_configuration_violation());
    }

    #[test]
    fn display_names_the_document() {
        let err = IndexError::InputUnavailable { document: "corpus/a.txt".into(), reason: "not found".into() };
        assert_eq!(err.to_string(), "document corpus/a.txt unavailable: not found");
    }
}
