use crate::error::{IndexError, Result};
use crate::DocId;
use std::fs;
use std::path::Path;

/// A document identifier with its decoded text, or the reason it could not be read.
#[derive(Debug)]
pub struct SourceDocument {
    pub id: DocId,
    pub text: Result<String>,
}

impl SourceDocument {
    pub fn loaded(id: impl Into<DocId>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: Ok(text.into()) }
    }

    pub fn unavailable(id: impl Into<DocId>, reason: impl Into<String>) -> Self {
        let id = id.into();
        let text = Err(IndexError::InputUnavailable { document: id.clone(), reason: reason.into() });
        Self { id, text }
    }
}

/// Read each path as UTF-8 text. The path as given becomes the document id.
///
/// Failures are kept per document so one unreadable file does not stop the rest.
pub fn read_documents<P: AsRef<Path>>(paths: &[P]) -> Vec<SourceDocument> {
    paths
        .iter()
        .map(|p| {
            let path = p.as_ref();
            let id = path.to_string_lossy().into_owned();
            match fs::read_to_string(path) {
                Ok(text) => SourceDocument::loaded(id, text),
                Err(e) => {
                    tracing::debug!(document = %id, error = %e, "read failed");
                    SourceDocument::unavailable(id, e.to_string())
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_reported_per_document() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.txt");
        fs::write(&present, "hello").unwrap();
        let missing = dir.path().join("missing.txt");

        let docs = read_documents(&[present.clone(), missing]);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].text.as_deref().unwrap(), "hello");
        assert!(matches!(docs[1].text, Err(IndexError::InputUnavailable { .. })));
    }

    #[test]
    fn invalid_utf8_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.txt");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let docs = read_documents(&[path]);
        assert!(docs[0].text.is_err());
    }
}
