use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{info, warn};
use rayon::prelude::*;
use sha2::{Digest, Sha256};

use crate::models::{DocumentOutcome, ExtractionReport, ExtractorConfig, RawDocument};
use crate::processing::document_parser::DocumentParser;
use crate::processing::merger::merge;
use crate::processing::ocr::{OcrEngine, PassthroughOcr};

/// Identity of one submitted document set. Results computed for an older
/// generation are never published.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Generation(String);

impl Generation {
    pub fn of(documents: &[RawDocument]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((documents.len() as u64).to_le_bytes());
        for document in documents {
            hasher.update(document.id.as_bytes());
            hasher.update([0u8]);
            hasher.update(document.name.as_bytes());
            hasher.update([0u8]);
            hasher.update((document.source.len() as u64).to_le_bytes());
        }
        Generation(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // short form for logs
        f.write_str(&self.0[..12.min(self.0.len())])
    }
}

/// Parses a document set and merges the per-document results.
pub struct DocumentExtractor {
    parser: DocumentParser,
}

impl DocumentExtractor {
    pub fn new(ocr: Arc<dyn OcrEngine>, config: ExtractorConfig) -> Self {
        DocumentExtractor {
            parser: DocumentParser::new(ocr, config),
        }
    }

    /// Extractor for documents whose text is already available.
    pub fn with_text_input(config: ExtractorConfig) -> Self {
        Self::new(Arc::new(PassthroughOcr), config)
    }

    pub fn parser(&self) -> &DocumentParser {
        &self.parser
    }

    /// Documents are parsed in parallel; outcomes keep submission order.
    pub fn parse_all(&self, documents: &[RawDocument]) -> Vec<DocumentOutcome> {
        documents
            .par_iter()
            .map(|document| self.parser.parse(document))
            .collect()
    }

    pub fn extract(&self, documents: &[RawDocument]) -> ExtractionReport {
        let generation = Generation::of(documents);
        info!("Extracting {} document(s), generation {}", documents.len(), generation);
        let outcomes = self.parse_all(documents);
        Self::finish(&generation, outcomes)
    }

    fn finish(generation: &Generation, outcomes: Vec<DocumentOutcome>) -> ExtractionReport {
        let record = merge(&outcomes);
        info!(
            "Generation {}: {} of {} field(s) filled",
            generation,
            record.iter().filter(|f| !f.is_placeholder()).count(),
            record.len()
        );
        ExtractionReport {
            generation: generation.as_str().to_string(),
            record,
            documents: outcomes,
        }
    }
}

/// Tracks the current document set so that a slow run for a replaced set
/// cannot overwrite the results of the newer one.
pub struct ExtractionSession {
    extractor: DocumentExtractor,
    state: Mutex<SessionState>,
}

#[derive(Default)]
struct SessionState {
    current: Option<Generation>,
    latest: Option<ExtractionReport>,
}

impl ExtractionSession {
    pub fn new(extractor: DocumentExtractor) -> Self {
        ExtractionSession {
            extractor,
            state: Mutex::new(SessionState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn extractor(&self) -> &DocumentExtractor {
        &self.extractor
    }

    /// Make `documents` the current set and return its generation.
    pub fn begin(&self, documents: &[RawDocument]) -> Generation {
        let generation = Generation::of(documents);
        info!("Starting generation {} with {} document(s)", generation, documents.len());
        self.state().current = Some(generation.clone());
        generation
    }

    pub fn is_current(&self, generation: &Generation) -> bool {
        self.state().current.as_ref() == Some(generation)
    }

    /// Merge and publish `outcomes` unless a newer set has been submitted
    /// since `generation` began.
    pub fn complete(
        &self,
        generation: &Generation,
        outcomes: Vec<DocumentOutcome>,
    ) -> Option<ExtractionReport> {
        let mut state = self.state();
        if state.current.as_ref() != Some(generation) {
            warn!("Discarding stale results for generation {}", generation);
            return None;
        }
        let report = DocumentExtractor::finish(generation, outcomes);
        state.latest = Some(report.clone());
        Some(report)
    }

    pub fn run(&self, documents: &[RawDocument]) -> Option<ExtractionReport> {
        let generation = self.begin(documents);
        let outcomes = self.extractor.parse_all(documents);
        self.complete(&generation, outcomes)
    }

    /// Most recently published report.
    pub fn latest(&self) -> Option<ExtractionReport> {
        self.state().latest.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentType, FieldKey};

    fn docs(names: &[&str]) -> Vec<RawDocument> {
        names
            .iter()
            .map(|n| RawDocument::from_text(*n, DocumentType::Other, "Mobile: 9876543210"))
            .collect()
    }

    #[test]
    fn test_generation_depends_on_set_and_order() {
        let a = Generation::of(&docs(&["a", "b"]));
        assert_eq!(a, Generation::of(&docs(&["a", "b"])));
        assert_ne!(a, Generation::of(&docs(&["b", "a"])));
        assert_ne!(a, Generation::of(&docs(&["a"])));
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_extract_keeps_document_order() {
        let extractor = DocumentExtractor::with_text_input(ExtractorConfig::default());
        let report = extractor.extract(&docs(&["x", "y", "z"]));
        let ids: Vec<&str> = report.documents.iter().map(|d| d.document_id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
        assert_eq!(report.record.value_of(FieldKey::MobileNumber), "9876543210");
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let extractor = DocumentExtractor::with_text_input(ExtractorConfig::default());
        let session = ExtractionSession::new(extractor);
        let old_docs = docs(&["old"]);
        let new_docs = docs(&["new"]);

        let old = session.begin(&old_docs);
        let old_outcomes = session.extractor().parse_all(&old_docs);
        let newer = session.begin(&new_docs);

        assert!(!session.is_current(&old));
        assert!(session.complete(&old, old_outcomes).is_none());
        assert!(session.latest().is_none());

        let outcomes = session.extractor().parse_all(&new_docs);
        let report = session.complete(&newer, outcomes).unwrap();
        assert_eq!(report.generation, newer.as_str());
        assert_eq!(session.latest().unwrap().generation, newer.as_str());
    }

    #[test]
    fn test_run_publishes_latest() {
        let extractor = DocumentExtractor::with_text_input(ExtractorConfig::default());
        let session = ExtractionSession::new(extractor);
        assert!(session.run(&[]).is_some());
        let latest = session.latest().unwrap();
        assert!(!latest.record.has_extracted_data());
        assert_eq!(latest.record.len(), FieldKey::ALL.len());
    }
}
