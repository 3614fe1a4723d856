use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::models::{
    DocumentOutcome, DocumentStatus, DocumentType, ExtractedField, ExtractorConfig, RawDocument,
};
use crate::processing::context::ExtractionContext;
use crate::processing::ocr::{describe_source, OcrEngine};
use crate::utils::ExtractError;

/// Run every extractor of the document's strategy family over `text`.
/// Fields that were not found are omitted.
pub fn parse_text(
    text: &str,
    document_type: DocumentType,
    config: &ExtractorConfig,
) -> Vec<ExtractedField> {
    let ctx = ExtractionContext::new(text, document_type, config);
    debug!(
        "Parsing {} line(s) as {} with {:?} heuristics",
        ctx.lines.len(),
        document_type,
        ctx.family()
    );

    ctx.family()
        .extractors()
        .iter()
        .filter_map(|strategy| {
            let field = (strategy.extract)(&ctx).into_field(strategy.key)?;
            debug!("  {} = {:?} ({})", field.key, field.value, field.confidence);
            Some(field)
        })
        .collect()
}

/// Turns one raw document into its extracted fields.
pub struct DocumentParser {
    ocr: Arc<dyn OcrEngine>,
    config: ExtractorConfig,
}

impl DocumentParser {
    pub fn new(ocr: Arc<dyn OcrEngine>, config: ExtractorConfig) -> Self {
        DocumentParser { ocr, config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn parse(&self, document: &RawDocument) -> DocumentOutcome {
        info!(
            "Processing {} document {} via {} OCR, input {}",
            document.document_type,
            document.id,
            self.ocr.name(),
            describe_source(&document.source)
        );

        let text = match self.ocr.recognize(&document.source) {
            Ok(text) => text,
            Err(ExtractError::UnsupportedFormat(reason)) => {
                warn!("Skipping {}: {}", document.name, reason);
                return DocumentOutcome::without_fields(document, DocumentStatus::Skipped, reason);
            }
            Err(e) => {
                error!("OCR failed for {}: {}", document.name, e);
                let message = e.to_string();
                return DocumentOutcome::without_fields(document, DocumentStatus::Failed, message);
            }
        };

        if text.trim().is_empty() {
            warn!("No text recognized in {}", document.name);
            let message = "no text recognized";
            return DocumentOutcome::without_fields(document, DocumentStatus::Empty, message);
        }

        let fields = self.parse_text(&text, document.document_type);
        info!("Found {} field(s) in {}", fields.len(), document.name);
        DocumentOutcome::completed(document, fields)
    }

    pub fn parse_text(&self, text: &str, document_type: DocumentType) -> Vec<ExtractedField> {
        parse_text(text, document_type, &self.config)
    }
}
