use crate::models::{DocumentType, ExtractorConfig};
use crate::processing::extractors::{find_aadhaar, find_date_of_birth, find_pincode};
use crate::processing::normalizer::normalize_lines;
use crate::processing::strategy::StrategyFamily;

/// Line positions the positional heuristics are bounded by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anchors {
    pub dob_line: Option<usize>,
    pub aadhaar_line: Option<usize>,
    pub pincode_line: Option<usize>,
}

impl Anchors {
    pub fn locate(lines: &[String]) -> Self {
        Anchors {
            dob_line: find_line(lines, |line| find_date_of_birth(line).is_some()),
            aadhaar_line: find_line(lines, |line| find_aadhaar(line).is_some()),
            pincode_line: find_line(lines, |line| find_pincode(line).is_some()),
        }
    }
}

fn find_line(lines: &[String], pred: impl Fn(&str) -> bool) -> Option<usize> {
    lines.iter().position(|line| pred(line))
}

/// Everything an extractor may look at for one document.
#[derive(Debug)]
pub struct ExtractionContext<'a> {
    pub raw_text: &'a str,
    pub lines: Vec<String>,
    pub document_type: DocumentType,
    pub config: &'a ExtractorConfig,
    pub anchors: Anchors,
}

impl<'a> ExtractionContext<'a> {
    pub fn new(
        raw_text: &'a str,
        document_type: DocumentType,
        config: &'a ExtractorConfig,
    ) -> Self {
        let lines = normalize_lines(raw_text);
        let anchors = Anchors::locate(&lines);
        ExtractionContext {
            raw_text,
            lines,
            document_type,
            config,
            anchors,
        }
    }

    pub fn family(&self) -> StrategyFamily {
        StrategyFamily::for_document(self.document_type)
    }

    pub fn source(&self) -> &'static str {
        self.document_type.source_label()
    }

    /// Normalized lines joined back into one block of text.
    pub fn normalized_text(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_lines() {
        let text = "GOVERNMENT OF INDIA\nRahul Sharma\nDOB: 15/08/1990\nMALE\n\
                    2345 6789 1234\nBengaluru 560001";
        let config = ExtractorConfig::default();
        let ctx = ExtractionContext::new(text, DocumentType::Aadhaar, &config);
        assert_eq!(ctx.anchors.dob_line, Some(2));
        assert_eq!(ctx.anchors.aadhaar_line, Some(4));
        assert_eq!(ctx.anchors.pincode_line, Some(5));
    }

    #[test]
    fn test_missing_anchors() {
        let config = ExtractorConfig::default();
        let ctx = ExtractionContext::new("nothing useful here", DocumentType::Other, &config);
        assert_eq!(ctx.anchors, Anchors::default());
    }
}
