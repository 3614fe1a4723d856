use std::sync::Arc;

use idfill::models::{
    Confidence, DocumentSource, DocumentStatus, DocumentType, ExtractorConfig, FieldKey,
    RawDocument,
};
use idfill::processing::{parse_text, PassthroughOcr};
use idfill::{DocumentExtractor, ExtractionSession};

const AADHAAR_TEXT: &str = "Government of India
Priya Verma
DOB: 23/04/1995
FEMALE
D/O Rajesh Verma
Flat 4, Lake View Apartments
Salt Lake, Kolkata
West Bengal 700091
Mobile: 9876543210
2345 6789 0123
";

const PAN_TEXT: &str = "INCOME TAX DEPARTMENT
GOVT. OF INDIA
Name
PRIYA VERMA
Father's Name
RAJESH VERMA
Date of Birth
23/04/1995
Permanent Account Number
ABCPV1234K
";

fn extractor() -> DocumentExtractor {
    DocumentExtractor::new(Arc::new(PassthroughOcr), ExtractorConfig::default())
}

#[test]
fn aadhaar_card_fields() {
    let fields = parse_text(AADHAAR_TEXT, DocumentType::Aadhaar, &ExtractorConfig::default());
    let value = |key: FieldKey| fields.iter().find(|f| f.key == key).map(|f| f.value.as_str());

    assert_eq!(value(FieldKey::FullName), Some("Priya Verma"));
    assert_eq!(value(FieldKey::DateOfBirth), Some("23/04/1995"));
    assert_eq!(value(FieldKey::Gender), Some("Female"));
    assert_eq!(value(FieldKey::AadhaarNumber), Some("2345 6789 0123"));
    assert_eq!(value(FieldKey::Pincode), Some("700091"));
    assert_eq!(value(FieldKey::State), Some("West Bengal"));
    assert_eq!(value(FieldKey::FatherName), Some("Rajesh Verma"));
    assert_eq!(value(FieldKey::MobileNumber), Some("9876543210"));
    assert_eq!(
        value(FieldKey::Address),
        Some("D/O Rajesh Verma, Flat 4, Lake View Apartments, Salt Lake, Kolkata")
    );
    assert_eq!(value(FieldKey::PanNumber), None);
    assert!(fields.iter().all(|f| f.source == "Aadhaar"));
}

#[test]
fn aadhaar_and_pan_are_merged() {
    let documents = vec![
        RawDocument::from_text("aadhaar", DocumentType::Aadhaar, AADHAAR_TEXT),
        RawDocument::from_text("pan", DocumentType::Pan, PAN_TEXT),
    ];
    let report = extractor().extract(&documents);
    let record = &report.record;

    assert_eq!(record.len(), FieldKey::ALL.len());
    // equal confidence: the first document wins
    assert_eq!(record.value_of(FieldKey::FullName), "Priya Verma");
    assert_eq!(record.get(FieldKey::FullName).source, "Aadhaar");
    assert_eq!(record.value_of(FieldKey::PanNumber), "ABCPV1234K");
    assert_eq!(record.get(FieldKey::PanNumber).source, "PAN Card");
    assert_eq!(record.get(FieldKey::PanNumber).confidence, Confidence::High);
    assert!(record.get(FieldKey::MotherName).is_placeholder());
    assert!(report.documents.iter().all(|d| d.status == DocumentStatus::Completed));
}

#[test]
fn document_order_decides_ties() {
    let documents = vec![
        RawDocument::from_text("pan", DocumentType::Pan, PAN_TEXT),
        RawDocument::from_text("aadhaar", DocumentType::Aadhaar, AADHAAR_TEXT),
    ];
    let record = extractor().extract(&documents).record;
    assert_eq!(record.value_of(FieldKey::FullName), "PRIYA VERMA");
    assert_eq!(record.get(FieldKey::FullName).source, "PAN Card");
}

#[test]
fn no_documents_gives_placeholder_record() {
    let report = extractor().extract(&[]);
    assert!(report.documents.is_empty());
    for key in FieldKey::ALL {
        let field = report.record.get(key);
        assert_eq!(field.value, "");
        assert_eq!(field.confidence, Confidence::Low);
        assert_eq!(field.source, "Not found");
    }
}

#[test]
fn unrasterized_pdf_is_skipped_without_failing_the_run() {
    let documents = vec![
        RawDocument::new(
            "scan",
            "pan_scan.pdf",
            DocumentType::Pan,
            DocumentSource::Pdf(b"%PDF-1.4".to_vec()),
        ),
        RawDocument::from_text("aadhaar", DocumentType::Aadhaar, AADHAAR_TEXT),
    ];
    let report = extractor().extract(&documents);
    assert_eq!(report.documents[0].status, DocumentStatus::Skipped);
    assert!(report.documents[0].fields.is_empty());
    assert_eq!(report.record.value_of(FieldKey::AadhaarNumber), "2345 6789 0123");
}

#[test]
fn identifiers_are_found_anywhere_in_text() {
    let config = ExtractorConfig::default();
    let fields = parse_text("ref 234567891234 and ABCDE1234F", DocumentType::Other, &config);
    let aadhaar = fields.iter().find(|f| f.key == FieldKey::AadhaarNumber).unwrap();
    assert_eq!(aadhaar.value, "2345 6789 1234");
    assert_eq!(aadhaar.confidence, Confidence::High);
    let pan = fields.iter().find(|f| f.key == FieldKey::PanNumber).unwrap();
    assert_eq!(pan.value, "ABCDE1234F");
}

#[test]
fn stale_session_results_are_not_published() {
    let session = ExtractionSession::new(extractor());
    let first = vec![RawDocument::from_text("a", DocumentType::Aadhaar, AADHAAR_TEXT)];
    let second = vec![RawDocument::from_text("b", DocumentType::Pan, PAN_TEXT)];

    let old = session.begin(&first);
    let old_outcomes = session.extractor().parse_all(&first);
    let report = session.run(&second).unwrap();

    assert!(session.complete(&old, old_outcomes).is_none());
    assert_eq!(session.latest().unwrap().generation, report.generation);
    assert_eq!(session.latest().unwrap().record.value_of(FieldKey::FullName), "PRIYA VERMA");
}

#[test]
fn report_serializes_every_field() {
    let report = extractor().extract(&[RawDocument::from_text("pan", DocumentType::Pan, PAN_TEXT)]);
    let json = serde_json::to_value(&report).unwrap();
    let record = json["record"].as_array().unwrap();
    assert_eq!(record.len(), FieldKey::ALL.len());
    assert!(record.iter().any(|f| f["key"] == "panNumber" && f["confidence"] == "high"));
    assert_eq!(json["documents"][0]["status"], "completed");
}
