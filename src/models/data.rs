use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::ExtractError;

/// Identity document families accepted for extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Aadhaar,
    Pan,
    VoterId,
    DrivingLicense,
    Passport,
    Other,
}

impl DocumentType {
    pub const ALL: [DocumentType; 6] = [
        DocumentType::Aadhaar,
        DocumentType::Pan,
        DocumentType::VoterId,
        DocumentType::DrivingLicense,
        DocumentType::Passport,
        DocumentType::Other,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            DocumentType::Aadhaar => "aadhaar",
            DocumentType::Pan => "pan",
            DocumentType::VoterId => "voter_id",
            DocumentType::DrivingLicense => "driving_license",
            DocumentType::Passport => "passport",
            DocumentType::Other => "other",
        }
    }

    /// Provenance label attached to fields extracted from this kind of document.
    pub fn source_label(&self) -> &'static str {
        match self {
            DocumentType::Aadhaar => "Aadhaar",
            DocumentType::Pan => "PAN Card",
            _ => "Document",
        }
    }

    /// Guess the document type from an uploaded file name.
    pub fn detect_from_name(file_name: &str) -> DocumentType {
        let name = file_name.to_lowercase();
        if name.contains("aadhaar") || name.contains("aadhar") {
            DocumentType::Aadhaar
        } else if name.contains("pan") {
            DocumentType::Pan
        } else if name.contains("voter") || name.contains("epic") {
            DocumentType::VoterId
        } else if name.contains("driving") || name.contains("license") || name.contains("dl") {
            DocumentType::DrivingLicense
        } else if name.contains("passport") {
            DocumentType::Passport
        } else {
            DocumentType::Other
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DocumentType {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        DocumentType::ALL
            .iter()
            .copied()
            .find(|t| t.tag() == tag)
            .ok_or_else(|| ExtractError::InvalidDocumentType(s.to_string()))
    }
}

/// What the OCR collaborator is handed for one document.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// Encoded raster image (JPEG, PNG, ...).
    Image(Vec<u8>),
    /// PDF that has not been rasterized by the caller.
    Pdf(Vec<u8>),
    /// Text that has already been recognized.
    Text(String),
}

impl DocumentSource {
    pub fn len(&self) -> usize {
        match self {
            DocumentSource::Image(bytes) | DocumentSource::Pdf(bytes) => bytes.len(),
            DocumentSource::Text(text) => text.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DocumentSource::Image(_) => "image",
            DocumentSource::Pdf(_) => "pdf",
            DocumentSource::Text(_) => "text",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RawDocument {
    pub id: String,
    pub name: String,
    pub document_type: DocumentType,
    pub source: DocumentSource,
}

impl RawDocument {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        document_type: DocumentType,
        source: DocumentSource,
    ) -> Self {
        RawDocument {
            id: id.into(),
            name: name.into(),
            document_type,
            source,
        }
    }

    /// Convenience constructor for already-recognized text.
    pub fn from_text(
        id: impl Into<String>,
        document_type: DocumentType,
        text: impl Into<String>,
    ) -> Self {
        let id = id.into();
        RawDocument {
            name: id.clone(),
            id,
            document_type,
            source: DocumentSource::Text(text.into()),
        }
    }
}

/// Canonical personal-data fields. Ordering follows `FieldKey::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    FullName,
    DateOfBirth,
    Gender,
    Address,
    Pincode,
    State,
    AadhaarNumber,
    PanNumber,
    FatherName,
    MotherName,
    MobileNumber,
}

impl FieldKey {
    pub const ALL: [FieldKey; 11] = [
        FieldKey::FullName,
        FieldKey::DateOfBirth,
        FieldKey::Gender,
        FieldKey::Address,
        FieldKey::Pincode,
        FieldKey::State,
        FieldKey::AadhaarNumber,
        FieldKey::PanNumber,
        FieldKey::FatherName,
        FieldKey::MotherName,
        FieldKey::MobileNumber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::FullName => "fullName",
            FieldKey::DateOfBirth => "dateOfBirth",
            FieldKey::Gender => "gender",
            FieldKey::Address => "address",
            FieldKey::Pincode => "pincode",
            FieldKey::State => "state",
            FieldKey::AadhaarNumber => "aadhaarNumber",
            FieldKey::PanNumber => "panNumber",
            FieldKey::FatherName => "fatherName",
            FieldKey::MotherName => "motherName",
            FieldKey::MobileNumber => "mobileNumber",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse reliability tier. Only used to break ties when merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Confidence::Low => f.write_str("low"),
            Confidence::Medium => f.write_str("medium"),
            Confidence::High => f.write_str("high"),
        }
    }
}

pub const NOT_FOUND_SOURCE: &str = "Not found";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedField {
    pub key: FieldKey,
    pub value: String,
    pub confidence: Confidence,
    pub source: String,
}

impl ExtractedField {
    pub fn new(
        key: FieldKey,
        value: impl Into<String>,
        confidence: Confidence,
        source: impl Into<String>,
    ) -> Self {
        ExtractedField {
            key,
            value: value.into(),
            confidence,
            source: source.into(),
        }
    }

    /// Placeholder for a key no document produced.
    pub fn not_found(key: FieldKey) -> Self {
        ExtractedField::new(key, "", Confidence::Low, NOT_FOUND_SOURCE)
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty() && self.source == NOT_FOUND_SOURCE
    }
}

/// Result of running a single field extractor over one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found {
        value: String,
        confidence: Confidence,
        source: String,
    },
    NotFound,
}

impl Extraction {
    pub fn found(
        value: impl Into<String>,
        confidence: Confidence,
        source: impl Into<String>,
    ) -> Self {
        Extraction::Found {
            value: value.into(),
            confidence,
            source: source.into(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Extraction::Found { .. })
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Extraction::Found { value, .. } => Some(value),
            Extraction::NotFound => None,
        }
    }

    pub fn into_field(self, key: FieldKey) -> Option<ExtractedField> {
        match self {
            Extraction::Found { value, confidence, source } => {
                Some(ExtractedField::new(key, value, confidence, source))
            }
            Extraction::NotFound => None,
        }
    }
}

/// Final merged view: exactly one field per canonical key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedRecord {
    fields: BTreeMap<FieldKey, ExtractedField>,
}

impl ConsolidatedRecord {
    /// Builds a record from a partial map, filling every missing canonical key
    /// with a `Not found` placeholder.
    pub(crate) fn from_partial(mut fields: BTreeMap<FieldKey, ExtractedField>) -> Self {
        for key in FieldKey::ALL {
            fields.entry(key).or_insert_with(|| ExtractedField::not_found(key));
        }
        ConsolidatedRecord { fields }
    }

    pub fn empty() -> Self {
        Self::from_partial(BTreeMap::new())
    }

    pub fn get(&self, key: FieldKey) -> &ExtractedField {
        // every canonical key is inserted by `from_partial`
        &self.fields[&key]
    }

    pub fn value_of(&self, key: FieldKey) -> &str {
        &self.get(key).value
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractedField> {
        self.fields.values()
    }

    pub fn fields(&self) -> Vec<ExtractedField> {
        self.fields.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn has_extracted_data(&self) -> bool {
        self.fields.values().any(|f| !f.value.trim().is_empty())
    }

    /// Keys the user should double-check before the record is used.
    pub fn low_confidence_keys(&self) -> Vec<FieldKey> {
        self.fields
            .values()
            .filter(|f| f.confidence == Confidence::Low)
            .map(|f| f.key)
            .collect()
    }
}

impl Serialize for ConsolidatedRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.fields.values())
    }
}

/// How a single document fared in the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Completed,
    Empty,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentOutcome {
    pub document_id: String,
    pub document_type: DocumentType,
    pub status: DocumentStatus,
    pub fields: Vec<ExtractedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DocumentOutcome {
    pub fn completed(document: &RawDocument, fields: Vec<ExtractedField>) -> Self {
        DocumentOutcome {
            document_id: document.id.clone(),
            document_type: document.document_type,
            status: DocumentStatus::Completed,
            fields,
            message: None,
        }
    }

    pub fn without_fields(
        document: &RawDocument,
        status: DocumentStatus,
        message: impl Into<String>,
    ) -> Self {
        DocumentOutcome {
            document_id: document.id.clone(),
            document_type: document.document_type,
            status,
            fields: Vec::new(),
            message: Some(message.into()),
        }
    }
}

/// Everything an extraction run produces.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub generation: String,
    pub record: ConsolidatedRecord,
    pub documents: Vec<DocumentOutcome>,
}
